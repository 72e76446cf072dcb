//! Interactive Menu
//!
//! A small state machine over operator input:
//!
//! ```text
//! Prompting --"0"--------------------> Exiting(Requested)
//! Prompting --"N+1"------------------> Dispatching(RunAll) --> Exiting(BatchFinished)
//! Prompting --"1".."N"---------------> Dispatching(RunDemo) --> Prompting
//! Prompting --invalid----------------> Prompting
//! Prompting --interrupt / EOF--------> Exiting(Interrupted | EndOfInput)
//! ```

pub mod input;

pub use input::{LineSource, ScriptedLines, StdinLines};

use crate::demo::{BatchReport, DemoOutcome, DemoRunner};
use crate::errors::DemoError;
use crate::observability::telemetry::{record_state_transition, sanitize_for_log};
use crate::ui::report;
use std::io::Write;
use std::num::IntErrorKind;
use tracing::debug;

/// What one line of operator input asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Exit,
    RunAll,
    /// 1-based demo index
    RunDemo(usize),
    /// A number, but not one on the menu
    OutOfRange,
    NotANumber,
}

impl Selection {
    pub fn next_state(self) -> MenuState {
        match self {
            Selection::Exit => MenuState::Exiting(ExitReason::Requested),
            Selection::RunAll => MenuState::Dispatching(Action::RunAll),
            Selection::RunDemo(index) => MenuState::Dispatching(Action::RunDemo(index)),
            Selection::OutOfRange | Selection::NotANumber => MenuState::Prompting,
        }
    }
}

/// Interpret a line typed at the prompt for a menu of `demo_count` demos.
pub fn parse_selection(input: &str, demo_count: usize) -> Selection {
    let choice = input.trim();
    if choice == "0" {
        return Selection::Exit;
    }
    if choice == (demo_count + 1).to_string() {
        return Selection::RunAll;
    }
    match choice.parse::<i64>() {
        Ok(n) if n >= 1 && (n as u64) <= demo_count as u64 => Selection::RunDemo(n as usize),
        Ok(_) => Selection::OutOfRange,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Selection::OutOfRange
        }
        Err(_) => Selection::NotANumber,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RunDemo(usize),
    RunAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Operator chose "0"
    Requested,
    /// "Run all demos" finished
    BatchFinished,
    /// Ctrl-C or SIGTERM
    Interrupted,
    /// stdin closed
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Prompting,
    Dispatching(Action),
    Exiting(ExitReason),
}

/// Everything one menu session did
#[derive(Debug)]
pub struct MenuSession {
    /// Single-demo runs, in order
    pub runs: Vec<(&'static str, DemoOutcome)>,
    pub batch: Option<BatchReport>,
    /// Lines rejected at the prompt
    pub invalid_inputs: usize,
    pub exit: ExitReason,
}

pub struct InteractiveMenu<'r> {
    runner: &'r DemoRunner,
}

impl<'r> InteractiveMenu<'r> {
    pub fn new(runner: &'r DemoRunner) -> Self {
        Self { runner }
    }

    /// Show the menu and serve `input` until the operator leaves.
    pub async fn run(&self, input: &mut dyn LineSource) -> MenuSession {
        let catalog = self.runner.catalog();
        let mut runs = Vec::new();
        let mut batch = None;
        let mut invalid_inputs = 0;
        let mut state = MenuState::Prompting;

        println!("{}", report::menu(catalog));

        loop {
            let next = match state {
                MenuState::Prompting => {
                    let (next, valid) = self.prompt(input).await;
                    if !valid {
                        invalid_inputs += 1;
                    }
                    next
                }
                MenuState::Dispatching(Action::RunDemo(index)) => {
                    if let Some(demo) = catalog.by_menu_index(index) {
                        let outcome = self.runner.run_demo(demo).await;
                        runs.push((demo.name, outcome));
                    }
                    if self.runner.shutdown().is_requested() {
                        MenuState::Exiting(ExitReason::Interrupted)
                    } else {
                        MenuState::Prompting
                    }
                }
                MenuState::Dispatching(Action::RunAll) => {
                    batch = Some(self.runner.run_all().await);
                    MenuState::Exiting(ExitReason::BatchFinished)
                }
                MenuState::Exiting(reason) => {
                    match reason {
                        ExitReason::Requested => println!("{}", report::goodbye()),
                        ExitReason::Interrupted | ExitReason::EndOfInput => {
                            println!("{}", report::exiting())
                        }
                        ExitReason::BatchFinished => {}
                    }
                    return MenuSession {
                        runs,
                        batch,
                        invalid_inputs,
                        exit: reason,
                    };
                }
            };

            if next != state {
                record_state_transition(&format!("{:?}", state), &format!("{:?}", next));
            }
            state = next;
        }
    }

    /// Prompt once. Returns the next state and whether the line was valid.
    async fn prompt(&self, input: &mut dyn LineSource) -> (MenuState, bool) {
        let catalog = self.runner.catalog();
        print!("{}", report::menu_prompt(catalog));
        let _ = std::io::stdout().flush();

        let line = tokio::select! {
            line = input.next_line() => line,
            _ = self.runner.shutdown().requested() => {
                return (MenuState::Exiting(ExitReason::Interrupted), true);
            }
        };
        let Some(line) = line else {
            return (MenuState::Exiting(ExitReason::EndOfInput), true);
        };

        let selection = parse_selection(&line, catalog.len());
        debug!(input = sanitize_for_log(&line).as_str(), ?selection, "menu input");
        let valid = match selection {
            Selection::OutOfRange | Selection::NotANumber => {
                let err = DemoError::InvalidMenuSelection {
                    input: sanitize_for_log(&line),
                };
                debug!(error = %err, "rejected menu input");
                if selection == Selection::OutOfRange {
                    println!("{}", report::invalid_choice());
                } else {
                    println!("{}", report::invalid_input());
                }
                false
            }
            _ => true,
        };
        (selection.next_state(), valid)
    }
}
