//! Console Report
//!
//! Renders every line the runner shows the operator. Functions here return
//! strings and never print, so the wording can be tested directly.

use super::style::{Glyphs, ReportStyle};
use crate::config::RunnerConfig;
use crate::demo::prerequisites::{Presence, Readiness};
use crate::demo::{DemoCatalog, DemoDescriptor, DemoOutcome, ExecutionResult, RunSummary};
use std::time::Duration;

/// Width of the `=` rules around demo headers and the summary.
pub const HEADER_WIDTH: usize = 60;
/// Width of the `-` rule above captured output.
pub const OUTPUT_RULE_WIDTH: usize = 40;

pub fn rule(c: char, width: usize) -> String {
    std::iter::repeat(c).take(width).collect()
}

/// Captured stream text without its final line break.
fn captured(text: &str) -> &str {
    text.strip_suffix('\n')
        .map(|t| t.strip_suffix('\r').unwrap_or(t))
        .unwrap_or(text)
}

pub fn prerequisites(readiness: &Readiness) -> String {
    let mut lines = vec!["=== Checking Prerequisites ===".title().to_string()];

    if !readiness.bin_dir_exists {
        lines.push(
            format!(
                "{} Build directory not found: {}",
                Glyphs::cross(),
                readiness.bin_dir.display()
            )
            .fail()
            .to_string(),
        );
        return lines.join("\n");
    }

    for check in &readiness.checks {
        let line = match check.presence {
            Presence::Found => format!("{} {} found", Glyphs::check(), check.file_name)
                .pass()
                .to_string(),
            Presence::NotFound => format!("{} {} not found", Glyphs::cross(), check.file_name)
                .fail()
                .to_string(),
            Presence::NotExecutable => {
                format!("{} {} not executable", Glyphs::cross(), check.file_name)
                    .fail()
                    .to_string()
            }
        };
        lines.push(line);
    }

    let missing = readiness.missing();
    if !missing.is_empty() {
        lines.push(String::new());
        lines.push(format!("Missing demos: {}", missing.join(", ")).warn().to_string());
        lines.push("Please build the project first using CMake.".to_string());
    }

    lines.join("\n")
}

pub fn demo_header(demo: &DemoDescriptor) -> String {
    let rule = rule('=', HEADER_WIDTH);
    format!(
        "\n{}\n{}\nDescription: {}\n{}",
        rule,
        format!("Running: {}", demo.name).title(),
        demo.description,
        rule
    )
}

fn push_stream(lines: &mut Vec<String>, label: &str, text: &str) {
    if !text.is_empty() {
        lines.push(label.to_string());
        lines.push(captured(text).to_string());
    }
}

pub fn demo_outcome(outcome: &DemoOutcome, timeout: Duration) -> String {
    let mut lines = Vec::new();
    match outcome {
        DemoOutcome::Succeeded(res) => {
            lines.push(
                format!("{} Demo completed successfully!", Glyphs::check())
                    .pass()
                    .to_string(),
            );
            lines.push("\nOutput:".to_string());
            lines.push(rule('-', OUTPUT_RULE_WIDTH));
            lines.push(captured(&res.stdout).to_string());
            push_stream(&mut lines, "Warnings/Errors:", &res.stderr);
        }
        DemoOutcome::NonZeroExit(res) => {
            lines.push(
                format!("{} Demo failed with exit code: {}", Glyphs::cross(), res.exit_code)
                    .fail()
                    .to_string(),
            );
            push_captured(&mut lines, res);
        }
        DemoOutcome::TimedOut(res) => {
            lines.push(
                format!(
                    "{} Demo timed out after {} seconds",
                    Glyphs::cross(),
                    timeout.as_secs()
                )
                .fail()
                .to_string(),
            );
            push_stream(&mut lines, "Output before timeout:", &res.stdout);
        }
        DemoOutcome::Interrupted(_) => {
            lines.push(format!("{} Demo interrupted", Glyphs::cross()).fail().to_string());
        }
        DemoOutcome::LaunchFailed(err) => {
            let reason = match err {
                crate::errors::DemoError::LaunchFailure { source, .. } => source.to_string(),
                other => other.to_string(),
            };
            lines.push(
                format!("{} Error running demo: {}", Glyphs::cross(), reason)
                    .fail()
                    .to_string(),
            );
        }
    }
    lines.join("\n")
}

fn push_captured(lines: &mut Vec<String>, res: &ExecutionResult) {
    push_stream(lines, "Output:", &res.stdout);
    push_stream(lines, "Error:", &res.stderr);
}

pub fn batch_banner() -> String {
    format!(
        "{}\nThis will run all available AquaVisual demonstration programs.\n",
        format!("{} AquaVisual Demo Runner", Glyphs::rocket()).title()
    )
}

pub fn summary(summary: &RunSummary, skipped: &[&str]) -> String {
    let rule = rule('=', HEADER_WIDTH);
    let mut lines = vec![
        format!("\n{}", rule),
        "DEMO SUMMARY".title().to_string(),
        rule,
        format!("Total demos: {}", summary.total),
        format!("Successful: {}", summary.succeeded).pass().to_string(),
        format!("Failed: {}", summary.failed()).fail().to_string(),
    ];
    if !skipped.is_empty() {
        lines.push(format!("Skipped after interrupt: {}", skipped.join(", ")).warn().to_string());
    }
    if summary.all_succeeded() {
        lines.push(
            format!("{} All demos completed successfully!", Glyphs::party())
                .pass()
                .to_string(),
        );
    } else {
        lines.push(
            format!(
                "{} Some demos failed. Check the output above for details.",
                Glyphs::warning()
            )
            .warn()
            .to_string(),
        );
    }
    lines.join("\n")
}

pub fn menu(catalog: &DemoCatalog) -> String {
    let mut lines = vec![
        format!("{} Interactive Demo Mode", Glyphs::gamepad()).title().to_string(),
        "Choose which demo to run:\n".to_string(),
    ];
    for (i, demo) in catalog.iter().enumerate() {
        lines.push(format!("{}. {} - {}", i + 1, demo.name, demo.description));
    }
    lines.push(format!("{}. Run all demos", catalog.run_all_index()));
    lines.push("0. Exit".to_string());
    lines.join("\n")
}

pub fn menu_prompt(catalog: &DemoCatalog) -> String {
    format!("\nEnter your choice (0-{}): ", catalog.run_all_index())
}

pub fn invalid_choice() -> String {
    "Invalid choice. Please try again.".fail().to_string()
}

pub fn invalid_input() -> String {
    "Invalid input. Please enter a number.".fail().to_string()
}

pub fn goodbye() -> String {
    "Goodbye!".to_string()
}

pub fn exiting() -> String {
    "\nExiting...".to_string()
}

/// `--list` output: every demo with the path it would be run from.
pub fn catalog_listing(catalog: &DemoCatalog, config: &RunnerConfig) -> String {
    let mut lines = vec![format!("Demos in {}:", config.bin_dir().display())
        .title()
        .to_string()];
    for (i, demo) in catalog.iter().enumerate() {
        lines.push(format!(
            "{}. {} - {}\n   {}",
            i + 1,
            demo.name,
            demo.description,
            config.executable_path(demo.name).display().to_string().muted()
        ));
    }
    lines.join("\n")
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage:\n  {p} --all          # Run all demos\n  {p} --interactive  # Interactive mode\n  {p}                # Interactive mode (default)\n\nRun '{p} --help' for all options.",
        p = program
    )
}
