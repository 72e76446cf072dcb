//! Unit tests for the interactive menu
//!
//! Tests cover:
//! - Selection dispatch (single demo, run all, exit)
//! - Invalid input handling
//! - End of input and operator interrupts

use crate::support::{catalog, config_for, read_log, write_logging_demo};
use aqua_demos::menu::{ExitReason, LineSource, ScriptedLines};
use aqua_demos::{DemoRunner, InteractiveMenu, Shutdown};
use async_trait::async_trait;
use std::path::Path;

/// Input that never produces a line.
struct SilentOperator;

#[async_trait]
impl LineSource for SilentOperator {
    async fn next_line(&mut self) -> Option<String> {
        std::future::pending().await
    }
}

fn two_demo_runner(dir: &Path, log: &Path, shutdown: Shutdown) -> DemoRunner {
    write_logging_demo(dir, "A", log, 0);
    write_logging_demo(dir, "B", log, 0);
    DemoRunner::new(config_for(dir), catalog(&["A", "B"]), shutdown)
}

// ============================================================================
// Dispatch Tests
// ============================================================================

mod dispatch_tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_exits_without_running_anything() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        let runner = two_demo_runner(dir.path(), &log, Shutdown::never());

        let mut input = ScriptedLines::new(["0"]);
        let session = InteractiveMenu::new(&runner).run(&mut input).await;

        assert_eq!(session.exit, ExitReason::Requested);
        assert!(session.runs.is_empty());
        assert!(session.batch.is_none());
        assert!(read_log(&log).is_empty());
    }

    #[tokio::test]
    async fn test_single_demos_return_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        let runner = two_demo_runner(dir.path(), &log, Shutdown::never());

        let mut input = ScriptedLines::new(["2", "1", "2", "0"]);
        let session = InteractiveMenu::new(&runner).run(&mut input).await;

        let names: Vec<_> = session.runs.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
        assert!(session.runs.iter().all(|(_, o)| o.succeeded()));
        assert_eq!(read_log(&log), vec!["B", "A", "B"]);
        assert_eq!(session.exit, ExitReason::Requested);
    }

    #[tokio::test]
    async fn test_run_all_runs_batch_once_then_exits() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        let runner = two_demo_runner(dir.path(), &log, Shutdown::never());

        let mut input = ScriptedLines::new(["3", "1", "0"]);
        let session = InteractiveMenu::new(&runner).run(&mut input).await;

        assert_eq!(session.exit, ExitReason::BatchFinished);
        let batch = session.batch.expect("batch should have run");
        assert!(batch.succeeded());
        assert_eq!(batch.executed(), vec!["A", "B"]);
        assert!(session.runs.is_empty());
        assert_eq!(read_log(&log), vec!["A", "B"]);
        // The menu stops reading once the batch is done.
        assert_eq!(input.remaining(), 2);
    }
}

// ============================================================================
// Invalid Input Tests
// ============================================================================

mod invalid_input_tests {
    use super::*;

    #[tokio::test]
    async fn test_out_of_range_and_garbage_reprompt() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        let runner = two_demo_runner(dir.path(), &log, Shutdown::never());

        let mut input = ScriptedLines::new(["5", "abc", "", "-1", "0"]);
        let session = InteractiveMenu::new(&runner).run(&mut input).await;

        assert_eq!(session.invalid_inputs, 4);
        assert!(session.runs.is_empty());
        assert!(read_log(&log).is_empty());
        assert_eq!(session.exit, ExitReason::Requested);
    }

    #[tokio::test]
    async fn test_end_of_input_exits() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        let runner = two_demo_runner(dir.path(), &log, Shutdown::never());

        let mut input = ScriptedLines::new(["1"]);
        let session = InteractiveMenu::new(&runner).run(&mut input).await;

        assert_eq!(session.runs.len(), 1);
        assert_eq!(session.exit, ExitReason::EndOfInput);
    }
}

// ============================================================================
// Interrupt Tests
// ============================================================================

mod interrupt_tests {
    use super::*;

    #[tokio::test]
    async fn test_interrupt_while_prompting_exits() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        let (trigger, shutdown) = Shutdown::channel();
        let runner = two_demo_runner(dir.path(), &log, shutdown);

        let mut input = SilentOperator;
        let menu = InteractiveMenu::new(&runner);
        let (session, _) = tokio::join!(menu.run(&mut input), async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            trigger.trigger();
        });

        assert_eq!(session.exit, ExitReason::Interrupted);
        assert!(session.runs.is_empty());
    }
}
