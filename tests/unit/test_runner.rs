//! Unit tests for the demo runner
//!
//! Tests cover:
//! - Batch runs: order, tallies, failure isolation
//! - Prerequisite gating
//! - Timeouts and operator interrupts

use crate::support::{catalog, config_for, read_log, write_demo, write_logging_demo};
use aqua_demos::demo::Readiness;
use aqua_demos::{BatchReport, DemoOutcome, DemoRunner, Shutdown};
use std::time::{Duration, Instant};

// ============================================================================
// Batch Tests
// ============================================================================

mod batch_tests {
    use super::*;

    #[tokio::test]
    async fn test_all_passing_run_in_catalog_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        for name in ["A", "B", "C"] {
            write_logging_demo(dir.path(), name, &log, 0);
        }

        let runner = DemoRunner::new(
            config_for(dir.path()),
            catalog(&["A", "B", "C"]),
            Shutdown::never(),
        );
        let report = runner.run_all().await;

        assert!(report.succeeded());
        let summary = report.summary().unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed(), 0);
        assert_eq!(report.executed(), vec!["A", "B", "C"]);
        assert_eq!(read_log(&log), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_demos() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        write_logging_demo(dir.path(), "A", &log, 0);
        write_logging_demo(dir.path(), "B", &log, 3);
        write_logging_demo(dir.path(), "C", &log, 0);

        let runner = DemoRunner::new(
            config_for(dir.path()),
            catalog(&["A", "B", "C"]),
            Shutdown::never(),
        );
        let report = runner.run_all().await;

        assert!(!report.succeeded());
        let summary = report.summary().unwrap();
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(read_log(&log), vec!["A", "B", "C"]);

        let BatchReport::Completed { outcomes, .. } = report else {
            panic!("expected a completed batch");
        };
        let DemoOutcome::NonZeroExit(res) = &outcomes[1].1 else {
            panic!("expected B to exit non-zero");
        };
        assert_eq!(res.exit_code, 3);
        assert_eq!(res.stdout, "B output\n");
    }

    #[tokio::test]
    async fn test_missing_demo_blocks_whole_batch() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        write_logging_demo(dir.path(), "B", &log, 0);

        let runner = DemoRunner::new(
            config_for(dir.path()),
            catalog(&["A", "B"]),
            Shutdown::never(),
        );
        let report = runner.run_all().await;

        let BatchReport::NotReady { missing } = &report else {
            panic!("expected NotReady");
        };
        assert_eq!(missing, &vec!["A"]);
        assert!(!report.succeeded());
        assert!(report.executed().is_empty());
        assert!(read_log(&log).is_empty());
    }

    #[tokio::test]
    async fn test_interrupt_before_batch_skips_every_demo() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        write_logging_demo(dir.path(), "A", &log, 0);
        write_logging_demo(dir.path(), "B", &log, 0);

        let (trigger, shutdown) = Shutdown::channel();
        trigger.trigger();
        let runner = DemoRunner::new(config_for(dir.path()), catalog(&["A", "B"]), shutdown);
        let report = runner.run_all().await;

        let BatchReport::Completed {
            summary, skipped, ..
        } = &report
        else {
            panic!("expected a completed batch");
        };
        assert_eq!(skipped, &vec!["A", "B"]);
        assert_eq!(summary.failed(), 2);
        assert!(read_log(&log).is_empty());
    }

    #[tokio::test]
    async fn test_interrupt_during_demo_skips_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("order.log");
        write_demo(
            dir.path(),
            "A",
            &format!("echo A >> '{}'\nexec sleep 30", log.display()),
        );
        write_logging_demo(dir.path(), "B", &log, 0);
        write_logging_demo(dir.path(), "C", &log, 0);

        let (trigger, shutdown) = Shutdown::channel();
        let runner = DemoRunner::new(
            config_for(dir.path()),
            catalog(&["A", "B", "C"]),
            shutdown,
        );
        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            trigger.trigger();
        });

        let start = Instant::now();
        let report = runner.run_all().await;
        stopper.await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(10));

        let BatchReport::Completed {
            summary,
            outcomes,
            skipped,
        } = &report
        else {
            panic!("expected a completed batch");
        };
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0, "A");
        assert!(matches!(outcomes[0].1, DemoOutcome::Interrupted(_)));
        assert_eq!(skipped, &vec!["B", "C"]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.failed(), summary.total);
        assert!(!report.succeeded());
        assert_eq!(read_log(&log), vec!["A"]);
    }
}

// ============================================================================
// Single Demo Tests
// ============================================================================

mod single_demo_tests {
    use super::*;

    #[tokio::test]
    async fn test_run_demo_captures_both_streams() {
        let dir = tempfile::tempdir().unwrap();
        write_demo(dir.path(), "A", "echo hello\necho careful >&2");

        let demos = catalog(&["A"]);
        let runner = DemoRunner::new(config_for(dir.path()), demos.clone(), Shutdown::never());
        let outcome = runner.run_demo(demos.by_menu_index(1).unwrap()).await;

        let DemoOutcome::Succeeded(res) = outcome else {
            panic!("expected success");
        };
        assert_eq!(res.stdout, "hello\n");
        assert_eq!(res.stderr, "careful\n");
    }

    #[tokio::test]
    async fn test_hung_demo_times_out_with_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        write_demo(dir.path(), "Slow", "echo started\nsleep 30");

        let mut config = config_for(dir.path());
        config.timeout = Duration::from_secs(1);
        let demos = catalog(&["Slow"]);
        let runner = DemoRunner::new(config, demos.clone(), Shutdown::never());

        let start = Instant::now();
        let outcome = runner.run_demo(demos.by_menu_index(1).unwrap()).await;
        assert!(start.elapsed() < Duration::from_secs(10));

        let DemoOutcome::TimedOut(res) = outcome else {
            panic!("expected timeout");
        };
        assert!(res.timed_out);
        assert_eq!(res.stdout, "started\n");
    }

    #[test]
    fn test_readiness_lists_every_demo() {
        let dir = tempfile::tempdir().unwrap();
        write_demo(dir.path(), "A", "exit 0");
        let runner = DemoRunner::new(
            config_for(dir.path()),
            catalog(&["A", "B"]),
            Shutdown::never(),
        );
        let readiness: Readiness = runner.check_prerequisites();
        assert_eq!(readiness.checks.len(), 2);
        assert_eq!(readiness.missing(), vec!["B"]);
    }
}
