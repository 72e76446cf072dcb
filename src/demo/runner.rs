//! Demo Runner
//!
//! Runs single demos and whole batches, printing the console report as it
//! goes. Demos always run one after another in catalog order.

use super::executor::{DemoExecutor, DemoOutcome};
use super::prerequisites::{self, Presence, Readiness};
use super::{DemoCatalog, DemoDescriptor};
use crate::config::RunnerConfig;
use crate::errors::DemoError;
use crate::shutdown::Shutdown;
use crate::ui::report;
use tracing::{info, warn};

/// Success tally for one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
}

impl RunSummary {
    /// Tally `outcomes` against a batch of `total` demos. Demos that never
    /// ran count as failed.
    pub fn from_outcomes<'a, I>(total: usize, outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a DemoOutcome>,
    {
        let succeeded = outcomes.into_iter().filter(|o| o.succeeded()).count();
        Self { total, succeeded }
    }

    pub fn failed(&self) -> usize {
        self.total.saturating_sub(self.succeeded)
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

/// What a batch did
#[derive(Debug)]
pub enum BatchReport {
    /// Prerequisites failed; nothing was executed
    NotReady { missing: Vec<&'static str> },
    Completed {
        summary: RunSummary,
        /// Executed demos in execution order
        outcomes: Vec<(&'static str, DemoOutcome)>,
        /// Demos not started because of an operator interrupt
        skipped: Vec<&'static str>,
    },
}

impl BatchReport {
    pub fn succeeded(&self) -> bool {
        match self {
            BatchReport::NotReady { .. } => false,
            BatchReport::Completed { summary, .. } => summary.all_succeeded(),
        }
    }

    pub fn summary(&self) -> Option<RunSummary> {
        match self {
            BatchReport::NotReady { .. } => None,
            BatchReport::Completed { summary, .. } => Some(*summary),
        }
    }

    /// Names of the demos that were actually started.
    pub fn executed(&self) -> Vec<&'static str> {
        match self {
            BatchReport::NotReady { .. } => Vec::new(),
            BatchReport::Completed { outcomes, .. } => {
                outcomes.iter().map(|(name, _)| *name).collect()
            }
        }
    }
}

pub struct DemoRunner {
    config: RunnerConfig,
    catalog: DemoCatalog,
    executor: DemoExecutor,
    shutdown: Shutdown,
}

impl DemoRunner {
    pub fn new(config: RunnerConfig, catalog: DemoCatalog, shutdown: Shutdown) -> Self {
        let executor = DemoExecutor::new(config.timeout);
        Self {
            config,
            catalog,
            executor,
            shutdown,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &DemoCatalog {
        &self.catalog
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    /// Check that every demo executable exists, printing one line per demo.
    pub fn check_prerequisites(&self) -> Readiness {
        let readiness = prerequisites::check(&self.catalog, &self.config);
        println!("{}", report::prerequisites(&readiness));
        for check in readiness.checks.iter().filter(|c| c.presence != Presence::Found) {
            let err = DemoError::MissingExecutable {
                name: check.name.to_string(),
                path: check.path.clone(),
            };
            warn!(error = %err, presence = ?check.presence, "demo executable unavailable");
        }
        readiness
    }

    /// Run a single demo and print its report.
    pub async fn run_demo(&self, demo: &DemoDescriptor) -> DemoOutcome {
        println!("{}", report::demo_header(demo));
        let path = self.config.executable_path(demo.name);
        let outcome = self.executor.execute(demo, &path, &self.shutdown).await;
        println!("{}", report::demo_outcome(&outcome, self.executor.timeout()));
        outcome
    }

    /// Run every demo in order. Refuses to start unless all executables are
    /// present. One failure does not stop the others.
    pub async fn run_all(&self) -> BatchReport {
        println!("{}", report::batch_banner());

        let readiness = self.check_prerequisites();
        if !readiness.is_ready() {
            return BatchReport::NotReady {
                missing: readiness.missing(),
            };
        }

        let mut outcomes = Vec::with_capacity(self.catalog.len());
        let mut skipped = Vec::new();
        for demo in &self.catalog {
            if self.shutdown.is_requested() {
                skipped.push(demo.name);
                continue;
            }
            let outcome = self.run_demo(demo).await;
            outcomes.push((demo.name, outcome));
        }

        let summary =
            RunSummary::from_outcomes(self.catalog.len(), outcomes.iter().map(|(_, o)| o));
        println!("{}", report::summary(&summary, &skipped));
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed(),
            "batch finished"
        );

        BatchReport::Completed {
            summary,
            outcomes,
            skipped,
        }
    }
}
