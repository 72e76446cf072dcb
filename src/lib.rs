//! AquaVisual Demo Runner
//!
//! Launches the pre-built AquaVisual demonstration programs, captures what they
//! print and tells the operator which ones pass. Two modes:
//!
//! - **Batch** (`--all`): check every executable exists, run them all in
//!   order, print a tally
//! - **Interactive** (default): pick demos from a numbered menu
//!
//! # Quick Start
//!
//! ```ignore
//! use aqua_demos::{DemoCatalog, DemoRunner, RunnerConfig, Shutdown};
//!
//! let runner = DemoRunner::new(RunnerConfig::from_env()?, DemoCatalog::builtin(), Shutdown::never());
//! let report = runner.run_all().await;
//! assert!(report.succeeded());
//! ```

pub mod cli;
pub mod config;
pub mod demo;
pub mod errors;
pub mod menu;
pub mod observability;
pub mod shutdown;
pub mod ui;

pub use observability::telemetry;

pub use config::{BuildConfiguration, RunnerConfig};
pub use demo::{BatchReport, DemoCatalog, DemoDescriptor, DemoOutcome, DemoRunner, RunSummary};
pub use menu::{InteractiveMenu, MenuSession};
pub use shutdown::{Shutdown, ShutdownTrigger};
