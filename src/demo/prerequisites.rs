//! Prerequisite Checker
//!
//! Looks for every catalog entry's executable in the binary directory. A
//! missing file is a reported condition, never an error; the batch runner
//! decides whether to go ahead.

use crate::config::{executable_file_name, is_executable, RunnerConfig};
use std::path::PathBuf;

use super::DemoCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    NotFound,
    /// A file is there but has no execute permission
    NotExecutable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableCheck {
    pub name: &'static str,
    /// File name including the platform suffix
    pub file_name: String,
    pub path: PathBuf,
    pub presence: Presence,
}

/// Result of checking the whole catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub bin_dir: PathBuf,
    pub bin_dir_exists: bool,
    /// One entry per catalog demo, in catalog order
    pub checks: Vec<ExecutableCheck>,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.bin_dir_exists && self.checks.iter().all(|c| c.presence == Presence::Found)
    }

    /// Names of the demos that cannot be run, in catalog order.
    pub fn missing(&self) -> Vec<&'static str> {
        self.checks
            .iter()
            .filter(|c| c.presence != Presence::Found)
            .map(|c| c.name)
            .collect()
    }
}

/// Check every demo in `catalog` against `config`'s binary directory.
pub fn check(catalog: &DemoCatalog, config: &RunnerConfig) -> Readiness {
    let bin_dir = config.bin_dir();
    let bin_dir_exists = bin_dir.is_dir();

    let checks = catalog
        .iter()
        .map(|demo| {
            let path = config.executable_path(demo.name);
            let presence = if !bin_dir_exists || !path.exists() {
                Presence::NotFound
            } else if is_executable(&path) {
                Presence::Found
            } else {
                Presence::NotExecutable
            };
            ExecutableCheck {
                name: demo.name,
                file_name: executable_file_name(demo.name),
                path,
                presence,
            }
        })
        .collect();

    Readiness {
        bin_dir,
        bin_dir_exists,
        checks,
    }
}
