use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while running a demo.
///
/// None of these abort a run. Each one is caught where it happens, turned into
/// a console message and marks the affected demo as failed.
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("{name} not found at {}", path.display())]
    MissingExecutable { name: String, path: PathBuf },

    #[error("{name} timed out after {} seconds", limit.as_secs())]
    TimeoutExceeded { name: String, limit: Duration },

    #[error("{name} failed with exit code: {code}")]
    NonZeroExit { name: String, code: i32 },

    #[error("failed to launch {name}: {source}")]
    LaunchFailure {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid menu selection '{input}'")]
    InvalidMenuSelection { input: String },

    #[error("{name} interrupted by operator")]
    Interrupted { name: String },
}

/// Problems with the runner's own settings. These are the only errors that
/// reach `main`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Determine the process exit code for an error that escaped `cli::run`.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<ConfigError>().is_some() {
        return EXIT_CONFIG_ERROR;
    }
    EXIT_FAILURE
}
