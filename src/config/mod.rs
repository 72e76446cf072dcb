//! Runner Configuration
//!
//! Resolves where the demo executables live and how long each one may run.
//! There is no configuration file. Values come from:
//! - built-in defaults (`build/bin/Debug`, 30 second ceiling)
//! - `AQUA_DEMOS_*` environment variables
//! - command-line flags, applied last by the CLI

use crate::errors::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default wall-clock ceiling for a single demo.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default build output directory, relative to the working directory.
pub const DEFAULT_BUILD_DIR: &str = "build";

pub const ENV_BUILD_DIR: &str = "AQUA_DEMOS_BUILD_DIR";
pub const ENV_CONFIGURATION: &str = "AQUA_DEMOS_CONFIGURATION";
pub const ENV_BIN_DIR: &str = "AQUA_DEMOS_BIN_DIR";
pub const ENV_TIMEOUT: &str = "AQUA_DEMOS_TIMEOUT";

/// Build configuration whose output directory holds the demos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BuildConfiguration {
    #[default]
    Debug,
    Release,
}

impl BuildConfiguration {
    /// Directory name used by the build system for this configuration.
    pub fn dir_name(self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "Debug",
            BuildConfiguration::Release => "Release",
        }
    }
}

impl std::fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl std::str::FromStr for BuildConfiguration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildConfiguration::Debug),
            "release" => Ok(BuildConfiguration::Release),
            other => Err(format!("unknown build configuration '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Root of the build output (`<build-dir>/bin/<configuration>`)
    pub build_dir: PathBuf,
    pub configuration: BuildConfiguration,
    /// Replaces the whole `<build-dir>/bin/<configuration>` path when set
    pub bin_dir_override: Option<PathBuf>,
    /// Per-demo wall-clock ceiling
    pub timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            configuration: BuildConfiguration::default(),
            bin_dir_override: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RunnerConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `AQUA_DEMOS_*` key. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ENV_BUILD_DIR) {
            config.build_dir = PathBuf::from(dir);
        }
        if let Some(value) = get(ENV_CONFIGURATION) {
            config.configuration = value.parse().map_err(|reason| ConfigError::InvalidValue {
                key: ENV_CONFIGURATION.to_string(),
                value: value.clone(),
                reason,
            })?;
        }
        if let Some(dir) = get(ENV_BIN_DIR) {
            config.bin_dir_override = Some(PathBuf::from(dir));
        }
        if let Some(value) = get(ENV_TIMEOUT) {
            let secs = parse_timeout_secs(&value).map_err(|reason| ConfigError::InvalidValue {
                key: ENV_TIMEOUT.to_string(),
                value: value.clone(),
                reason,
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Directory the demo executables are expected in.
    pub fn bin_dir(&self) -> PathBuf {
        match self.bin_dir_override {
            Some(ref dir) => dir.clone(),
            None => self
                .build_dir
                .join("bin")
                .join(self.configuration.dir_name()),
        }
    }

    /// Full path of the executable for demo `name`, with the platform's
    /// executable suffix.
    pub fn executable_path(&self, name: &str) -> PathBuf {
        let dir = self.bin_dir();
        // A bare file name would be looked up on PATH.
        let dir = if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        };
        dir.join(executable_file_name(name))
    }
}

/// `<name>` plus the platform executable suffix (`.exe` on Windows).
pub fn executable_file_name(name: &str) -> String {
    format!("{}{}", name, std::env::consts::EXE_SUFFIX)
}

/// Parse a timeout given in whole seconds. Zero is rejected.
pub fn parse_timeout_secs(value: &str) -> Result<u64, String> {
    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| "expected a whole number of seconds".to_string())?;
    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(secs)
}

/// True if `path` is a regular file the runner could execute.
pub fn is_executable(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}
