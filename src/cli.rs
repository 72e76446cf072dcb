//! Command line entry point for the demo runner.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::config::{parse_timeout_secs, BuildConfiguration, RunnerConfig};
use crate::demo::{DemoCatalog, DemoRunner};
use crate::errors::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::menu::{InteractiveMenu, StdinLines};
use crate::shutdown::Shutdown;
use crate::telemetry::init_tracing;
use crate::ui::{report, style};

pub const PROGRAM_NAME: &str = "aqua-demos";

#[derive(Parser, Debug)]
#[command(name = PROGRAM_NAME)]
#[command(about = "Run the AquaVisual demo programs and report which ones pass")]
#[command(version)]
struct Cli {
    /// Run every demo in order and print a summary
    #[arg(long, conflicts_with = "interactive")]
    all: bool,

    /// Pick demos from a menu (the default)
    #[arg(long)]
    interactive: bool,

    /// List the demos and where their executables are expected, then exit
    #[arg(long, conflicts_with_all = ["all", "interactive"])]
    list: bool,

    /// Build output root
    #[arg(long, value_name = "DIR")]
    build_dir: Option<PathBuf>,

    /// Build configuration whose binaries to run
    #[arg(long, value_enum, value_name = "CONFIG")]
    configuration: Option<BuildConfiguration>,

    /// Directory holding the demo executables (skips build-dir layout)
    #[arg(long, value_name = "DIR")]
    bin_dir: Option<PathBuf>,

    /// Per-demo time limit in seconds
    #[arg(long, value_name = "SECS", value_parser = parse_timeout_secs)]
    timeout: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// ASCII glyphs instead of emoji
    #[arg(long)]
    ascii: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    All,
    Interactive,
    List,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.list {
            Mode::List
        } else if self.all {
            Mode::All
        } else {
            Mode::Interactive
        }
    }

    /// Layer command line values over `config`.
    fn apply(&self, mut config: RunnerConfig) -> RunnerConfig {
        let layout_given = self.build_dir.is_some() || self.configuration.is_some();
        if let Some(ref dir) = self.build_dir {
            config.build_dir = dir.clone();
        }
        if let Some(configuration) = self.configuration {
            config.configuration = configuration;
        }
        match self.bin_dir {
            Some(ref dir) => config.bin_dir_override = Some(dir.clone()),
            // An explicit layout on the command line beats a bin dir from the environment
            None if layout_given => config.bin_dir_override = None,
            None => {}
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

/// Parse arguments, run the selected mode and return the process exit code.
pub async fn run(shutdown: Shutdown) -> Result<u8> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout, real errors to stderr.
            let _ = e.print();
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                return Ok(EXIT_SUCCESS);
            }
            println!("{}", report::usage(PROGRAM_NAME));
            return Ok(EXIT_FAILURE);
        }
    };

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        style::set_color_enabled(false);
    }
    style::set_ascii_mode(cli.ascii);
    init_tracing(cli.verbose);

    let config = cli.apply(RunnerConfig::from_env().context("Invalid AQUA_DEMOS_* environment")?);
    let mode = cli.mode();
    info!(
        ?mode,
        bin_dir = %config.bin_dir().display(),
        timeout_secs = config.timeout.as_secs(),
        "starting demo runner"
    );

    let runner = DemoRunner::new(config, DemoCatalog::builtin(), shutdown);

    match mode {
        Mode::List => {
            println!("{}", report::catalog_listing(runner.catalog(), runner.config()));
            Ok(EXIT_SUCCESS)
        }
        Mode::All => {
            let batch = runner.run_all().await;
            Ok(if batch.succeeded() {
                EXIT_SUCCESS
            } else {
                EXIT_FAILURE
            })
        }
        Mode::Interactive => {
            let mut input = StdinLines::spawn().context("Failed to start stdin reader")?;
            InteractiveMenu::new(&runner).run(&mut input).await;
            Ok(EXIT_SUCCESS)
        }
    }
}
