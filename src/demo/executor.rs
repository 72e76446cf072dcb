//! Demo Executor
//!
//! Runs one demo executable as a child process:
//! - no arguments, null stdin, stdout and stderr captured separately
//! - own process group on Unix, so terminal job control stays with the runner
//! - hard wall-clock ceiling, after which the whole group is killed and reaped
//!
//! Launch failures never escape; they become [`DemoOutcome::LaunchFailed`].

use crate::errors::DemoError;
use crate::observability::telemetry::sanitize_for_log;
use crate::shutdown::Shutdown;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::DemoDescriptor;

/// Exit code reported when the child produced none (signal, timeout).
pub const NO_EXIT_CODE: i32 = -1;

/// What one invocation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
    pub duration: Duration,
}

impl ExecutionResult {
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.exit_code == 0
    }
}

/// Classified result of running one demo
#[derive(Debug)]
pub enum DemoOutcome {
    Succeeded(ExecutionResult),
    NonZeroExit(ExecutionResult),
    /// Killed at the deadline; holds whatever was captured before that
    TimedOut(ExecutionResult),
    /// Killed because the operator asked to stop
    Interrupted(ExecutionResult),
    LaunchFailed(DemoError),
}

impl DemoOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, DemoOutcome::Succeeded(_))
    }

    pub fn result(&self) -> Option<&ExecutionResult> {
        match self {
            DemoOutcome::Succeeded(r)
            | DemoOutcome::NonZeroExit(r)
            | DemoOutcome::TimedOut(r)
            | DemoOutcome::Interrupted(r) => Some(r),
            DemoOutcome::LaunchFailed(_) => None,
        }
    }

    /// The failure as a [`DemoError`], for anything but a launch failure
    /// (which already carries one) or success.
    pub fn failure(&self, name: &str, limit: Duration) -> Option<DemoError> {
        let name = name.to_string();
        match self {
            DemoOutcome::NonZeroExit(r) => Some(DemoError::NonZeroExit {
                name,
                code: r.exit_code,
            }),
            DemoOutcome::TimedOut(_) => Some(DemoError::TimeoutExceeded { name, limit }),
            DemoOutcome::Interrupted(_) => Some(DemoError::Interrupted { name }),
            DemoOutcome::Succeeded(_) | DemoOutcome::LaunchFailed(_) => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            DemoOutcome::Succeeded(_) => "succeeded",
            DemoOutcome::NonZeroExit(_) => "non_zero_exit",
            DemoOutcome::TimedOut(_) => "timed_out",
            DemoOutcome::Interrupted(_) => "interrupted",
            DemoOutcome::LaunchFailed(_) => "launch_failed",
        }
    }
}

enum Waited {
    Exited(std::io::Result<ExitStatus>),
    TimedOut,
    Interrupted,
}

/// Spawns demos and enforces the time ceiling
#[derive(Debug, Clone)]
pub struct DemoExecutor {
    timeout: Duration,
}

impl DemoExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `demo` from `path` and wait for it, at most `timeout`.
    pub async fn execute(
        &self,
        demo: &DemoDescriptor,
        path: &Path,
        shutdown: &Shutdown,
    ) -> DemoOutcome {
        let span = info_span!(
            "demo.execute",
            demo = demo.name,
            duration_ms = tracing::field::Empty,
            success = tracing::field::Empty,
        );

        async move {
            let start = Instant::now();
            let outcome = self.execute_inner(demo, path, shutdown, start).await;
            let duration = outcome
                .result()
                .map(|r| r.duration)
                .unwrap_or_else(|| start.elapsed())
                .as_millis() as u64;

            let span = tracing::Span::current();
            span.record("duration_ms", duration);
            span.record("success", outcome.succeeded());

            match &outcome {
                DemoOutcome::Succeeded(_) => {
                    info!(duration_ms = duration, "demo completed successfully")
                }
                DemoOutcome::LaunchFailed(e) => {
                    error!(error = %sanitize_for_log(&e.to_string()), "demo could not be launched")
                }
                other => warn!(
                    outcome = other.label(),
                    error = other
                        .failure(demo.name, self.timeout)
                        .map(|e| e.to_string())
                        .unwrap_or_default()
                        .as_str(),
                    duration_ms = duration,
                    "demo failed"
                ),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn execute_inner(
        &self,
        demo: &DemoDescriptor,
        path: &Path,
        shutdown: &Shutdown,
        start: Instant,
    ) -> DemoOutcome {
        let mut child = match spawn(path) {
            Ok(child) => child,
            Err(source) => {
                return DemoOutcome::LaunchFailed(DemoError::LaunchFailure {
                    name: demo.name.to_string(),
                    source,
                })
            }
        };
        // The process group id equals the leader's pid. Kept here because
        // `Child::id` returns `None` once the leader has been reaped.
        let pgid = child.id();
        debug!(pid = pgid, path = %path.display(), "spawned demo");

        let mut stdout = child.stdout.take();
        let mut stderr = child.stderr.take();
        let mut out_buf = Vec::new();
        let mut err_buf = Vec::new();

        let waited = {
            let collect = async {
                let (status, _, _) = tokio::try_join!(
                    child.wait(),
                    drain(stdout.as_mut(), &mut out_buf),
                    drain(stderr.as_mut(), &mut err_buf),
                )?;
                Ok::<ExitStatus, std::io::Error>(status)
            };

            tokio::select! {
                res = tokio::time::timeout(self.timeout, collect) => match res {
                    Ok(res) => Waited::Exited(res),
                    Err(_) => Waited::TimedOut,
                },
                _ = shutdown.requested() => Waited::Interrupted,
            }
        };

        let result = |exit_code: i32, timed_out: bool, out: &[u8], err: &[u8]| ExecutionResult {
            exit_code,
            stdout: String::from_utf8_lossy(out).into_owned(),
            stderr: String::from_utf8_lossy(err).into_owned(),
            timed_out,
            duration: start.elapsed(),
        };

        match waited {
            Waited::Exited(Ok(status)) => {
                let code = status.code().unwrap_or(NO_EXIT_CODE);
                let res = result(code, false, &out_buf, &err_buf);
                if res.succeeded() {
                    DemoOutcome::Succeeded(res)
                } else {
                    DemoOutcome::NonZeroExit(res)
                }
            }
            Waited::Exited(Err(source)) => {
                terminate(&mut child, pgid).await;
                DemoOutcome::LaunchFailed(DemoError::LaunchFailure {
                    name: demo.name.to_string(),
                    source,
                })
            }
            Waited::TimedOut => {
                terminate(&mut child, pgid).await;
                DemoOutcome::TimedOut(result(NO_EXIT_CODE, true, &out_buf, &err_buf))
            }
            Waited::Interrupted => {
                terminate(&mut child, pgid).await;
                DemoOutcome::Interrupted(result(NO_EXIT_CODE, false, &out_buf, &err_buf))
            }
        }
    }
}

fn spawn(path: &Path) -> std::io::Result<Child> {
    let mut cmd = Command::new(path);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);

    #[cfg(unix)]
    {
        cmd.process_group(0);
    }

    cmd.spawn()
}

/// Read a pipe to the end. `read` is cancel-safe, so `buf` keeps everything
/// received even if the caller gives up early.
async fn drain<R>(pipe: Option<&mut R>, buf: &mut Vec<u8>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(pipe) = pipe else {
        return Ok(());
    };
    let mut chunk = [0u8; 8192];
    loop {
        let n = pipe.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

/// Kill the demo's process group and the child itself, then reap it.
/// The group is signalled even if the leader already exited, so background
/// processes it left holding the pipes die too.
async fn terminate(child: &mut Child, pgid: Option<u32>) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;
        if let Some(pgid) = pgid.and_then(|pid| i32::try_from(pid).ok()) {
            if let Err(e) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
                debug!("killpg({}) failed: {}", pgid, e);
            }
        }
    }
    #[cfg(not(unix))]
    let _ = pgid;

    // Already reaped; only the group needed signalling.
    if matches!(child.try_wait(), Ok(Some(_))) {
        return;
    }
    if let Err(e) = child.kill().await {
        warn!("failed to kill demo process: {}", e);
    }
}
