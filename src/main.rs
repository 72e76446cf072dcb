use aqua_demos::shutdown::{wait_for_signal, Shutdown};
use std::process::ExitCode;

/// Grace period after a shutdown signal before force-exiting (seconds).
const SHUTDOWN_GRACE_SECS: u64 = 5;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let (trigger, shutdown) = Shutdown::channel();

    // The executor and the menu both watch `shutdown` and wind down on their
    // own. If something is stuck anyway, force-exit after the grace period.
    tokio::spawn(async move {
        wait_for_signal().await;
        trigger.trigger();

        tokio::time::sleep(std::time::Duration::from_secs(SHUTDOWN_GRACE_SECS)).await;
        eprintln!("Shutdown grace period expired, forcing exit.");
        std::process::exit(aqua_demos::errors::EXIT_FAILURE as i32);
    });

    match aqua_demos::cli::run(shutdown).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(aqua_demos::errors::get_exit_code(&e))
        }
    }
}
