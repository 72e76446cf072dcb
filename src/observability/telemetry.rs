//! Telemetry
//!
//! Structured logging for runner operations:
//! - demo execution spans with timing and outcome
//! - menu state transition records
//! - log levels via RUST_LOG, or `--verbose`
//!
//! Logs go to stderr so they never interleave with the console report on
//! stdout.

use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sanitize a string for safe log output by escaping control characters.
/// Demo output and operator input may embed newlines that would forge log
/// entries.
pub fn sanitize_for_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x1b' => out.push_str("\\e"),
            '\x00' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

/// Initialize the global subscriber.
///
/// Without `RUST_LOG` and without `verbose` nothing is installed, which keeps
/// the console report clean.
pub fn init_tracing(verbose: bool) {
    match std::env::var("RUST_LOG") {
        Ok(filter) => init_tracing_with_filter(&filter),
        Err(_) if verbose => init_tracing_with_filter("info"),
        Err(_) => {}
    }
}

/// Initialize with custom filter string
pub fn init_tracing_with_filter(filter: &str) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr);

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

/// Record a menu state transition
pub fn record_state_transition(from: &str, to: &str) {
    debug!(
        from = sanitize_for_log(from).as_str(),
        to = sanitize_for_log(to).as_str(),
        "menu state transition"
    );
}

/// Initialize tracing for tests with a simple subscriber
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
