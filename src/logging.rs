//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; command output stays on
//! stdout. The filter is chosen from, in order: `--log-level`, `--verbose`
//! (`debug`), `AMENT_LOG`, `RUST_LOG`, and finally `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "AMENT_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive for this invocation.
pub fn filter_directive(log_level: Option<&str>, verbose: bool) -> String {
    choose_directive(
        log_level,
        verbose,
        std::env::var(LOG_ENV).ok(),
        std::env::var("RUST_LOG").ok(),
    )
}

/// An empty variable counts as unset, so it never hides the next one.
fn choose_directive(
    log_level: Option<&str>,
    verbose: bool,
    ament_log: Option<String>,
    rust_log: Option<String>,
) -> String {
    if let Some(level) = log_level {
        return level.to_string();
    }
    if verbose {
        return "debug".to_string();
    }
    let non_empty = |v: &String| !v.trim().is_empty();
    ament_log
        .filter(non_empty)
        .or_else(|| rust_log.filter(non_empty))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(log_level: Option<&str>, verbose: bool) {
    let directive = filter_directive(log_level, verbose);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
