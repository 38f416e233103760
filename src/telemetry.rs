//! Optional structured tracing (cargo feature `trace`).
//!
//! Enabled at runtime by `DOP_AVM_TRACE=1` or a non-empty `DOP_AVM_LOG`
//! (EnvFilter syntax, default `info`). Output goes to stderr so container
//! output on stdout stays untouched.

#[cfg(feature = "trace")]
use once_cell::sync::OnceCell;

pub const TRACE_ENV: &str = "DOP_AVM_TRACE";
pub const LOG_FILTER_ENV: &str = "DOP_AVM_LOG";

/// Held by `main` for the lifetime of the process while tracing is active.
#[derive(Debug)]
pub struct TelemetryGuard {
    _private: (),
}

#[cfg(feature = "trace")]
static INIT: OnceCell<()> = OnceCell::new();

fn telemetry_enabled_env() -> bool {
    crate::env_is_truthy(TRACE_ENV) || crate::util::env_non_empty(LOG_FILTER_ENV).is_some()
}

#[cfg(feature = "trace")]
pub fn telemetry_init() -> Option<TelemetryGuard> {
    use tracing_subscriber::EnvFilter;

    if !telemetry_enabled_env() || INIT.set(()).is_err() {
        return None;
    }
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        crate::warn_print(&format!("dop-avm: telemetry: failed to install subscriber: {e}"));
        return None;
    }
    tracing::debug!(version = crate::VERSION, "tracing initialized");
    Some(TelemetryGuard { _private: () })
}

#[cfg(not(feature = "trace"))]
pub fn telemetry_init() -> Option<TelemetryGuard> {
    if telemetry_enabled_env() {
        crate::warn_print("dop-avm: tracing requested but this build lacks the `trace` feature");
    }
    None
}
