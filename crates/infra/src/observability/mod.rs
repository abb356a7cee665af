//! Logging setup and transaction logging
//!
//! `tracing` is the logging facade throughout the workspace. Applications
//! call [`init_tracing`] once; libraries only emit events.

use edgemgmt_core::DebugObserver;
use edgemgmt_domain::{DebugData, EdgeError, Result};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install a global `tracing` subscriber.
///
/// The filter is read from `EDGE_LOG`, then `RUST_LOG`, defaulting to
/// `info`.
///
/// # Errors
/// Returns `EdgeError::Config` if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let directives = std::env::var("EDGE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| EdgeError::Config(format!("Invalid log filter '{directives}': {e}")))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| EdgeError::Config(format!("Failed to install tracing subscriber: {e}")))
}

/// Observer that emits one `tracing` event per transaction.
///
/// Successful calls log at `debug`, failures at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDebugObserver;

impl DebugObserver for TracingDebugObserver {
    fn on_transaction(&self, data: &DebugData) {
        let elapsed_ms = u64::try_from(data.elapsed_ms()).unwrap_or(u64::MAX);

        if data.code_class == 2 {
            debug!(
                method = %data.method,
                uri = %data.uri,
                status = data.status_code,
                elapsed_ms,
                "edge transaction"
            );
        } else {
            warn!(
                method = %data.method,
                uri = %data.uri,
                status = data.status_code,
                elapsed_ms,
                error = data.exception.as_deref().unwrap_or_default(),
                "edge transaction failed"
            );
        }
    }
}
