//! Logging initialisation via tracing-subscriber.

use tracing_subscriber::EnvFilter;

use crate::error::{ReportError, Result};

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `level` (e.g. `"info"`, `"debug"`)
/// is used.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ReportError::Logger(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ReportError::Logger(format!("failed to set subscriber: {e}")))
}
