//! Tracing subscriber setup.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show every selection change and quote
//! - `RUST_LOG=crust_session=trace` - Trace the session crate only
//! - Default: [`SessionConfig::log_filter`](crate::SessionConfig)

use tracing_subscriber::EnvFilter;

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` wins over the configured filter. Fails if the configured filter
/// does not parse or a global subscriber is already set.
pub fn init_tracing(config: &SessionConfig) -> SessionResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| SessionError::Config(format!("log filter: {}", e)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| SessionError::Config(format!("tracing: {}", e)))
}
