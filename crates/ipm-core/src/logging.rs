//! Logging bootstrap for hosts embedding the engine
//!
//! The engine only emits `tracing` events: scan progress, type search
//! decisions and merge steps at `debug`, per-node detail at `trace`.
//! Nothing is printed unless the host installs a subscriber, for example
//! with [`init`].

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with(DEFAULT_FILTER)
}

/// Like [`init`] with a host-chosen fallback, e.g. `"ipm_core=debug"`.
///
/// Fails when the directive does not parse or a global subscriber is
/// already set.
pub fn init_with(fallback: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_with("ipm_core=trace");
        tracing::debug!("subscriber installed");
        assert!(init().is_err());
    }
}
