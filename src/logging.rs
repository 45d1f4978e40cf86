//! Tracing setup for applications using the client
//!
//! The library itself only emits `tracing` events. Applications that do not
//! install their own subscriber can call [`init`] or [`init_from`].

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::LogLevel;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Build the filter used by [`init`]. `RUST_LOG` wins when set.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Install a global fmt subscriber.
///
/// Does nothing if a global subscriber is already installed.
pub fn init(level: LogLevel) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        debug!("Global subscriber already installed, keeping it");
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .try_init()
        .or_else(|e| {
            // Lost a race with another thread installing a subscriber
            if tracing::dispatcher::has_been_set() {
                Ok(())
            } else {
                Err(Error::Other(format!("Failed to initialize logging: {e}")))
            }
        })
}

/// Install a global fmt subscriber at the config's `log_level`
pub fn init_from(config: &ClientConfig) -> Result<()> {
    init(config.log_level)
}
