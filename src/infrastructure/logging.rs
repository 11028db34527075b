//! Logging system configuration and initialization.
//!
//! Console output by default, with an optional non-blocking rolling file
//! appender. The level comes from `RUST_LOG` when set, otherwise from the
//! logging configuration.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use std::sync::Mutex;
use tracing::info;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use crate::infrastructure::config::LoggingConfig;

// Keeps the non-blocking writer guards alive for the process lifetime.
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<non_blocking::WorkerGuard>> = Mutex::new(Vec::new());
}

/// Initialize the logging system with default configuration.
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize the logging system from a [`LoggingConfig`].
///
/// Safe to call once per process; a second call reports the collision via
/// the subscriber's init error.
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let console_layer = fmt::layer().with_target(true);
    let registry = tracing_subscriber::registry().with(filter).with(console_layer);

    if config.log_to_file {
        let appender = rolling::daily(&config.directory, "catalog.log");
        let (writer, guard) = non_blocking(appender);
        if let Ok(mut guards) = LOG_GUARDS.lock() {
            guards.push(guard);
        }
        registry
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .try_init()
            .context("failed to initialize logging")?;
    } else {
        registry.try_init().context("failed to initialize logging")?;
    }

    info!(level = %config.level, "logging initialized");
    Ok(())
}
