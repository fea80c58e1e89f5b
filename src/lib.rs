//! Frame Advantage Monitor
//!
//! A training companion for two-player fighting games.
//!
//! This library provides functionality for:
//! - Classifying per-tick animation samples into behavioral categories
//! - Measuring frame advantage after blockstun and recoil guard
//! - Firing reversal actions on configurable triggers
//! - Turning actions and numpad notation into timed controller input
//! - Replaying recorded sessions through the whole pipeline

pub mod classifier;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod matchup;
pub mod monitor;
pub mod trigger;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level, optionally mirrored to a file
pub fn init_logging(level: &str, file: Option<&std::path::Path>) -> Result<()> {
    use std::sync::Mutex;
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match file {
        Some(path) => {
            let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "frame-monitor");
    }
}
