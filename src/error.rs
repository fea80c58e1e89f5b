//! This module defines all error types used throughout the monitor.

use crate::host::Player;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the monitor
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Sample source errors (process gone, read failed)
    #[error("Sample source error: {0}")]
    SampleSource(String),

    /// Input sink errors
    #[error("Input sink error: {0}")]
    InputSink(String),

    /// Recording file errors
    #[error("Replay error at line {line}: {message}")]
    Replay { line: usize, message: String },

    /// Motion notation errors
    #[error("Invalid motion notation {notation:?}: {message}")]
    Notation { notation: String, message: String },

    /// An action that cannot be turned into an input sequence
    #[error("Unmappable action: {0}")]
    UnmappableAction(String),

    /// A motion is already playing for the player
    #[error("Input sequence already active for {0}")]
    SequencerBusy(Player),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file parse errors
    #[error("Configuration parse error in {file:?}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),

    /// Wrapped anyhow errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a sample source error
    pub fn sample_source(msg: impl Into<String>) -> Self {
        Self::SampleSource(msg.into())
    }

    /// Create an input sink error
    pub fn input_sink(msg: impl Into<String>) -> Self {
        Self::InputSink(msg.into())
    }

    /// Create a notation error
    pub fn notation(notation: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Notation {
            notation: notation.into(),
            message: msg.into(),
        }
    }

    /// Create an unmappable action error
    pub fn unmappable(msg: impl Into<String>) -> Self {
        Self::UnmappableAction(msg.into())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse {
            file: PathBuf::from("unknown"),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Custom(format!("JSON error: {}", err))
    }
}

// Helper macros for creating errors

/// Create a custom error with formatting
#[macro_export]
macro_rules! custom_error {
    ($($arg:tt)*) => {
        $crate::error::Error::Custom(format!($($arg)*))
    };
}

/// Bail with a custom error message
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::custom_error!($($arg)*))
    };
}

/// Ensure a condition is true or return error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = crate::custom_error!("test {}", "error");
        assert_eq!(err.to_string(), "test error");

        let err = Error::sample_source("process exited");
        assert_eq!(err.to_string(), "Sample source error: process exited");

        let err = Error::notation("23X", "unknown button");
        assert_eq!(
            err.to_string(),
            "Invalid motion notation \"23X\": unknown button"
        );
    }

    #[test]
    fn test_sequencer_busy_names_player() {
        let err = Error::SequencerBusy(Player::P2);
        assert_eq!(err.to_string(), "Input sequence already active for P2");
    }

    fn check_positive(value: i64) -> Result<i64> {
        crate::ensure!(value > 0, "value must be positive, got {}", value);
        Ok(value)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);
        let err = check_positive(-1).unwrap_err();
        assert_eq!(err.to_string(), "value must be positive, got -1");
    }
}
