//! Unified error types for the backend gateway.

use thiserror::Error;

/// Unified error type for the backend gateway.
///
/// Request handling is total; these only surface during startup.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device command validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Neither servo nor pump was given.
    #[error("command must set at least one of servo or pump")]
    Empty,

    /// Servo angle outside the mechanical range.
    #[error("servo angle {0} out of range 0..=180")]
    ServoOutOfRange(i32),

    /// Pump state other than 0 (off) or 1 (on).
    #[error("invalid pump state {0}: expected 0 or 1")]
    InvalidPumpState(u8),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
