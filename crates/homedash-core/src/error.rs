//! Centralized error types for the homedash application.
//!
//! Per-crate errors (todo storage, weather fetch) stay in their own crates;
//! this module holds the top-level type the binary reports through, with
//! user-facing messages suitable for display.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Service-level errors (todo store, weather) mapped from other crates.
    #[error("Service error: {0}")]
    Service(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Service(_) => "Something went wrong. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }

    /// Wrap a service-layer error without taking a crate dependency on it.
    pub fn service(err: impl std::fmt::Display) -> Self {
        AppError::Service(err.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Read(String),

    #[error("Configuration parse error: {0}")]
    Parse(String),

    #[error("Failed to write configuration: {0}")]
    Write(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Read(_) => "Could not read settings. Using defaults.",
            ConfigError::Parse(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Write(_) => "Could not save settings. Check file permissions.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
