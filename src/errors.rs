//! # Error Types Module
//!
//! This module defines the error types used by configuration loading, the
//! session store and measurement input validation.

/// Errors raised while reading configuration from the environment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("Missing configuration: {0} must be set")]
    Missing(&'static str),
    /// A variable is set but cannot be parsed
    #[error("Invalid configuration: {name}={value} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors returned by the session store's dialogue storage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Dialogue not found")]
    DialogueNotFound,
}

/// Reasons a measurement typed by the user is rejected
///
/// Every variant maps to a localized re-prompt; none of them change the
/// conversation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MeasurementError {
    #[error("Measurement is not a number")]
    NotANumber,
    #[error("Measurement must be positive")]
    NotPositive,
    #[error("Measurement {value} cm is outside {min}..={max} cm")]
    OutOfRange { value: u32, min: u32, max: u32 },
    #[error("Bust {bust} cm must be larger than underbust {underbust} cm")]
    BustNotAboveUnderbust { underbust: u32, bust: u32 },
}

impl MeasurementError {
    /// Localization key of the re-prompt shown for this error
    pub fn message_key(&self) -> &'static str {
        match self {
            MeasurementError::NotANumber => "error-not-a-number",
            MeasurementError::NotPositive => "error-not-positive",
            MeasurementError::OutOfRange { .. } => "error-out-of-range",
            MeasurementError::BustNotAboveUnderbust { .. } => "error-bust-too-small",
        }
    }
}
