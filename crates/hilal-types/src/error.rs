use thiserror::Error;

/// Errors from hilal operations.
///
/// Only caller misuse is reported this way. Astronomical edge cases (polar
/// nights, missing conjunctions) and locale calendar failures degrade silently
/// inside the engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HilalError {
    /// A month count of zero was requested.
    #[error("month count must be at least 1, got {count}")]
    InvalidCount { count: usize },

    /// A civil date string could not be parsed.
    #[error("invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    /// Grid resolution is not a finite positive number of degrees, or is so
    /// fine that the grid would exceed its point limit.
    #[error("grid resolution {resolution} is not finite, positive and within the point limit")]
    InvalidResolution { resolution: f64 },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl HilalError {
    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates an `InvalidDate` error.
    pub fn invalid_date(input: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}
