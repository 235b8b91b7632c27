//! Custom error types for budget-grid
//!
//! Ledger mutations never fail; these errors cover the boundary around them:
//! configuration, file I/O and input guards.

use thiserror::Error;

use crate::models::month::PeriodError;

/// The main error type for budget-grid operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input rejected before it reaches the ledger
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid date range or month text
    #[error("Period error: {0}")]
    Period(#[from] PeriodError),
}

impl BudgetError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for budget-grid operations
pub type BudgetResult<T> = Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_validation_error() {
        let err = BudgetError::Validation("Name cannot be empty".into());
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Name cannot be empty");
    }

    #[test]
    fn test_from_period_error() {
        let err: BudgetError = PeriodError::Inverted.into();
        assert!(matches!(err, BudgetError::Period(PeriodError::Inverted)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BudgetError = io_err.into();
        assert!(matches!(err, BudgetError::Io(_)));
    }
}
