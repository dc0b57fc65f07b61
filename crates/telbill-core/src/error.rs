//! Unified error handling for TelBill
//!
//! This module provides the single error type used across the workspace,
//! with a stable error code and a process exit code for every variant.

use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// Calculation itself never fails; every variant originates from record
/// construction, call log parsing, file access or configuration.
#[derive(Error, Debug)]
pub enum BillError {
    // ==================== Record Errors ====================
    #[error("Invalid call record: start {start} is after end {end}")]
    InvalidRecord { start: String, end: String },

    #[error("Invalid phone number: {0}")]
    InvalidNumber(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // ==================== Call Log Errors ====================
    #[error("Malformed call log line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Failed to read call log {path}: {reason}")]
    LogRead { path: String, reason: String },

    // ==================== Internal Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BillError {
    /// Returns the error code for logs and machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            BillError::InvalidRecord { .. } => "invalid_record",
            BillError::InvalidNumber(_) => "invalid_number",
            BillError::Validation(_) => "validation_error",
            BillError::MalformedLine { .. } => "malformed_line",
            BillError::LogRead { .. } => "log_read_error",
            BillError::Config(_) => "config_error",
            BillError::Serialization(_) => "serialization_error",
            BillError::Internal(_) => "internal_error",
        }
    }

    /// Returns the process exit code (sysexits.h) for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // EX_DATAERR
            BillError::InvalidRecord { .. }
            | BillError::InvalidNumber(_)
            | BillError::Validation(_)
            | BillError::MalformedLine { .. } => 65,

            // EX_NOINPUT
            BillError::LogRead { .. } => 66,

            // EX_CONFIG
            BillError::Config(_) => 78,

            // EX_SOFTWARE
            BillError::Serialization(_) | BillError::Internal(_) => 70,
        }
    }

    /// Check if the error was caused by bad input data
    pub fn is_data_error(&self) -> bool {
        self.exit_code() == 65
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for BillError {
    fn from(err: serde_json::Error) -> Self {
        BillError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for BillError {
    fn from(err: config::ConfigError) -> Self {
        BillError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for BillError {
    fn from(err: validator::ValidationErrors) -> Self {
        BillError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(
            BillError::InvalidRecord {
                start: "2020-01-18 10:00:00".to_string(),
                end: "2020-01-18 09:00:00".to_string(),
            }
            .exit_code(),
            65
        );
        assert_eq!(
            BillError::LogRead {
                path: "calls.csv".to_string(),
                reason: "not found".to_string(),
            }
            .exit_code(),
            66
        );
        assert_eq!(BillError::Config("bad".to_string()).exit_code(), 78);
        assert_eq!(BillError::Internal("boom".to_string()).exit_code(), 70);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            BillError::MalformedLine {
                line: 3,
                reason: "expected 3 fields".to_string()
            }
            .error_code(),
            "malformed_line"
        );
        assert_eq!(
            BillError::InvalidNumber("12a456".to_string()).error_code(),
            "invalid_number"
        );
    }

    #[test]
    fn test_data_errors() {
        assert!(BillError::InvalidNumber("x".to_string()).is_data_error());
        assert!(!BillError::Config("x".to_string()).is_data_error());
    }

    #[test]
    fn test_malformed_line_message() {
        let err = BillError::MalformedLine {
            line: 2,
            reason: "expected 3 fields, found 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed call log line 2: expected 3 fields, found 1"
        );
    }
}
