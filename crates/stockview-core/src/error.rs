//! Error types for data operations.
//!
//! This module defines [`DataError`] which covers all error cases that can occur
//! when fetching, shaping, or exporting time series data.

use thiserror::Error;

/// Errors that can occur during data operations.
#[derive(Error, Debug)]
pub enum DataError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Error parsing a provider response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A field in a raw series point could not be parsed.
    #[error("Cannot parse {field} value {value:?} at {timestamp}")]
    FieldParse {
        /// Raw timestamp of the offending point.
        timestamp: String,
        /// Field name (or "timestamp").
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A raw series point lacks one of the OHLCV fields.
    #[error("Missing {field} field at {timestamp}")]
    MissingField {
        /// Raw timestamp of the offending point.
        timestamp: String,
        /// Name of the missing field.
        field: String,
    },

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error writing an export artifact.
    #[error("Export error: {0}")]
    Export(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_name_the_point() {
        let err = DataError::FieldParse {
            timestamp: "2024-03-15".to_string(),
            field: "close".to_string(),
            value: "N/A".to_string(),
        };
        assert_eq!(err.to_string(), r#"Cannot parse close value "N/A" at 2024-03-15"#);

        let err = DataError::MissingField {
            timestamp: "2024-03-15 16:00:00".to_string(),
            field: "volume".to_string(),
        };
        assert_eq!(err.to_string(), "Missing volume field at 2024-03-15 16:00:00");
    }

    #[test]
    fn test_io_errors_are_transparent() {
        let err: DataError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "gone");
    }
}
