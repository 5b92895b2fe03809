use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading, analysing and reporting a roster.
#[derive(Error, Debug)]
pub enum StatsError {
    /// The roster file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A data row has a different number of fields than the header row.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    RowLength {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A `Level` cell is not an integer.
    #[error("Line {line}: invalid level {value:?}")]
    InvalidLevel { line: u64, value: String },

    /// A grouping column name does not belong to the roster schema.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The JSON report could not be serialised.
    #[error("Failed to serialise JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the hxc crates.
pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StatsError::FileRead {
            path: PathBuf::from("/some/roster.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/roster.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = StatsError::MissingColumn("Cause of Death".to_string());
        assert_eq!(err.to_string(), "Missing required column: Cause of Death");
    }

    #[test]
    fn test_error_display_row_length() {
        let err = StatsError::RowLength {
            line: 4,
            expected: 5,
            found: 3,
        };
        assert_eq!(err.to_string(), "Line 4: expected 5 fields, found 3");
    }

    #[test]
    fn test_error_display_invalid_level() {
        let err = StatsError::InvalidLevel {
            line: 2,
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "Line 2: invalid level \"ten\"");
    }

    #[test]
    fn test_error_display_unknown_column() {
        let err = StatsError::UnknownColumn("Alignment".to_string());
        assert_eq!(err.to_string(), "Unknown column: Alignment");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: StatsError = io_err.into();
        assert!(err.to_string().contains("pipe closed"));
    }
}
