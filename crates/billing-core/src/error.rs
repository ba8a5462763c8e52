use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while parsing a billing export.
///
/// Every variant is fatal: the run aborts on the first error and no partial
/// report is produced.
#[derive(Error, Debug)]
pub enum BillingError {
    /// The source path does not exist on disk.
    #[error("Cannot access the file: {}", .path.display())]
    SourceMissing { path: PathBuf },

    /// The source path does not carry a `.csv` extension.
    #[error("File must be a CSV file: {}", .path.display())]
    NotCsv { path: PathBuf },

    /// A row's `Product` value matched no registered handler.
    #[error("Unknown product: {product} (line {line})")]
    UnknownProduct { product: String, line: u64 },

    /// A required column is absent from the header row.
    #[error("Missing column {column:?} (line {line})")]
    MissingColumn { column: String, line: u64 },

    /// A field that must be an integer did not parse as one.
    #[error("Invalid integer in {column:?} (line {line}): {value:?}")]
    InvalidInteger {
        column: String,
        value: String,
        line: u64,
    },

    /// A field that must be an exact decimal did not parse as one.
    #[error("Invalid decimal in {column:?} (line {line}): {value:?}")]
    InvalidDecimal {
        column: String,
        value: String,
        line: u64,
    },

    /// A field that must be a `YYYY-MM-DD` calendar date did not parse as one.
    #[error("Invalid date in {column:?} (line {line}): {value:?}")]
    InvalidDate {
        column: String,
        value: String,
        line: u64,
    },

    /// The source file could not be opened for reading.
    #[error("Failed to read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure itself is malformed (unbalanced quotes, bad UTF-8).
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Pass-through for raw I/O errors, e.g. while writing the report.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the billing crates.
pub type Result<T> = std::result::Result<T, BillingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_source_missing() {
        let err = BillingError::SourceMissing {
            path: PathBuf::from("/tmp/does-not-exist.csv"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot access the file: /tmp/does-not-exist.csv"
        );
    }

    #[test]
    fn test_error_display_not_csv() {
        let err = BillingError::NotCsv {
            path: PathBuf::from("report.json"),
        };
        assert_eq!(err.to_string(), "File must be a CSV file: report.json");
    }

    #[test]
    fn test_error_display_unknown_product() {
        let err = BillingError::UnknownProduct {
            product: "Packages".to_string(),
            line: 3,
        };
        assert_eq!(err.to_string(), "Unknown product: Packages (line 3)");
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = BillingError::MissingColumn {
            column: "Quantity".to_string(),
            line: 2,
        };
        assert_eq!(err.to_string(), "Missing column \"Quantity\" (line 2)");
    }

    #[test]
    fn test_error_display_invalid_integer() {
        let err = BillingError::InvalidInteger {
            column: "Quantity".to_string(),
            value: "lots".to_string(),
            line: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid integer"));
        assert!(msg.contains("\"Quantity\""));
        assert!(msg.contains("\"lots\""));
        assert!(msg.contains("line 5"));
    }

    #[test]
    fn test_error_display_invalid_date() {
        let err = BillingError::InvalidDate {
            column: "Date".to_string(),
            value: "2023-13-40".to_string(),
            line: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid date"));
        assert!(msg.contains("\"2023-13-40\""));
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = BillingError::FileRead {
            path: PathBuf::from("/some/export.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/export.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: BillingError = io_err.into();
        assert!(err.to_string().contains("pipe closed"));
    }
}
