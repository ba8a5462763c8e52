//! Source verification and CSV row access.
//!
//! Checks the billing-file preconditions before any parsing begins and
//! exposes a header-aware view of one CSV record with the typed field
//! conversions the product handlers rely on.

use std::path::PathBuf;

use billing_core::error::{BillingError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

// ── Source verification ───────────────────────────────────────────────────────

/// Check the source path preconditions and return the path to open.
///
/// A leading `~` is expanded to the home directory first. The path must
/// exist and must carry a `.csv` extension; either failure aborts the run
/// before a single row is read.
pub fn verify_source(filename: &str) -> Result<PathBuf> {
    let path = expand_user(filename);
    if !path.exists() {
        return Err(BillingError::SourceMissing { path });
    }
    if path.extension().map_or(true, |ext| ext != "csv") {
        return Err(BillingError::NotCsv { path });
    }
    Ok(path)
}

/// Expand a leading `~` or `~/` component to the user's home directory.
fn expand_user(filename: &str) -> PathBuf {
    if filename == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = filename.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(filename)
}

// ── Row access ────────────────────────────────────────────────────────────────

/// Borrowed view of one CSV record: the header row, the record itself and
/// the 1-based source line it came from.
///
/// `get` returns column values verbatim; the typed accessors perform the
/// only conversions the format defines. Nothing else is validated —
/// negative quantities and zero or negative prices pass through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    headers: &'a csv::StringRecord,
    record: &'a csv::StringRecord,
    line: u64,
}

impl<'a> RowView<'a> {
    pub fn new(headers: &'a csv::StringRecord, record: &'a csv::StringRecord, line: u64) -> Self {
        Self {
            headers,
            record,
            line,
        }
    }

    /// The 1-based line of the source file this row came from.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// The verbatim string value under `column`.
    pub fn get(&self, column: &str) -> Result<&'a str> {
        self.headers
            .iter()
            .position(|header| header == column)
            .and_then(|index| self.record.get(index))
            .ok_or_else(|| BillingError::MissingColumn {
                column: column.to_string(),
                line: self.line,
            })
    }

    /// The value under `column` parsed as an integer.
    pub fn integer(&self, column: &str) -> Result<i64> {
        let value = self.get(column)?;
        value
            .parse()
            .map_err(|_| BillingError::InvalidInteger {
                column: column.to_string(),
                value: value.to_string(),
                line: self.line,
            })
    }

    /// The value under `column` parsed as an exact decimal.
    ///
    /// Parsing goes straight from the string to [`Decimal`]; there is no
    /// binary floating point intermediate to lose precision in.
    pub fn decimal(&self, column: &str) -> Result<Decimal> {
        let value = self.get(column)?;
        value
            .parse()
            .map_err(|_| BillingError::InvalidDecimal {
                column: column.to_string(),
                value: value.to_string(),
                line: self.line,
            })
    }

    /// The value under `column` parsed as a `YYYY-MM-DD` calendar date.
    ///
    /// Rejects both malformed strings and well-formed strings with
    /// out-of-range components, e.g. `"2023-13-40"`.
    pub fn date(&self, column: &str) -> Result<NaiveDate> {
        let value = self.get(column)?;
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| BillingError::InvalidDate {
            column: column.to_string(),
            value: value.to_string(),
            line: self.line,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── verify_source ─────────────────────────────────────────────────────

    #[test]
    fn test_verify_source_accepts_existing_csv() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("export.csv");
        std::fs::write(&path, "Product\n").expect("write fixture");

        let verified = verify_source(path.to_str().unwrap()).expect("should verify");
        assert_eq!(verified, path);
    }

    #[test]
    fn test_verify_source_rejects_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("does-not-exist.csv");

        let err = verify_source(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, BillingError::SourceMissing { .. }));
    }

    #[test]
    fn test_verify_source_rejects_wrong_extension() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("export.json");
        std::fs::write(&path, "{}").expect("write fixture");

        let err = verify_source(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, BillingError::NotCsv { .. }));
    }

    #[test]
    fn test_verify_source_rejects_extensionless_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("export");
        std::fs::write(&path, "Product\n").expect("write fixture");

        let err = verify_source(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, BillingError::NotCsv { .. }));
    }

    #[test]
    fn test_verify_source_expands_tilde() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("export.csv"), "Product\n").expect("write fixture");

        // Point HOME at the temp dir so "~/export.csv" resolves into it.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = verify_source("~/export.csv");

        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        let verified = result.expect("tilde path should verify");
        assert_eq!(verified, tmp.path().join("export.csv"));
    }

    // ── RowView ───────────────────────────────────────────────────────────

    fn headers() -> csv::StringRecord {
        csv::StringRecord::from(vec!["Product", "Quantity", "Multiplier", "Date"])
    }

    #[test]
    fn test_row_view_get_verbatim() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "34", "1.0", "2023-01-24"]);
        let row = RowView::new(&headers, &record, 2);

        assert_eq!(row.get("Product").unwrap(), "Actions");
        assert_eq!(row.line(), 2);
    }

    #[test]
    fn test_row_view_missing_column() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "34", "1.0", "2023-01-24"]);
        let row = RowView::new(&headers, &record, 2);

        let err = row.get("Owner").unwrap_err();
        assert!(matches!(
            err,
            BillingError::MissingColumn { ref column, line: 2 } if column == "Owner"
        ));
    }

    #[test]
    fn test_row_view_integer() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "34", "1.0", "2023-01-24"]);
        let row = RowView::new(&headers, &record, 2);

        assert_eq!(row.integer("Quantity").unwrap(), 34);
    }

    #[test]
    fn test_row_view_integer_accepts_negative() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "-3", "1.0", "2023-01-24"]);
        let row = RowView::new(&headers, &record, 2);

        assert_eq!(row.integer("Quantity").unwrap(), -3);
    }

    #[test]
    fn test_row_view_integer_rejects_garbage() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "lots", "1.0", "2023-01-24"]);
        let row = RowView::new(&headers, &record, 7);

        let err = row.integer("Quantity").unwrap_err();
        assert!(matches!(
            err,
            BillingError::InvalidInteger { ref value, line: 7, .. } if value == "lots"
        ));
    }

    #[test]
    fn test_row_view_decimal_exact() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "34", "0.008", "2023-01-24"]);
        let row = RowView::new(&headers, &record, 2);

        assert_eq!(row.decimal("Multiplier").unwrap(), "0.008".parse().unwrap());
    }

    #[test]
    fn test_row_view_decimal_rejects_garbage() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "34", "cheap", "2023-01-24"]);
        let row = RowView::new(&headers, &record, 3);

        let err = row.decimal("Multiplier").unwrap_err();
        assert!(matches!(err, BillingError::InvalidDecimal { line: 3, .. }));
    }

    #[test]
    fn test_row_view_date() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "34", "1.0", "2023-01-24"]);
        let row = RowView::new(&headers, &record, 2);

        assert_eq!(
            row.date("Date").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 24).unwrap()
        );
    }

    #[test]
    fn test_row_view_date_rejects_out_of_range_components() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "34", "1.0", "2023-13-40"]);
        let row = RowView::new(&headers, &record, 4);

        let err = row.date("Date").unwrap_err();
        assert!(matches!(
            err,
            BillingError::InvalidDate { ref value, line: 4, .. } if value == "2023-13-40"
        ));
    }

    #[test]
    fn test_row_view_date_rejects_malformed_string() {
        let headers = headers();
        let record = csv::StringRecord::from(vec!["Actions", "34", "1.0", "January 24th"]);
        let row = RowView::new(&headers, &record, 4);

        assert!(row.date("Date").is_err());
    }
}
