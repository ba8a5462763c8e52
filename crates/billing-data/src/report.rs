//! The report dispatcher.
//!
//! Streams the source file row by row, routes each record to the product
//! handler named in its `Product` column and triggers summary generation
//! across every handler once the stream is exhausted.

use std::fs::File;
use std::io;
use std::path::Path;

use billing_core::error::{BillingError, Result};
use tracing::debug;

use crate::actions::ActionsProduct;
use crate::reader::RowView;
use crate::shared_storage::SharedStorageProduct;

/// Column whose value selects the product handler for a row.
pub const PRODUCT_COLUMN: &str = "Product";

/// Routes source rows to the product handlers and owns them for one run.
///
/// The handler set is closed and fixed at construction; dispatch is an
/// exhaustive match on the discriminator, so an unregistered value is a
/// typed error rather than a missing-key fault. Summary generation and
/// dumping always run in registration order: Actions, then Shared Storage.
#[derive(Debug, Default)]
pub struct Report {
    actions: ActionsProduct,
    shared_storage: SharedStorageProduct,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream the source file and fold every row into its handler.
    ///
    /// Rows are processed in file order; the first error aborts the whole
    /// run with no partial results, and the file handle is released on
    /// every exit path when the reader drops. After the last row, every
    /// handler generates its summaries whether or not it saw any rows.
    pub fn parse(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|source| BillingError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);
        let headers = reader.headers()?.clone();

        let mut rows = 0u64;
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |position| position.line());
            let row = RowView::new(&headers, &record, line);

            match row.get(PRODUCT_COLUMN)? {
                ActionsProduct::NAME => self.actions.parse_row(&row)?,
                SharedStorageProduct::NAME => self.shared_storage.parse_row(&row)?,
                unknown => {
                    return Err(BillingError::UnknownProduct {
                        product: unknown.to_string(),
                        line,
                    })
                }
            }
            rows += 1;
        }

        debug!("Processed {} rows from {}", rows, path.display());

        self.actions.generate_summaries();
        self.shared_storage.generate_summaries();
        Ok(())
    }

    /// Write every handler's report section in registration order.
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.actions.dump(out)?;
        self.shared_storage.dump(out)
    }

    /// The Actions handler and its aggregates.
    pub fn actions(&self) -> &ActionsProduct {
        &self.actions
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
