//! The Shared Storage product handler.
//!
//! The export emits rows for this product but no aggregation is defined for
//! them yet, so every operation accepts its input and does nothing. The
//! handler exists so that Shared Storage rows route somewhere instead of
//! failing the run.

use std::io;

use billing_core::error::Result;

use crate::reader::RowView;

/// No-op handler for `Shared Storage` rows.
#[derive(Debug, Default)]
pub struct SharedStorageProduct;

impl SharedStorageProduct {
    /// Discriminator value that routes a row to this handler.
    pub const NAME: &'static str = "Shared Storage";

    pub fn new() -> Self {
        Self
    }

    /// Not parsing shared storage at this moment.
    pub fn parse_row(&mut self, _row: &RowView) -> Result<()> {
        Ok(())
    }

    /// Not generating totals for shared storage at this moment.
    pub fn generate_summaries(&mut self) {}

    /// Not dumping for shared storage at this moment.
    pub fn dump<W: io::Write>(&self, _out: &mut W) -> io::Result<()> {
        Ok(())
    }
}
