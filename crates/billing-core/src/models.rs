use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// One usage event from the billing export, after type conversion.
///
/// `cost` is fixed at ingestion time from the row's own price, multiplier and
/// quantity; it is never recomputed later. All monetary fields are exact
/// decimals so that summing many small costs cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Consumed units (minutes). Negative values are accepted as-is; the
    /// export format has historically never been validated on this axis.
    pub quantity: i64,
    /// Unit label, e.g. `"minute"`.
    pub unit_type: String,
    /// Rate multiplier applied to the base price.
    pub multiplier: Decimal,
    /// Base price per unit in US dollars.
    pub price_per_unit: Decimal,
    /// Account that owns the repository.
    pub owner: String,
    /// Repository slug the workflow ran in.
    pub repository: String,
    /// Workflow file path, e.g. `".github/workflows/ci.yml"`.
    pub workflow: String,
    /// Calendar date of the usage (no time-of-day in the export).
    pub date: NaiveDate,
    /// `price_per_unit` × `multiplier` × `quantity`, fixed at ingestion.
    pub cost: Decimal,
    /// Billing SKU, e.g. `"Compute - UBUNTU"`.
    pub sku: String,
}

impl UsageRecord {
    /// Exact cost of `quantity` units at `price_per_unit` × `multiplier`.
    ///
    /// The integer quantity is widened with [`Decimal::from`]; it never
    /// passes through binary floating point.
    pub fn compute_cost(price_per_unit: Decimal, multiplier: Decimal, quantity: i64) -> Decimal {
        price_per_unit * multiplier * Decimal::from(quantity)
    }
}

/// Running statistics for one group key (an owner, a repository or a
/// workflow).
///
/// The zero state has no records folded in: every counter at zero and both
/// decimals at exactly zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupAggregate {
    /// Number of records folded into this group.
    pub number: u64,
    /// Sum of quantities across the group.
    pub minutes: i64,
    /// Sum of record costs across the group.
    pub cost: Decimal,
    /// `minutes / number`, recomputed after every fold.
    pub average: Decimal,
    /// Maximum single quantity seen in the group.
    pub slowest: i64,
}

impl GroupAggregate {
    /// A fresh aggregate with nothing folded in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single record's quantity and cost into the running totals.
    pub fn fold(&mut self, record: &UsageRecord) {
        self.number += 1;
        self.slowest = self.slowest.max(record.quantity);
        self.minutes += record.quantity;
        self.average = Decimal::from(self.minutes) / Decimal::from(self.number);
        self.cost += record.cost;
    }
}

/// Span of calendar dates covered by the ingested records.
///
/// Starts at the sentinel pair (`NaiveDate::MAX`, `NaiveDate::MIN`) so that
/// the first observed date tightens both bounds. With no records the
/// sentinel pair is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for ReportDateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::MAX,
            end: NaiveDate::MIN,
        }
    }
}

impl ReportDateRange {
    /// Tighten the range to include `date`.
    pub fn observe(&mut self, date: NaiveDate) {
        self.start = self.start.min(date);
        self.end = self.end.max(date);
    }

    /// `true` while no date has been observed.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Running maximum display width of the three name columns.
///
/// Collected at parse time because a later row can always carry a longer
/// name than anything seen so far. Only the renderer consumes this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameWidthTracker {
    pub workflow: usize,
    pub repository: usize,
    pub owner: usize,
}

impl NameWidthTracker {
    /// Record the widths of one row's name fields.
    pub fn observe(&mut self, workflow: &str, repository: &str, owner: &str) {
        self.workflow = self.workflow.max(workflow.width());
        self.repository = self.repository.max(repository.width());
        self.owner = self.owner.max(owner.width());
    }

    /// The widest name seen across all three columns.
    pub fn widest(&self) -> usize {
        self.workflow.max(self.repository).max(self.owner)
    }
}
