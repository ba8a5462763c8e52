//! The Actions product handler: accumulation and summarisation.
//!
//! Rows are accumulated per workflow during the streaming parse; the three
//! summary tables (owner, repository, workflow) are derived afterwards in a
//! single fold over the retained records.

use std::io;

use billing_core::error::Result;
use billing_core::models::{GroupAggregate, NameWidthTracker, ReportDateRange, UsageRecord};
use billing_core::ordered::OrderedMap;
use billing_render::table;
use tracing::debug;

use crate::reader::RowView;

/// Aggregation state for the `Actions` product.
#[derive(Debug, Default)]
pub struct ActionsProduct {
    /// Raw records grouped by workflow, in source order within each group.
    /// The only place raw rows are retained; every table below is derived.
    runs: OrderedMap<Vec<UsageRecord>>,
    owners: OrderedMap<GroupAggregate>,
    repos: OrderedMap<GroupAggregate>,
    workflows: OrderedMap<GroupAggregate>,
    widths: NameWidthTracker,
    dates: ReportDateRange,
}

impl ActionsProduct {
    /// Discriminator value that routes a row to this handler.
    pub const NAME: &'static str = "Actions";

    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one source row and append it to its workflow's run list.
    ///
    /// All field conversions happen before any state is touched, so a
    /// malformed row leaves the handler exactly as it was.
    pub fn parse_row(&mut self, row: &RowView) -> Result<()> {
        let quantity = row.integer("Quantity")?;
        let multiplier = row.decimal("Multiplier")?;
        let price_per_unit = row.decimal("Price Per Unit ($)")?;
        let date = row.date("Date")?;

        let record = UsageRecord {
            quantity,
            unit_type: row.get("Unit Type")?.to_string(),
            multiplier,
            price_per_unit,
            owner: row.get("Owner")?.to_string(),
            repository: row.get("Repository Slug")?.to_string(),
            workflow: row.get("Actions Workflow")?.to_string(),
            date,
            cost: UsageRecord::compute_cost(price_per_unit, multiplier, quantity),
            sku: row.get("SKU")?.to_string(),
        };

        self.widths
            .observe(&record.workflow, &record.repository, &record.owner);
        self.dates.observe(record.date);

        let workflow = record.workflow.clone();
        self.runs.or_insert_with(&workflow, Vec::new).push(record);
        Ok(())
    }

    /// Derive the owner, repository and workflow tables from the stored runs.
    ///
    /// Recomputes from scratch into fresh accumulators on every call, so
    /// invoking it again cannot double-count. One pass over every record,
    /// in workflow first-insertion order and source order within each
    /// workflow; the three tables are updated independently per record.
    pub fn generate_summaries(&mut self) {
        self.owners.clear();
        self.repos.clear();
        self.workflows.clear();

        let Self {
            runs,
            owners,
            repos,
            workflows,
            ..
        } = self;

        for (workflow, records) in runs.iter() {
            let workflow_aggregate = workflows.or_insert_with(workflow, GroupAggregate::new);
            for record in records {
                workflow_aggregate.fold(record);
                repos
                    .or_insert_with(&record.repository, GroupAggregate::new)
                    .fold(record);
                owners
                    .or_insert_with(&record.owner, GroupAggregate::new)
                    .fold(record);
            }
        }

        debug!(
            "Summarised {} workflows, {} repositories, {} owners",
            self.workflows.len(),
            self.repos.len(),
            self.owners.len()
        );
    }

    /// Write the full Actions section of the report.
    ///
    /// In order: the date-range header, the Owner, Repository and Workflow
    /// summary tables (keys in first-insertion order), then one run listing
    /// per workflow in first-insertion order.
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        let width = self.widths.widest();

        table::write_range_header(out, &self.dates)?;
        table::write_summary_table(out, "Owner", width, self.owners.iter())?;
        table::write_summary_table(out, "Repository", width, self.repos.iter())?;
        table::write_summary_table(out, "Workflow", width, self.workflows.iter())?;

        for (workflow, runs) in self.runs.iter() {
            table::write_runs_table(out, workflow, width, runs)?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn runs(&self) -> &OrderedMap<Vec<UsageRecord>> {
        &self.runs
    }

    pub fn owners(&self) -> &OrderedMap<GroupAggregate> {
        &self.owners
    }

    pub fn repos(&self) -> &OrderedMap<GroupAggregate> {
        &self.repos
    }

    pub fn workflows(&self) -> &OrderedMap<GroupAggregate> {
        &self.workflows
    }

    pub fn dates(&self) -> &ReportDateRange {
        &self.dates
    }

    pub fn widths(&self) -> &NameWidthTracker {
        &self.widths
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
