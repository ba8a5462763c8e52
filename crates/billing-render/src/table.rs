//! Plain-text table rendering for the billing report.
//!
//! Produces the aligned pipe-separated layout of the report dump: a date
//! range header, one summary table per group dimension and one run listing
//! per workflow. Everything writes to a caller-supplied [`io::Write`] so
//! tests can render into a byte buffer instead of stdout.

use std::io;

use billing_core::models::{GroupAggregate, ReportDateRange, UsageRecord};
use unicode_width::UnicodeWidthStr;

/// Width of every numeric column.
const STAT_WIDTH: usize = 10;

/// Column headers of the summary tables, in order.
const STAT_COLUMNS: [&str; 5] = ["Number", "Minutes", "Cost", "Average", "Slowest"];

/// Column headers of the per-workflow run tables, in order.
const RUN_COLUMNS: [&str; 2] = ["Minutes", "Cost"];

/// Left-align `text` in a field of `width` display columns.
///
/// Text wider than the field is emitted unclipped.
fn pad(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - current))
    }
}

/// One dash per display column of each header cell, pipe-separated.
fn dash_rule(header: &str) -> String {
    header
        .split('|')
        .map(|cell| "-".repeat(cell.width()))
        .collect::<Vec<_>>()
        .join("|")
}

/// Header line: the padded key label followed by the stat columns.
fn header_line(first: &str, columns: &[&str]) -> String {
    let mut header = first.to_string();
    for column in columns {
        header.push('|');
        header.push_str(&format!("{:<width$}", column, width = STAT_WIDTH));
    }
    header
}

/// Write `Report from {start} to {end}` followed by a blank line.
pub fn write_range_header<W: io::Write>(out: &mut W, range: &ReportDateRange) -> io::Result<()> {
    writeln!(out, "Report from {} to {}", range.start, range.end)?;
    write!(out, "\n\n")
}

/// Write one summary table: header, dashed rule, one row per group key in
/// iteration order, then a blank line.
///
/// `key_width` is the width of the key column — the widest name observed
/// across the whole report, so that all tables line up.
pub fn write_summary_table<'a, W, I>(
    out: &mut W,
    label: &str,
    key_width: usize,
    rows: I,
) -> io::Result<()>
where
    W: io::Write,
    I: Iterator<Item = (&'a str, &'a GroupAggregate)>,
{
    let header = header_line(&pad(label, key_width), &STAT_COLUMNS);
    writeln!(out, "{}", header)?;
    writeln!(out, "{}", dash_rule(&header))?;

    for (key, aggregate) in rows {
        writeln!(
            out,
            "{}|{:>width$}|{:>width$}|{:>width$}|{:>width$}|{:>width$}",
            pad(key, key_width),
            aggregate.number,
            aggregate.minutes,
            aggregate.cost,
            aggregate.average,
            aggregate.slowest,
            width = STAT_WIDTH,
        )?;
    }
    write!(out, "\n\n")
}

/// Write the chronological run listing of one workflow: header, dashed
/// rule, one row per record in source order, then a blank line.
///
/// The workflow name doubles as the key-column header; each row is keyed by
/// the record's date.
pub fn write_runs_table<W: io::Write>(
    out: &mut W,
    workflow: &str,
    key_width: usize,
    runs: &[UsageRecord],
) -> io::Result<()> {
    let header = header_line(&pad(workflow, key_width), &RUN_COLUMNS);
    writeln!(out, "{}", header)?;
    writeln!(out, "{}", dash_rule(&header))?;

    for run in runs {
        writeln!(
            out,
            "{}|{:>width$}|{:>width$}",
            pad(&run.date.to_string(), key_width),
            run.quantity,
            run.cost,
            width = STAT_WIDTH,
        )?;
    }
    write!(out, "\n\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
