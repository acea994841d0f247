//! Preprocessing: turn a raw report export into the cleaned table the
//! decoder consumes.
//!
//! Sage-style exports arrive as loosely structured CSV: a preamble of title
//! rows, the real column names carried in-band on the first row with exactly
//! one blank cell, subtotal rows mixed into the data, and unrelated trailing
//! columns. Cleaning strips all of that while preserving row order, which is
//! what encodes the section nesting.

use crate::config::FlattenConfig;
use crate::error::{FlattenError, Result};
use crate::table::Table;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, instrument};

/// Name given to the label column during header promotion. The export
/// leaves the heading above its label column blank, so the name cannot
/// come from the file.
pub const LABEL_COLUMN: &str = "Label";

/// Trim whitespace; an empty cell is missing.
pub(crate) fn clean_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read a raw export into a grid. Records may be ragged; rows are padded to
/// the widest record and columns get placeholder names until header
/// promotion.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let file = File::open(path.as_ref())?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    let mut width = 0usize;
    for result in rdr.records() {
        let record = result?;
        let row: Vec<Option<String>> = record.iter().map(clean_cell).collect();
        width = width.max(row.len());
        rows.push(row);
    }
    for row in &mut rows {
        row.resize(width, None);
    }

    debug!(rows = rows.len(), columns = width, "loaded export");
    Ok(Table {
        columns: (0..width).map(|i| format!("column_{i}")).collect(),
        rows,
    })
}

/// Full preprocessing pass over a freshly loaded export.
#[instrument(level = "debug", skip(table, cfg), fields(rows = table.rows.len()))]
pub fn prepare(mut table: Table, cfg: &FlattenConfig) -> Result<Table> {
    if let Some(keep) = cfg.drop_col_index {
        truncate_columns(&mut table, keep);
    }
    promote_header_row(&mut table)?;
    drop_aggregate_rows(&mut table, &cfg.aggregate_needle);
    if !cfg.remove_rows.is_empty() {
        drop_excluded_rows(&mut table, &cfg.remove_rows);
    }
    debug!(rows = table.rows.len(), "cleaned export");
    Ok(table)
}

/// Keep only the first `keep` columns; exports carry unrelated trailing
/// columns past the figures of interest.
pub fn truncate_columns(table: &mut Table, keep: usize) {
    if keep >= table.columns.len() {
        return;
    }
    table.columns.truncate(keep);
    for row in &mut table.rows {
        row.truncate(keep);
    }
}

/// Adopt the in-band header row: the first row where every cell but one is
/// filled. Its cells become the column names, the first column is renamed
/// [`LABEL_COLUMN`], and the preamble up to and including that row is
/// removed.
pub fn promote_header_row(table: &mut Table) -> Result<()> {
    let want = table.columns.len().saturating_sub(1);
    let header_at = table
        .rows
        .iter()
        .position(|row| row.iter().filter(|c| c.is_some()).count() == want && !row.is_empty())
        .ok_or(FlattenError::HeaderRowNotFound)?;

    table.columns = table.rows[header_at]
        .iter()
        .enumerate()
        .map(|(i, cell)| match (i, cell) {
            (0, _) => LABEL_COLUMN.to_string(),
            (_, Some(name)) => name.clone(),
            (_, None) => format!("column_{i}"),
        })
        .collect();
    table.rows.drain(..=header_at);
    Ok(())
}

/// Drop subtotal/aggregate rows, identified by `needle` appearing in the
/// label.
pub fn drop_aggregate_rows(table: &mut Table, needle: &str) {
    drop_rows_matching(table, std::slice::from_ref(&needle));
}

/// Drop rows the caller asked to exclude, by label substring.
pub fn drop_excluded_rows(table: &mut Table, needles: &[String]) {
    let refs: Vec<&str> = needles.iter().map(String::as_str).collect();
    drop_rows_matching(table, &refs);
}

fn drop_rows_matching(table: &mut Table, needles: &[&str]) {
    let before = table.rows.len();
    table.rows.retain(|row| {
        match row.first().and_then(|c| c.as_deref()) {
            Some(label) => !needles.iter().any(|n| label.contains(n)),
            // Blank labels are header-run rows; they are never excluded here.
            None => true,
        }
    });
    let dropped = before - table.rows.len();
    if dropped > 0 {
        debug!(dropped, needles = ?needles, "dropped rows by label match");
    }
}
