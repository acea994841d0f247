//! Hierarchy reconstruction over a cleaned table.
//!
//! The export encodes section nesting with blank marker cells: a run of k
//! consecutive blank-marker rows is a heading chain at depths 1..k, and
//! every following data row belongs to whatever headings are still open.
//! Decoding is one forward scan with an explicit ancestor stack; no
//! lookahead, no reordering.

pub mod depth;
pub mod project;
pub mod stack;

pub use depth::depth_markers;
pub use project::project_levels;
pub use stack::{decode_hierarchy, AncestorStack, LevelCells};

use crate::clean::LABEL_COLUMN;
use crate::config::FlattenConfig;
use crate::error::{FlattenError, Result};
use crate::table::Table;
use tracing::{debug, instrument};

/// Decode one cleaned table: depth markers, ancestor scan, projection.
///
/// The label column must be named [`LABEL_COLUMN`]; the marker column is
/// `cfg.marker_column`, or the table's second column when unset. Either
/// being absent is a configuration error. An empty table decodes to an
/// empty result.
#[instrument(level = "info", skip(table, cfg), fields(rows = table.rows.len()))]
pub fn flatten(table: &Table, cfg: &FlattenConfig) -> Result<Table> {
    let label_col = table
        .column_index(LABEL_COLUMN)
        .ok_or_else(|| FlattenError::MissingColumn {
            column: LABEL_COLUMN.to_string(),
        })?;
    let marker_col = match &cfg.marker_column {
        Some(name) => table
            .column_index(name)
            .ok_or_else(|| FlattenError::MissingColumn {
                column: name.clone(),
            })?,
        None if table.columns.len() > 1 => 1,
        None => {
            return Err(FlattenError::MissingColumn {
                column: "marker".to_string(),
            })
        }
    };

    if table.is_empty() {
        debug!("empty cleaned table; nothing to decode");
        return Ok(Table::new(table.columns.clone()));
    }

    let markers = depth_markers(table, marker_col);
    let levels = decode_hierarchy(table, &markers, label_col)?;
    let result = project_levels(table, &levels, &cfg.levels);
    debug!(
        input_rows = table.rows.len(),
        output_rows = result.rows.len(),
        depth = levels.max_depth,
        "flattened table"
    );
    Ok(result)
}
