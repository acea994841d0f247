use crate::error::{FlattenError, Result};
use crate::table::Table;
use tracing::trace;

/// The section headings currently open at each depth, outermost first.
///
/// Opening a heading at depth d closes everything deeper: a shallower
/// heading reappearing means any open deeper subsection has ended. The
/// stack is a plain local value scoped to one decode call, so concurrent
/// decodes of different tables never interfere.
#[derive(Debug, Default)]
pub struct AncestorStack {
    open: Vec<Option<String>>,
}

impl AncestorStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open depths.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Open `label` at `depth` (1-based), replacing that entry and
    /// discarding all deeper ones. A heading with a blank label still
    /// occupies its depth; rows it governs fail the completeness filter
    /// later.
    pub fn open_at(&mut self, depth: usize, label: Option<String>) {
        self.open.truncate(depth - 1);
        self.open.push(label);
    }

    /// Currently open labels, depth 1 first.
    pub fn open_labels(&self) -> &[Option<String>] {
        &self.open
    }
}

/// Per-row ancestor snapshots produced by the decode scan.
#[derive(Debug)]
pub struct LevelCells {
    /// Deepest marker observed anywhere in the table.
    pub max_depth: usize,
    /// One entry per input row, each `max_depth` long. Header rows stay
    /// all-blank; data rows hold the label open at each depth when the row
    /// was reached.
    pub rows: Vec<Vec<Option<String>>>,
}

/// Single forward pass over the table: header rows open stack entries, data
/// rows snapshot the stack into their level cells.
///
/// Fails fast with [`FlattenError::MarkerRunGap`] if `markers` breaks the
/// 1,2,…,k run invariant. [`depth_markers`](super::depth_markers) cannot
/// produce such a sequence, so a gap means the markers were corrupted
/// between encoding and decoding.
pub fn decode_hierarchy(table: &Table, markers: &[u32], label_col: usize) -> Result<LevelCells> {
    debug_assert_eq!(markers.len(), table.rows.len());

    let max_depth = markers.iter().copied().max().unwrap_or(0) as usize;
    let mut stack = AncestorStack::new();
    let mut prev = 0u32;
    let mut rows = Vec::with_capacity(table.rows.len());

    for (i, row) in table.rows.iter().enumerate() {
        let marker = markers[i];
        let mut cells = vec![None; max_depth];

        if marker == 0 {
            for (d, label) in stack.open_labels().iter().enumerate() {
                cells[d] = label.clone();
            }
        } else {
            let expected = prev + 1;
            if marker != expected {
                return Err(FlattenError::MarkerRunGap {
                    row: i,
                    expected,
                    found: marker,
                });
            }
            let label = row.get(label_col).cloned().flatten();
            trace!(row = i, depth = marker, label = ?label, "opening heading");
            stack.open_at(marker as usize, label);
        }

        prev = marker;
        rows.push(cells);
    }

    Ok(LevelCells { max_depth, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::depth_markers;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| {
                    r.iter()
                        .map(|c| {
                            if c.is_empty() {
                                None
                            } else {
                                Some(c.to_string())
                            }
                        })
                        .collect()
                })
                .collect(),
        }
    }

    fn labels(cells: &[Option<String>]) -> Vec<Option<&str>> {
        cells.iter().map(|c| c.as_deref()).collect()
    }

    #[test]
    fn nested_run_snapshots_all_open_depths() -> Result<()> {
        let t = table(
            &["Label", "Amount"],
            &[
                &["Revenue", ""],
                &["Products", ""],
                &["Widgets", "100"],
                &["Gadgets", "50"],
                &["Expenses", ""],
                &["Rent", "20"],
            ],
        );
        let markers = depth_markers(&t, 1);
        let levels = decode_hierarchy(&t, &markers, 0)?;

        assert_eq!(levels.max_depth, 2);
        assert_eq!(labels(&levels.rows[2]), vec![Some("Revenue"), Some("Products")]);
        assert_eq!(labels(&levels.rows[3]), vec![Some("Revenue"), Some("Products")]);
        // Rent sits under a depth-1 section with nothing open at depth 2.
        assert_eq!(labels(&levels.rows[5]), vec![Some("Expenses"), None]);
        // Header rows never receive a snapshot.
        assert_eq!(labels(&levels.rows[0]), vec![None, None]);
        assert_eq!(labels(&levels.rows[4]), vec![None, None]);
        Ok(())
    }

    #[test]
    fn shallow_heading_closes_deeper_ancestors() -> Result<()> {
        let t = table(
            &["Label", "Amount"],
            &[
                &["A", ""],
                &["B", ""],
                &["x", "1"],
                &["C", ""],
                &["y", "1"],
            ],
        );
        let markers = depth_markers(&t, 1);
        let levels = decode_hierarchy(&t, &markers, 0)?;

        assert_eq!(labels(&levels.rows[2]), vec![Some("A"), Some("B")]);
        // C reopens depth 1, so B must not leak onto y.
        assert_eq!(labels(&levels.rows[4]), vec![Some("C"), None]);
        Ok(())
    }

    #[test]
    fn later_heading_replaces_same_depth() -> Result<()> {
        let t = table(
            &["Label", "Amount"],
            &[&["A", ""], &["x", "1"], &["B", ""], &["y", "1"]],
        );
        let markers = depth_markers(&t, 1);
        let levels = decode_hierarchy(&t, &markers, 0)?;

        assert_eq!(labels(&levels.rows[1]), vec![Some("A")]);
        assert_eq!(labels(&levels.rows[3]), vec![Some("B")]);
        Ok(())
    }

    #[test]
    fn trailing_headings_never_snapshot() -> Result<()> {
        let t = table(
            &["Label", "Amount"],
            &[&["A", ""], &["x", "1"], &["B", ""]],
        );
        let markers = depth_markers(&t, 1);
        let levels = decode_hierarchy(&t, &markers, 0)?;
        assert_eq!(labels(&levels.rows[2]), vec![None]);
        Ok(())
    }

    #[test]
    fn marker_gap_fails_fast() {
        let t = table(
            &["Label", "Amount"],
            &[
                &["A", ""],
                &["B", ""],
                &["x", "1"],
                &["C", ""],
                &["y", "1"],
            ],
        );
        // A run restarting at 2 instead of 1 cannot come from the encoder.
        let err = decode_hierarchy(&t, &[1, 2, 0, 2, 0], 0).unwrap_err();
        assert!(matches!(
            err,
            FlattenError::MarkerRunGap {
                row: 3,
                expected: 1,
                found: 2
            }
        ));

        // A gap inside a run is equally fatal.
        let err = decode_hierarchy(&t, &[1, 3, 0, 1, 0], 0).unwrap_err();
        assert!(matches!(
            err,
            FlattenError::MarkerRunGap {
                row: 1,
                expected: 2,
                found: 3
            }
        ));
    }
}
