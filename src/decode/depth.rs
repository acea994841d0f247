use crate::table::Table;

/// Depth marker for every row: 0 for a data row (marker cell present); for
/// a header row, its 1-based position within the current run of
/// blank-marker rows. The run counter resets after every data row, so each
/// run's markers are exactly 1,2,…,k.
pub fn depth_markers(table: &Table, marker_col: usize) -> Vec<u32> {
    let mut run = 0u32;
    table
        .rows
        .iter()
        .map(|row| match row.get(marker_col).and_then(|c| c.as_deref()) {
            Some(_) => {
                run = 0;
                0
            }
            None => {
                run += 1;
                run
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn flat_run() {
        let t = table(
            &["Label", "Amount"],
            &[
                &["Income", ""],
                &["Sales", "100"],
                &["Services", "50"],
                &["Expenses", ""],
                &["Rent", "20"],
            ],
        );
        assert_eq!(depth_markers(&t, 1), vec![1, 0, 0, 1, 0]);
    }

    #[test]
    fn nested_run_counts_up() {
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
        assert_eq!(depth_markers(&t, 1), vec![1, 2, 0, 0, 1, 0]);
    }

    #[test]
    fn counter_resets_after_every_data_row() {
        let t = table(
            &["Label", "Amount"],
            &[
                &["A", ""],
                &["B", ""],
                &["C", ""],
                &["x", "1"],
                &["D", ""],
                &["y", "2"],
                &["z", "3"],
            ],
        );
        assert_eq!(depth_markers(&t, 1), vec![1, 2, 3, 0, 1, 0, 0]);
    }

    #[test]
    fn short_rows_count_as_blank() {
        let mut t = table(&["Label", "Amount"], &[&["Only label", ""]]);
        t.rows[0].truncate(1);
        assert_eq!(depth_markers(&t, 1), vec![1]);
    }
}
