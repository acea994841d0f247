use crate::decode::stack::LevelCells;
use crate::table::Table;
use tracing::warn;

/// Map the internal depths onto caller-supplied names and assemble the
/// caller-facing table.
///
/// `names` is ordered outermost first: `names[0]` names depth 1 and so on
/// inward. Depths beyond the supplied names are dropped from the result;
/// excess names are unused. After mapping, any row with a blank cell in any
/// retained column is removed. That takes out header rows (their marker
/// cell is blank) as well as data rows that lack an ancestor at a retained
/// depth or have blank metric cells.
pub fn project_levels(table: &Table, levels: &LevelCells, names: &[String]) -> Table {
    let retained = names.len().min(levels.max_depth);
    if levels.max_depth > names.len() {
        warn!(
            observed_depth = levels.max_depth,
            supplied_names = names.len(),
            "fewer level names than observed depths; dropping the deepest levels"
        );
    }

    let mut columns = Vec::with_capacity(retained + table.columns.len());
    columns.extend(names.iter().take(retained).cloned());
    columns.extend(table.columns.iter().cloned());
    let width = columns.len();

    let mut rows = Vec::new();
    for (cells, row) in levels.rows.iter().zip(&table.rows) {
        let mut out = Vec::with_capacity(width);
        out.extend(cells.iter().take(retained).cloned());
        out.extend(row.iter().cloned());
        out.resize(width, None);
        if out.iter().all(|c| c.is_some()) {
            rows.push(out);
        }
    }

    Table { columns, rows }
}
