use crate::error::Result;
use crate::table::Table;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write `table` as CSV; blank cells become empty fields.
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `table` as a pretty-printed JSON array of row objects keyed by
/// column name, with a trailing newline; blank cells become `null`.
pub fn write_json<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|row| {
            let mut obj = Map::with_capacity(table.columns.len());
            for (name, cell) in table.columns.iter().zip(row) {
                let value = match cell {
                    Some(s) => Value::String(s.clone()),
                    None => Value::Null,
                };
                obj.insert(name.clone(), value);
            }
            Value::Object(obj)
        })
        .collect();

    let mut file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(&mut file, &rows)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("serializing JSON: {}", e)))?;
    file.write_all(b"\n")?;
    Ok(())
}
