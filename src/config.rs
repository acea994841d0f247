use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-invocation settings for cleaning and decoding one export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Names for the retained ancestor columns, outermost section first.
    pub levels: Vec<String>,
    /// Rows whose label contains any of these substrings are dropped
    /// during cleaning.
    pub remove_rows: Vec<String>,
    /// Keep only the first N columns of the raw export; `None` keeps all.
    pub drop_col_index: Option<usize>,
    /// Substring identifying aggregate/subtotal rows to drop.
    pub aggregate_needle: String,
    /// Marker column name. `None` uses the cleaned table's second column,
    /// which is where these exports put their first figure column.
    pub marker_column: Option<String>,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            levels: vec!["top".to_string(), "lower".to_string()],
            remove_rows: Vec::new(),
            drop_col_index: None,
            aggregate_needle: "Total".to_string(),
            marker_column: None,
        }
    }
}

impl FlattenConfig {
    /// Load settings from a YAML file; absent fields keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Ok(serde_yaml::from_str(&text)?)
    }
}
