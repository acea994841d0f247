//! Flatten hierarchically-indented accounting report exports into
//! denormalized tables.
//!
//! Sage-style exports express section nesting only through blank cells and
//! row order: a heading row leaves its figure columns blank, and deeper
//! headings stack up as consecutive blank-marker rows. This crate cleans
//! such an export ([`clean`]), reconstructs every data row's chain of
//! ancestor headings ([`decode`]) and writes the result back out
//! ([`write`]), one named column per retained nesting depth.
//!
//! ```
//! use sageflat::{decode, FlattenConfig, Table};
//!
//! let table = Table {
//!     columns: vec!["Label".into(), "Marker".into()],
//!     rows: vec![
//!         vec![Some("Income".into()), None],
//!         vec![Some("Sales".into()), Some("100".into())],
//!     ],
//! };
//! let cfg = FlattenConfig {
//!     levels: vec!["top".into()],
//!     ..Default::default()
//! };
//! let flat = decode::flatten(&table, &cfg).unwrap();
//! assert_eq!(flat.columns, vec!["top", "Label", "Marker"]);
//! assert_eq!(flat.rows[0][0].as_deref(), Some("Income"));
//! ```

pub mod clean;
pub mod config;
pub mod decode;
pub mod error;
pub mod table;
pub mod write;

pub use config::FlattenConfig;
pub use error::{FlattenError, Result};
pub use table::Table;
