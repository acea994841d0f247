use thiserror::Error;

/// Failures surfaced by the cleaning and decoding pipeline.
///
/// Decoding is deterministic and side-effect-free, so none of these are
/// retried internally; they all propagate straight to the caller.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// A column the decoder requires is absent from the cleaned table.
    #[error("required column `{column}` is missing from the cleaned table")]
    MissingColumn { column: String },

    /// The depth-marker sequence broke the 1,2,…,k run invariant.
    /// Well-formed input cannot produce this; it signals corruption
    /// upstream of the decoder.
    #[error("depth marker run broken at row {row}: expected {expected}, found {found}")]
    MarkerRunGap {
        row: usize,
        expected: u32,
        found: u32,
    },

    /// No row of the export qualifies as the in-band header row.
    #[error("no header row found: no row has exactly one blank cell")]
    HeaderRowNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, FlattenError>;
