use thiserror::Error;

/// Errors raised by the data layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Construction-time column length mismatch.
    #[error("Columns are length {expected}, but `{column}` is length {actual}")]
    ShapeMismatch {
        expected: usize,
        column: String,
        actual: usize,
    },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Index out of bounds: index {index}, size {len}")]
    IndexOutOfBounds { index: isize, len: usize },

    /// A selector of the wrong shape for the axis it was used on.
    #[error("Unsupported selector: {0}")]
    Selector(String),

    #[error("Slice step cannot be zero")]
    InvalidSlice,

    /// Broadcasting a scalar needs a row count, which a frame without
    /// columns does not have.
    #[error("Cannot broadcast scalar into column `{0}` of a frame with no columns")]
    EmptyBroadcast(String),

    /// A `cast` converter rejected a value. Carried through untouched.
    #[error(transparent)]
    Convert(anyhow::Error),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Invalid column-dict JSON: {0}")]
    InvalidColumnDict(String),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("Arrow error")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error")]
    Parquet(#[from] parquet::errors::ParquetError),
}

pub type Result<T> = std::result::Result<T, Error>;
