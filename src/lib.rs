//! A small columnar table container.
//!
//! [`Frame`] holds named [`Column`]s of equal length and supports 2-D
//! indexing, casting, CSV / Parquet / JSON loading and export to the
//! column-dict interchange shape.

pub mod data;

pub use data::column::{Column, ColumnType};
pub use data::convert::CastMap;
pub use data::error::{Error, Result};
pub use data::frame::{ColumnDict, ColumnValue, Frame, Selection};
pub use data::selector::{Index, Label, Selector, Slice};
pub use data::table::DataTableLike;
pub use data::value::Value;
