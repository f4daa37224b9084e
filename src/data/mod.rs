/// Data layer: cell values, columns, frames, and loading.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json        RecordBatch / other tables
///        │                               │
///        ▼                               ▼
///   ┌──────────┐                  ┌──────────────┐
///   │  loader   │                  │ DataTableLike │  column-dict export
///   └──────────┘                  └──────────────┘
///        │                               │
///        └───────────────┬───────────────┘
///                        ▼
///                 ┌────────────┐
///                 │   Frame     │  name → Column, 2-D indexing, cast
///                 └────────────┘
///                        │
///                        ▼
///                 ┌────────────┐
///                 │   Column    │  Vec<Value>, gather / slice
///                 └────────────┘
/// ```

pub mod column;
pub mod convert;
pub mod error;
pub mod frame;
pub mod loader;
pub mod selector;
pub mod table;
pub mod value;
