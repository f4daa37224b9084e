use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type, UInt8Type,
    UInt16Type, UInt32Type,
};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;

use super::frame::{ColumnDict, Frame};
use super::value::Value;

// ---------------------------------------------------------------------------
// DataTableLike – the one interface external tables must provide
// ---------------------------------------------------------------------------

/// Capability shared by every table type the data layer can consume.
///
/// Adapters for external tables implement the two export methods; the core
/// never depends on the concrete type behind them.
pub trait DataTableLike {
    /// Column names in table order.
    fn column_names(&self) -> Vec<String>;

    /// Ordered mapping of column name to plain values.
    fn to_column_dict(&self) -> ColumnDict;

    /// Downcast hook so frames can be recognised behind the trait object.
    fn as_frame(&self) -> Option<&Frame> {
        None
    }
}

impl DataTableLike for Frame {
    fn column_names(&self) -> Vec<String> {
        Frame::column_names(self)
    }

    fn to_column_dict(&self) -> ColumnDict {
        self.to_dict()
    }

    fn as_frame(&self) -> Option<&Frame> {
        Some(self)
    }
}

impl DataTableLike for ColumnDict {
    fn column_names(&self) -> Vec<String> {
        self.names()
    }

    fn to_column_dict(&self) -> ColumnDict {
        self.clone()
    }
}

// ---------------------------------------------------------------------------
// Arrow adapter
// ---------------------------------------------------------------------------

impl DataTableLike for RecordBatch {
    fn column_names(&self) -> Vec<String> {
        self.schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    fn to_column_dict(&self) -> ColumnDict {
        let schema = self.schema();
        schema
            .fields()
            .iter()
            .zip(self.columns())
            .map(|(field, col)| (field.name().clone(), arrow_values(col)))
            .collect()
    }
}

/// Convert every row of an Arrow array into [`Value`]s.
pub fn arrow_values(col: &ArrayRef) -> Vec<Value> {
    (0..col.len()).map(|row| arrow_value(col, row)).collect()
}

/// Extract a single value from an Arrow column at a given row.
pub fn arrow_value(col: &ArrayRef, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Value::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => Value::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => Value::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => Value::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Value::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Value::Integer(col.as_primitive::<UInt8Type>().value(row) as i64),
        DataType::UInt16 => Value::Integer(col.as_primitive::<UInt16Type>().value(row) as i64),
        DataType::UInt32 => Value::Integer(col.as_primitive::<UInt32Type>().value(row) as i64),
        DataType::Float32 => Value::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Value::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Value::Bool(col.as_boolean().value(row)),
        DataType::Date32 | DataType::Date64 => match array_value_to_string(col, row) {
            Ok(s) => Value::Date(s),
            Err(_) => Value::Null,
        },
        other => match array_value_to_string(col, row) {
            Ok(s) => Value::String(s),
            Err(_) => Value::String(format!("{other:?}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};

    use super::*;
    use crate::data::column::Column;

    fn batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
            Field::new("score", DataType::Float64, false),
            Field::new("ok", DataType::Boolean, false),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec![Some("a"), None])),
                Arc::new(Float64Array::from(vec![0.5, 1.5])),
                Arc::new(BooleanArray::from(vec![true, false])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn record_batch_exports_column_dict() {
        let b = batch();
        assert_eq!(DataTableLike::column_names(&b), vec!["id", "name", "score", "ok"]);

        let dict = b.to_column_dict();
        assert_eq!(dict.get("id").unwrap(), &[Value::Integer(1), Value::Integer(2)]);
        assert_eq!(dict.get("name").unwrap(), &[Value::from("a"), Value::Null]);
        assert_eq!(dict.get("ok").unwrap(), &[Value::Bool(true), Value::Bool(false)]);
    }

    #[test]
    fn frame_from_record_batch() {
        let f = Frame::from_table(&batch()).unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f.value(1, "score").unwrap(), &Value::Float(1.5));
    }

    #[test]
    fn equals_table_rejects_non_frames() {
        let f = Frame::from_columns([("x", Column::from(vec![1]))]).unwrap();
        let dict = f.to_dict();
        assert!(!f.equals_table(&dict));
        assert!(f.equals_table(&f.clone()));
        assert!(Frame::from_table(&dict).unwrap().equals(&f));
    }
}
