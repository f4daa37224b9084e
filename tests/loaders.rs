//! File-backed loading: CSV, Parquet and JSON column-dicts through the
//! public API, plus the cast step that usually follows a CSV load.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use simpleframe::data::{convert, loader};
use simpleframe::{CastMap, Column, Error, Frame, Value};
use tempfile::tempdir;

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn csv_then_cast_with_missing_marker() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "co2.csv",
        "plant,conc,uptake\nQn1,95,16.0\nQn1,175,NA\nQn2,250,34.8\n",
    );

    let raw = Frame::read_csv(&path).unwrap();
    assert_eq!(raw.column_names(), vec!["plant", "conc", "uptake"]);
    assert_eq!(raw.value(1, "uptake").unwrap(), &Value::from("NA"));

    let casts = CastMap::new()
        .with("conc", convert::int)
        .with("uptake", convert::float);
    let typed = raw.cast(&casts, Some("NA")).unwrap();
    assert_eq!(typed.value(2, "conc").unwrap(), &Value::Integer(250));
    assert!(typed.value(1, "uptake").unwrap().is_null());
    assert_eq!(typed.value(0, "uptake").unwrap(), &Value::Float(16.0));
    assert_eq!(typed.value(0, "plant").unwrap(), &Value::from("Qn1"));
}

#[test]
fn zero_byte_csv_is_not_an_error() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "empty.csv", "");
    let f = Frame::read_csv(&path).unwrap();
    assert_eq!(f.width(), 0);
    assert_eq!(f.len(), 0);
}

#[test]
fn ragged_csv_keeps_shortest_record_width() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "ragged.csv", "a,b,c\n1,2,3\n4\n7,8,9\n");
    let f = Frame::read_csv(&path).unwrap();
    assert_eq!(f.column_names(), vec!["a"]);
    assert_eq!(f.column("a").unwrap(), &Column::from(vec!["1", "4", "7"]));
}

#[test]
fn missing_csv_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = Frame::read_csv(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn json_column_dict_preserves_key_order() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "t.json", r#"{"z": [1, 2], "a": ["x", null]}"#);
    let f = loader::load_file(&path).unwrap();
    assert_eq!(f.column_names(), vec!["z", "a"]);
    assert!(f.value(1, "a").unwrap().is_null());

    let json = serde_json::to_string(&f).unwrap();
    assert_eq!(json, r#"{"z":[1,2],"a":["x",null]}"#);
}

#[test]
fn json_with_mismatched_lengths_is_a_shape_error() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "bad.json", r#"{"a": [1, 2], "b": [1]}"#);
    let err = loader::read_json(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::ShapeMismatch { ref column, expected: 2, actual: 1 } if column == "b"
    ));
}

#[test]
fn json_must_be_an_object_of_arrays() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "list.json", "[1, 2]");
    assert!(matches!(
        loader::read_json(&path),
        Err(Error::InvalidColumnDict(_))
    ));
    let path = write(dir.path(), "scalar.json", r#"{"a": 1}"#);
    assert!(matches!(
        loader::read_json(&path),
        Err(Error::InvalidColumnDict(_))
    ));
}

#[test]
fn parquet_batches_are_concatenated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("score", DataType::Float64, true),
    ]));
    let batch = |ids: Vec<i64>, names: Vec<&str>, scores: Vec<Option<f64>>| {
        RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(ids)),
                Arc::new(StringArray::from(names)),
                Arc::new(Float64Array::from(scores)),
            ],
        )
        .unwrap()
    };

    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema.clone(), None).unwrap();
    writer
        .write(&batch(vec![1, 2], vec!["a", "b"], vec![Some(0.5), None]))
        .unwrap();
    writer.write(&batch(vec![3], vec!["c"], vec![Some(2.0)])).unwrap();
    writer.close().unwrap();

    let f = loader::load_file(&path).unwrap();
    let expected = Frame::from_columns([
        ("id", Column::from(vec![1, 2, 3])),
        ("name", Column::from(vec!["a", "b", "c"])),
        ("score", Column::from(vec![Some(0.5), None, Some(2.0)])),
    ])
    .unwrap();
    assert!(f.equals(&expected), "{f}");
}

#[test]
fn column_dict_round_trip_after_load() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "rt.csv", "x,y\n1,a\n2,b\n3,c\n");
    let f = Frame::read_csv(&path).unwrap();
    assert!(Frame::from_dict(f.to_dict()).unwrap().equals(&f));
}
