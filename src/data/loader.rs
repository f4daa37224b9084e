use std::fs::File;
use std::io::Read;
use std::path::Path;

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{Error, Result};
use super::frame::Frame;
use super::table::arrow_values;
use super::value::Value;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a frame from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus records, every value kept as text
/// * `.parquet` – any flat schema; Arrow scalars map onto [`Value`]
/// * `.json`    – a column-dict object: `{ "name": [values...], ... }`
pub fn load_file(path: &Path) -> Result<Frame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(path),
        "parquet" | "pq" => read_parquet(path),
        "json" => read_json(path),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV file whose first record holds the column names.
pub fn read_csv(path: &Path) -> Result<Frame> {
    log::debug!("reading CSV {}", path.display());
    read_csv_from(File::open(path)?)
}

/// Read CSV text from any reader.
///
/// Records are transposed into columns shortest-first: when a record has
/// fewer fields than the header, the trailing columns are dropped for the
/// whole frame rather than padded. Extra fields beyond the header are
/// ignored. A source with no records at all, or only a header, yields a
/// frame with no columns. A blank line is a record with no fields, so it
/// also leaves no columns.
pub fn read_csv_from<R: Read>(mut source: R) -> Result<Frame> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;
    if has_blank_record(&text) {
        log::warn!("CSV contains a blank line: no columns kept");
        return Ok(Frame::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Ok(Frame::new()),
    };
    let rows = records.collect::<std::result::Result<Vec<_>, _>>()?;

    let width = rows
        .iter()
        .map(|r| r.len())
        .min()
        .map_or(0, |w| w.min(header.len()));
    if !rows.is_empty() && width < header.len() {
        log::warn!(
            "ragged CSV: keeping {width} of {} columns (shortest record has {width} fields)",
            header.len()
        );
    }

    let columns = header.into_iter().take(width).enumerate().map(|(i, name)| {
        let values: Vec<Value> = rows
            .iter()
            .map(|r| Value::String(r[i].to_string()))
            .collect();
        (name, values)
    });
    Frame::from_columns(columns)
}

/// True when some line outside a quoted field is empty. The `csv` reader
/// silently skips such lines, so they are detected up front.
fn has_blank_record(text: &str) -> bool {
    let mut in_quotes = false;
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        if lines.peek().is_none() {
            // Text after the final newline (or the whole source) is not a line.
            break;
        }
        if !in_quotes && (line.is_empty() || line == "\r") {
            return true;
        }
        if line.matches('"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }
    false
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (column-oriented, key order preserved):
///
/// ```json
/// { "x": [1, 2, 3], "y": ["a", "b", null] }
/// ```
pub fn read_json(path: &Path) -> Result<Frame> {
    log::debug!("reading JSON {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let obj = root
        .as_object()
        .ok_or_else(|| Error::InvalidColumnDict("expected top-level JSON object".into()))?;

    let mut columns = Vec::with_capacity(obj.len());
    for (name, val) in obj {
        let arr = val.as_array().ok_or_else(|| {
            Error::InvalidColumnDict(format!("column `{name}` is not an array"))
        })?;
        let values: Vec<Value> = arr.iter().map(Value::from).collect();
        columns.push((name.clone(), values));
    }
    Frame::from_columns(columns)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file, concatenating every record batch.
///
/// Nulls become [`Value::Null`]; types without a direct mapping are kept as
/// their Arrow display text.
pub fn read_parquet(path: &Path) -> Result<Frame> {
    log::debug!("reading parquet {}", path.display());
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
    for batch_result in reader {
        let batch = batch_result?;
        for (out, col) in columns.iter_mut().zip(batch.columns()) {
            out.extend(arrow_values(col));
        }
    }
    Frame::from_columns(names.into_iter().zip(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(text: &str) -> Frame {
        read_csv_from(text.as_bytes()).unwrap()
    }

    #[test]
    fn values_stay_text() {
        let f = csv("a,b\n1,x\n2,y\n");
        assert_eq!(f.column_names(), vec!["a", "b"]);
        assert_eq!(f.value(0, "a").unwrap(), &Value::from("1"));
        assert_eq!(f.value(1, "b").unwrap(), &Value::from("y"));
    }

    #[test]
    fn empty_source_has_no_columns() {
        assert_eq!(csv("").width(), 0);
    }

    #[test]
    fn header_only_has_no_columns() {
        // Nothing to transpose, so no columns survive.
        assert_eq!(csv("a,b\n").width(), 0);
    }

    #[test]
    fn short_record_drops_trailing_columns() {
        let f = csv("a,b,c\n1,2,3\n4,5\n");
        assert_eq!(f.column_names(), vec!["a", "b"]);
        assert_eq!(f.len(), 2);
        assert_eq!(f.value(1, "b").unwrap(), &Value::from("5"));
    }

    #[test]
    fn long_record_extra_fields_ignored() {
        let f = csv("a\n1,extra\n2\n");
        assert_eq!(f.column_names(), vec!["a"]);
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn blank_line_leaves_no_columns() {
        assert_eq!(csv("a,b\n1,2\n\n3,4\n").width(), 0);
        assert_eq!(csv("a,b\n1,2\n\n").width(), 0);
        assert_eq!(csv("a,b\r\n1,2\r\n\r\n").width(), 0);
    }

    #[test]
    fn newlines_inside_quotes_are_not_blank_lines() {
        let f = csv("a,b\n\"x\n\ny\",2\n");
        assert_eq!(f.column_names(), vec!["a", "b"]);
        assert_eq!(f.value(0, "a").unwrap(), &Value::from("x\n\ny"));

        let f = csv("a,b\n1,2");
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn quoted_fields() {
        let f = csv("name,note\n\"Smith, J\",\"said \"\"hi\"\"\"\n");
        assert_eq!(f.value(0, "name").unwrap(), &Value::from("Smith, J"));
        assert_eq!(f.value(0, "note").unwrap(), &Value::from("said \"hi\""));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("table.xlsx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ext) if ext == "xlsx"));
    }
}
