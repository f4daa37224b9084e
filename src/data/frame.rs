use std::fmt;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::column::Column;
use super::convert::CastMap;
use super::error::{Error, Result};
use super::loader;
use super::selector::{ColSel, Index, RowSel, Selector, Slice};
use super::table::DataTableLike;
use super::value::Value;

// ---------------------------------------------------------------------------
// ColumnDict – the interchange shape
// ---------------------------------------------------------------------------

/// Ordered mapping of column name to plain values.
///
/// This is what table adapters produce and what the props layer consumes.
/// Inserting an existing name replaces its values in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnDict {
    entries: Vec<(String, Vec<Value>)>,
}

impl ColumnDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Value>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = values,
            None => self.entries.push((name, values)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Value>)> for ColumnDict {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Value>)>>(iter: I) -> Self {
        let mut dict = ColumnDict::new();
        for (name, values) in iter {
            dict.insert(name, values);
        }
        dict
    }
}

impl IntoIterator for ColumnDict {
    type Item = (String, Vec<Value>);
    type IntoIter = std::vec::IntoIter<(String, Vec<Value>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for ColumnDict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Selection / ColumnValue – indexing output and assignment input
// ---------------------------------------------------------------------------

/// Result of indexing a [`Frame`]; which variant comes back depends on the
/// shape of the selectors.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Value(Value),
    Column(Column),
    Frame(Frame),
}

impl Selection {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Selection::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_column(self) -> Option<Column> {
        match self {
            Selection::Column(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_frame(self) -> Option<Frame> {
        match self {
            Selection::Frame(f) => Some(f),
            _ => None,
        }
    }
}

/// Anything that can be assigned to a frame column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Column(Column),
    Values(Vec<Value>),
    /// Broadcast to the frame's current row count.
    Scalar(Value),
}

impl From<Column> for ColumnValue {
    fn from(v: Column) -> Self {
        ColumnValue::Column(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for ColumnValue {
    fn from(v: Vec<T>) -> Self {
        ColumnValue::Values(v.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for ColumnValue {
    fn from(v: Value) -> Self {
        ColumnValue::Scalar(v)
    }
}

macro_rules! scalar_column_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ColumnValue {
                fn from(v: $t) -> Self {
                    ColumnValue::Scalar(v.into())
                }
            }
        )*
    };
}

scalar_column_value!(i64, i32, f64, bool, &str, String);

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Ordered mapping from column name to [`Column`].
///
/// All columns share one length when built through [`Frame::from_columns`]
/// or [`Frame::from_dict`]. [`Frame::set`] is the fast append/overwrite path
/// and does not re-check that invariant.
///
/// Equality is order sensitive: the same columns in a different order are
/// not equal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<(String, Column)>,
}

impl Frame {
    /// A frame with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, values-or-column)` pairs, rejecting mismatched
    /// lengths. Column order follows the input; a repeated name replaces the
    /// earlier values in place.
    pub fn from_columns<I, K, V>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Column>,
    {
        let mut frame = Frame::new();
        let mut expected: Option<usize> = None;
        for (name, col) in columns {
            let name = name.into();
            let col = col.into();
            if let Some(expected) = expected {
                if expected != col.len() {
                    return Err(Error::ShapeMismatch {
                        expected,
                        column: name,
                        actual: col.len(),
                    });
                }
            }
            expected = Some(col.len());
            frame.put(name, col);
        }
        Ok(frame)
    }

    pub fn from_dict(dict: ColumnDict) -> Result<Self> {
        Self::from_columns(dict)
    }

    /// Build from any external table through its column-dict export.
    pub fn from_table(table: &dyn DataTableLike) -> Result<Self> {
        if let Some(frame) = table.as_frame() {
            return Ok(frame.clone());
        }
        Self::from_dict(table.to_column_dict())
    }

    /// Read a CSV file whose first record names the columns. See
    /// [`loader::read_csv`] for the ragged-row behaviour.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        loader::read_csv(path.as_ref())
    }

    /// Row count; zero when there are no columns.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|(k, _)| k == name).map(|(_, c)| c)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, c)| (k.as_str(), c))
    }

    fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Install a column, replacing one of the same name in place.
    fn put(&mut self, name: String, col: Column) {
        match self.columns.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = col,
            None => self.columns.push((name, col)),
        }
    }

    // -- Indexing --

    /// Single-selector indexing.
    ///
    /// A column name, or a list starting with one, selects those columns over
    /// all rows. A position, a list of positions or a slice selects rows over
    /// all columns.
    pub fn get(&self, sel: impl Into<Selector>) -> Result<Selection> {
        self.index(Index::Single(sel.into()))
    }

    /// Two-axis indexing.
    ///
    /// | rows              | columns          | result   |
    /// |-------------------|------------------|----------|
    /// | position          | name             | value    |
    /// | position          | list / slice     | 1-row frame |
    /// | list / slice      | name             | column   |
    /// | list / slice      | list / slice     | frame    |
    pub fn get_at(
        &self,
        rows: impl Into<Selector>,
        cols: impl Into<Selector>,
    ) -> Result<Selection> {
        self.index(Index::Pair(rows.into(), cols.into()))
    }

    pub fn index(&self, index: Index) -> Result<Selection> {
        match index.resolve()? {
            (RowSel::At(i), ColSel::Name(name)) => {
                Ok(Selection::Value(self.require(&name)?.get(i)?.clone()))
            }
            (rows, ColSel::Name(name)) => {
                Ok(Selection::Column(select_rows(self.require(&name)?, &rows)?))
            }
            (rows, cols) => self.select_frame(&rows, &cols).map(Selection::Frame),
        }
    }

    /// Scalar lookup by row position and column name.
    pub fn value(&self, row: isize, name: &str) -> Result<&Value> {
        self.require(name)?.get(row)
    }

    /// Gather rows then columns; `None` keeps everything on that axis.
    pub fn subset(&self, rows: Option<&[isize]>, cols: Option<&[&str]>) -> Result<Frame> {
        let rows = match rows {
            Some(rows) => RowSel::Take(rows.to_vec()),
            None => RowSel::Slice(Slice::all()),
        };
        let cols = match cols {
            Some(cols) => ColSel::Names(cols.iter().map(|c| c.to_string()).collect()),
            None => ColSel::Slice(Slice::all()),
        };
        self.select_frame(&rows, &cols)
    }

    fn select_frame(&self, rows: &RowSel, cols: &ColSel) -> Result<Frame> {
        let names = match cols {
            ColSel::Name(name) => vec![name.clone()],
            ColSel::Names(names) => names.clone(),
            ColSel::Slice(slice) => slice
                .indices(self.columns.len())?
                .into_iter()
                .map(|i| self.columns[i].0.clone())
                .collect(),
        };
        let mut out = Frame::new();
        for name in names {
            let col = select_rows(self.require(&name)?, rows)?;
            out.put(name, col);
        }
        Ok(out)
    }

    // -- Mutation --

    /// Assign a column, appending it if the name is new.
    ///
    /// Columns and value lists are installed as given, without checking
    /// their length against the rest of the frame. Scalars are broadcast to
    /// the current row count and fail with [`Error::EmptyBroadcast`] when the
    /// frame has no columns to take that count from.
    ///
    /// Takes `&mut self`; share a frame across threads only behind a lock.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ColumnValue>) -> Result<()> {
        let name = name.into();
        let col = match value.into() {
            ColumnValue::Column(col) => col,
            ColumnValue::Values(values) => Column::new(values),
            ColumnValue::Scalar(v) => {
                if self.columns.is_empty() {
                    return Err(Error::EmptyBroadcast(name));
                }
                Column::new(vec![v; self.len()])
            }
        };
        self.put(name, col);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Column> {
        let pos = self.columns.iter().position(|(k, _)| k == name)?;
        Some(self.columns.remove(pos).1)
    }

    // -- Comparison / export --

    /// Same column names in the same order, with element-wise equal values.
    pub fn equals(&self, other: &Frame) -> bool {
        self == other
    }

    /// Like [`Frame::equals`], but false for any table that is not a frame.
    pub fn equals_table(&self, other: &dyn DataTableLike) -> bool {
        other.as_frame().is_some_and(|f| self.equals(f))
    }

    pub fn to_dict(&self) -> ColumnDict {
        self.columns
            .iter()
            .map(|(k, c)| (k.clone(), c.to_list()))
            .collect()
    }

    // -- Casting --

    /// Convert the named columns value by value, producing a new frame.
    ///
    /// Values equal to `missing` (the text sentinel, or `Null` when `None`)
    /// become `Null` without reaching the converter. The first converter
    /// failure is returned as [`Error::Convert`]. Columns not named in
    /// `casts` are copied unchanged.
    pub fn cast(&self, casts: &CastMap, missing: Option<&str>) -> Result<Frame> {
        let sentinel = missing.map_or(Value::Null, Value::from);
        let mut out = self.clone();
        for (name, convert) in casts.iter() {
            let converted = self
                .require(name)?
                .iter()
                .map(|v| {
                    if *v == sentinel {
                        Ok(Value::Null)
                    } else {
                        convert(v).map_err(Error::Convert)
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            log::debug!("cast column `{name}` ({} values)", converted.len());
            out.put(name.to_string(), Column::new(converted));
        }
        Ok(out)
    }
}

fn select_rows(col: &Column, rows: &RowSel) -> Result<Column> {
    match rows {
        RowSel::At(i) => col.take(&[*i]),
        RowSel::Take(idxs) => col.take(idxs),
        RowSel::Slice(slice) => col.slice(slice),
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .columns
            .iter()
            .map(|(k, c)| format!("    {k:?}: {}", c.preview()))
            .collect();
        // An empty frame still gets its (blank) body line.
        write!(f, "Frame({{\n{}\n}})", lines.join(",\n"))
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, col) in &self.columns {
            map.serialize_entry(name, col.values())?;
        }
        map.end()
    }
}
