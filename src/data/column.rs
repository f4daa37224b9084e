use std::fmt;

use super::error::{Error, Result};
use super::selector::Slice;
use super::value::Value;

/// Number of values shown by previews before the ellipsis.
const PREVIEW_LEN: usize = 5;

// ---------------------------------------------------------------------------
// ColumnType – coarse type tag used by table widgets
// ---------------------------------------------------------------------------

/// Logical type of a column, inferred from its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Date,
    Character,
    Logical,
    Unknown,
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// An ordered sequence of values with positional, gather and slice access.
///
/// Positions are `isize`: negative positions count back from the end, the
/// same way they do for slices.
#[derive(Clone, PartialEq, Default)]
pub struct Column {
    values: Vec<Value>,
}

impl Column {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Map a possibly-negative position onto the stored values.
    fn offset(&self, index: isize) -> Result<usize> {
        let len = self.values.len();
        let resolved = if index < 0 { index + len as isize } else { index };
        if resolved < 0 || resolved as usize >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        Ok(resolved as usize)
    }

    /// The value at `index`.
    pub fn get(&self, index: isize) -> Result<&Value> {
        let i = self.offset(index)?;
        Ok(&self.values[i])
    }

    /// Gather: a new column with the values at `indices`, in that order.
    /// Positions may repeat.
    pub fn take(&self, indices: &[isize]) -> Result<Column> {
        indices
            .iter()
            .map(|&i| self.get(i).cloned())
            .collect::<Result<Vec<_>>>()
            .map(Column::new)
    }

    pub fn slice(&self, slice: &Slice) -> Result<Column> {
        let values = slice
            .indices(self.values.len())?
            .into_iter()
            .map(|i| self.values[i].clone())
            .collect();
        Ok(Column::new(values))
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Copy of the values as a plain list.
    pub fn to_list(&self) -> Vec<Value> {
        self.values.clone()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Infer the column's logical type from a few leading non-null values.
    ///
    /// Only the first five values are inspected unless they are all null, in
    /// which case the rest of the column is scanned. Mixed variants yield
    /// [`ColumnType::Unknown`], including integers mixed with floats.
    pub fn col_type(&self) -> ColumnType {
        let split = self.values.len().min(PREVIEW_LEN);
        let (head, tail) = self.values.split_at(split);
        let peek = |vals: &[Value]| {
            let mut present = vals.iter().filter(|v| !v.is_null());
            let first = present.next()?;
            let tag = std::mem::discriminant(first);
            if present.any(|v| std::mem::discriminant(v) != tag) {
                return Some(ColumnType::Unknown);
            }
            Some(match first {
                Value::Integer(_) | Value::Float(_) => ColumnType::Numeric,
                Value::String(_) => ColumnType::Character,
                Value::Bool(_) => ColumnType::Logical,
                Value::Date(_) => ColumnType::Date,
                Value::Null => ColumnType::Unknown,
            })
        };
        peek(head)
            .or_else(|| peek(tail))
            .unwrap_or(ColumnType::Unknown)
    }

    /// Bounded preview of the values: everything when there are at most five,
    /// otherwise the first five followed by `...`.
    pub(crate) fn preview(&self) -> String {
        let mut parts: Vec<String> = self
            .values
            .iter()
            .take(PREVIEW_LEN)
            .map(Value::repr)
            .collect();
        if self.values.len() > PREVIEW_LEN {
            parts.push("...".to_string());
        }
        format!("[{}]", parts.join(", "))
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column({})", self.preview())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Column {
    fn from(values: Vec<T>) -> Self {
        Column::new(values.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<Value> for Column {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Column::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
