//! Row and column selectors for 2-D frame indexing.
//!
//! Callers build a [`Selector`] per axis (or a single one for the shorthand
//! form). [`Index::resolve`] turns it into exactly one `(RowSel, ColSel)`
//! pair, so the frame never re-inspects selector shapes after the entry
//! point.

use std::ops::RangeFull;

use super::error::{Error, Result};

// ---------------------------------------------------------------------------
// Slice
// ---------------------------------------------------------------------------

/// Half-open, step-aware slice.
///
/// Missing bounds default to the ends of the sequence, negative bounds count
/// from the end, and out-of-range bounds are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// Everything, in order.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn range(start: isize, stop: isize) -> Self {
        Self::new(Some(start), Some(stop), None)
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Resolve against a sequence of `len` items, yielding concrete positions.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(Error::InvalidSlice);
        }
        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(b) if b < 0 => (b + len).max(lower),
            Some(b) => b.min(upper),
        };
        let (start, stop) = if step < 0 {
            (clamp(self.start, upper), clamp(self.stop, lower))
        } else {
            (clamp(self.start, lower), clamp(self.stop, upper))
        };

        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            out.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
        Ok(out)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::all()
    }
}

// ---------------------------------------------------------------------------
// Selector – what callers pass in
// ---------------------------------------------------------------------------

/// One element of a list selector: a row position or a column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Pos(isize),
    Name(String),
}

impl From<isize> for Label {
    fn from(v: isize) -> Self {
        Label::Pos(v)
    }
}

impl From<i32> for Label {
    fn from(v: i32) -> Self {
        Label::Pos(v as isize)
    }
}

impl From<usize> for Label {
    fn from(v: usize) -> Self {
        Label::Pos(v as isize)
    }
}

impl From<&str> for Label {
    fn from(v: &str) -> Self {
        Label::Name(v.to_string())
    }
}

impl From<String> for Label {
    fn from(v: String) -> Self {
        Label::Name(v)
    }
}

/// An unresolved selector for one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Pos(isize),
    Name(String),
    List(Vec<Label>),
    Slice(Slice),
}

impl From<isize> for Selector {
    fn from(v: isize) -> Self {
        Selector::Pos(v)
    }
}

impl From<i32> for Selector {
    fn from(v: i32) -> Self {
        Selector::Pos(v as isize)
    }
}

impl From<usize> for Selector {
    fn from(v: usize) -> Self {
        Selector::Pos(v as isize)
    }
}

impl From<&str> for Selector {
    fn from(v: &str) -> Self {
        Selector::Name(v.to_string())
    }
}

impl From<String> for Selector {
    fn from(v: String) -> Self {
        Selector::Name(v)
    }
}

impl From<Slice> for Selector {
    fn from(v: Slice) -> Self {
        Selector::Slice(v)
    }
}

impl From<RangeFull> for Selector {
    fn from(_: RangeFull) -> Self {
        Selector::Slice(Slice::all())
    }
}

impl<T: Into<Label>> From<Vec<T>> for Selector {
    fn from(v: Vec<T>) -> Self {
        Selector::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Label>, const N: usize> From<[T; N]> for Selector {
    fn from(v: [T; N]) -> Self {
        Selector::List(v.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// Resolved selectors
// ---------------------------------------------------------------------------

/// Row axis after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSel {
    At(isize),
    Take(Vec<isize>),
    Slice(Slice),
}

/// Column axis after resolution. A slice here selects a run of columns by
/// their position in the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColSel {
    Name(String),
    Names(Vec<String>),
    Slice(Slice),
}

impl Selector {
    fn into_rows(self) -> Result<RowSel> {
        match self {
            Selector::Pos(i) => Ok(RowSel::At(i)),
            Selector::Slice(s) => Ok(RowSel::Slice(s)),
            Selector::List(labels) => labels
                .into_iter()
                .map(|label| match label {
                    Label::Pos(i) => Ok(i),
                    Label::Name(name) => Err(Error::Selector(format!(
                        "column name `{name}` in a row selector"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(RowSel::Take),
            Selector::Name(name) => Err(Error::Selector(format!(
                "column name `{name}` used as a row selector"
            ))),
        }
    }

    fn into_cols(self) -> Result<ColSel> {
        match self {
            Selector::Name(name) => Ok(ColSel::Name(name)),
            Selector::Slice(s) => Ok(ColSel::Slice(s)),
            Selector::List(labels) => labels
                .into_iter()
                .map(|label| match label {
                    Label::Name(name) => Ok(name),
                    Label::Pos(i) => Err(Error::Selector(format!(
                        "position {i} in a column selector"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(ColSel::Names),
            Selector::Pos(i) => Err(Error::Selector(format!(
                "position {i} used as a column selector"
            ))),
        }
    }
}

/// A full indexing request: either the shorthand single-selector form or an
/// explicit `(rows, columns)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Index {
    Single(Selector),
    Pair(Selector, Selector),
}

impl Index {
    /// Classify and resolve into one canonical `(rows, columns)` pair.
    ///
    /// For the single form, a name (or a list led by a name) selects columns
    /// over all rows and always yields a frame; anything else selects rows
    /// over all columns.
    pub fn resolve(self) -> Result<(RowSel, ColSel)> {
        match self {
            Index::Pair(rows, cols) => Ok((rows.into_rows()?, cols.into_cols()?)),
            Index::Single(Selector::Name(name)) => {
                Ok((RowSel::Slice(Slice::all()), ColSel::Names(vec![name])))
            }
            Index::Single(sel @ Selector::List(_)) if sel.leads_with_name() => {
                Ok((RowSel::Slice(Slice::all()), sel.into_cols()?))
            }
            Index::Single(sel) => Ok((sel.into_rows()?, ColSel::Slice(Slice::all()))),
        }
    }
}

impl Selector {
    fn leads_with_name(&self) -> bool {
        matches!(self, Selector::List(labels) if matches!(labels.first(), Some(Label::Name(_))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_clamps_and_counts_from_end() {
        assert_eq!(Slice::all().indices(4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(Slice::range(1, 3).indices(4).unwrap(), vec![1, 2]);
        assert_eq!(Slice::range(-2, 100).indices(4).unwrap(), vec![2, 3]);
        assert_eq!(Slice::all().with_step(2).indices(5).unwrap(), vec![0, 2, 4]);
        assert_eq!(Slice::all().with_step(-1).indices(3).unwrap(), vec![2, 1, 0]);
        assert_eq!(
            Slice::new(Some(3), Some(0), Some(-2)).indices(5).unwrap(),
            vec![3, 1]
        );
        assert!(Slice::range(3, 1).indices(5).unwrap().is_empty());
        assert!(Slice::all().indices(0).unwrap().is_empty());
    }

    #[test]
    fn huge_step_stops_instead_of_overflowing() {
        let slice = Slice::new(Some(1), None, Some(isize::MAX));
        assert_eq!(slice.indices(3).unwrap(), vec![1]);
        let back = Slice::new(Some(-1), None, Some(isize::MIN));
        assert_eq!(back.indices(3).unwrap(), vec![2]);
    }

    #[test]
    fn zero_step_is_rejected() {
        assert!(matches!(
            Slice::all().with_step(0).indices(3),
            Err(Error::InvalidSlice)
        ));
    }

    #[test]
    fn single_name_selects_columns_over_all_rows() {
        let (rows, cols) = Index::Single("x".into()).resolve().unwrap();
        assert_eq!(rows, RowSel::Slice(Slice::all()));
        assert_eq!(cols, ColSel::Names(vec!["x".into()]));
    }

    #[test]
    fn list_led_by_name_is_a_column_selector() {
        let (rows, cols) = Index::Single(vec!["x", "y"].into()).resolve().unwrap();
        assert_eq!(rows, RowSel::Slice(Slice::all()));
        assert_eq!(cols, ColSel::Names(vec!["x".into(), "y".into()]));
    }

    #[test]
    fn positions_and_slices_are_row_selectors() {
        let (rows, cols) = Index::Single(1.into()).resolve().unwrap();
        assert_eq!(rows, RowSel::At(1));
        assert_eq!(cols, ColSel::Slice(Slice::all()));

        let (rows, _) = Index::Single(vec![2, 0].into()).resolve().unwrap();
        assert_eq!(rows, RowSel::Take(vec![2, 0]));

        let (rows, _) = Index::Single((..).into()).resolve().unwrap();
        assert_eq!(rows, RowSel::Slice(Slice::all()));
    }

    #[test]
    fn empty_list_is_a_row_selector() {
        let (rows, _) = Index::Single(Vec::<isize>::new().into()).resolve().unwrap();
        assert_eq!(rows, RowSel::Take(vec![]));
    }

    #[test]
    fn mismatched_axis_shapes_are_selector_errors() {
        assert!(matches!(
            Index::Pair("x".into(), "y".into()).resolve(),
            Err(Error::Selector(_))
        ));
        assert!(matches!(
            Index::Pair(0.into(), 1.into()).resolve(),
            Err(Error::Selector(_))
        ));
        let mixed = Selector::List(vec![Label::Pos(0), Label::Name("x".into())]);
        assert!(matches!(
            Index::Single(mixed).resolve(),
            Err(Error::Selector(_))
        ));
    }
}
