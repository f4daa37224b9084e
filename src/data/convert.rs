//! Stock converters for [`Frame::cast`](crate::data::frame::Frame::cast).

use std::fmt;

use anyhow::{Context, Result, anyhow, bail};

use super::value::Value;

/// A single-value conversion used by `cast`.
pub type Converter = dyn Fn(&Value) -> Result<Value>;

/// Ordered mapping from column name to converter.
#[derive(Default)]
pub struct CastMap {
    entries: Vec<(String, Box<Converter>)>,
}

impl CastMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`CastMap::insert`].
    pub fn with<F>(mut self, name: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + 'static,
    {
        self.insert(name, convert);
        self
    }

    /// Register a converter; a repeated name replaces the earlier one.
    pub fn insert<F>(&mut self, name: impl Into<String>, convert: F)
    where
        F: Fn(&Value) -> Result<Value> + 'static,
    {
        let name = name.into();
        let convert: Box<Converter> = Box::new(convert);
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = convert,
            None => self.entries.push((name, convert)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Converter)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CastMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(k, _)| k))
            .finish()
    }
}

/// Look up a stock converter by its short name (`int`, `float`, `bool`,
/// `str`, `date`).
pub fn by_name(kind: &str) -> Option<fn(&Value) -> Result<Value>> {
    let f: fn(&Value) -> Result<Value> = match kind {
        "int" => int,
        "float" => float,
        "bool" => boolean,
        "str" => string,
        "date" => date,
        _ => return None,
    };
    Some(f)
}

/// Parse to `Integer`. Text is trimmed; floats truncate toward zero.
pub fn int(v: &Value) -> Result<Value> {
    match v {
        Value::Integer(_) | Value::Float(_) => match (v.as_i64(), v.as_f64()) {
            (Some(i), _) => Ok(Value::Integer(i)),
            (None, Some(f)) if f.is_finite() => Ok(Value::Integer(f.trunc() as i64)),
            _ => bail!("cannot convert non-finite float {v} to int"),
        },
        Value::Bool(b) => Ok(Value::Integer(*b as i64)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .with_context(|| format!("invalid literal for int: {s:?}")),
        other => Err(anyhow!("cannot convert {} {other} to int", other.type_name())),
    }
}

/// Parse to `Float`. Text is trimmed; `nan` and `inf` are accepted.
pub fn float(v: &Value) -> Result<Value> {
    match v {
        Value::Float(_) | Value::Integer(_) => v
            .as_f64()
            .map(Value::Float)
            .context("numeric value without a float form"),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .with_context(|| format!("could not convert string to float: {s:?}")),
        other => Err(anyhow!("cannot convert {} {other} to float", other.type_name())),
    }
}

/// Parse `true`/`false` (any case) to `Bool`; numbers are true when non-zero.
pub fn boolean(v: &Value) -> Result<Value> {
    match v {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Integer(i) => Ok(Value::Bool(*i != 0)),
        Value::Float(f) => Ok(Value::Bool(*f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => bail!("invalid literal for bool: {s:?}"),
        },
        other => Err(anyhow!("cannot convert {} {other} to bool", other.type_name())),
    }
}

/// Render any value as text.
pub fn string(v: &Value) -> Result<Value> {
    Ok(Value::String(v.to_string()))
}

/// Tag text as an ISO-8601 date (`YYYY-MM-DD`, optionally followed by a time).
pub fn date(v: &Value) -> Result<Value> {
    let Some(s) = v.as_str().map(str::trim) else {
        bail!("cannot convert {} {v} to date", v.type_name());
    };
    let bytes = s.as_bytes();
    let well_formed = bytes.len() >= 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0..4, 5..7, 8..10]
            .into_iter()
            .all(|r| bytes[r].iter().all(u8::is_ascii_digit));
    if !well_formed {
        bail!("invalid ISO-8601 date: {s:?}");
    }
    Ok(Value::Date(s.to_string()))
}
