use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// Value – a single cell in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
///
/// Columns are homogeneous by convention only, so every cell carries its
/// own tag. `Null` is the absent marker produced by [`Frame::cast`] for
/// missing data.
///
/// [`Frame::cast`]: crate::data::frame::Frame::cast
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

// -- Equality: integers and floats compare numerically across variants --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (String(a), String(b)) | (Date(a), Date(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Integer(i), Float(f)) | (Float(f), Integer(i)) => *i as f64 == *f,
            (Bool(a), Bool(b)) => a == b,
            (Null, Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            // `{:?}` keeps the fractional part on whole floats (`1.0`).
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl Value {
    /// Preview form used by column and frame renderings: text is quoted,
    /// everything else matches [`Display`](fmt::Display).
    pub fn repr(&self) -> String {
        match self {
            Value::String(s) | Value::Date(s) => format!("{s:?}"),
            other => other.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Date(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Date(_) => "date",
            Value::Null => "null",
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<&JsonValue> for Value {
    fn from(val: &JsonValue) -> Self {
        match val {
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::String(n.to_string())
                }
            }
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Null => Value::Null,
            other => Value::String(other.to_string()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) | Value::Date(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_and_floats_compare_numerically() {
        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_ne!(Value::Integer(1), Value::Float(1.5));
        assert_ne!(Value::Integer(1), Value::String("1".into()));
        assert_ne!(Value::Bool(true), Value::Integer(1));
    }

    #[test]
    fn repr_quotes_text_only() {
        assert_eq!(Value::from("a").repr(), "\"a\"");
        assert_eq!(Value::from(2).repr(), "2");
        assert_eq!(Value::from(2.0).repr(), "2.0");
        assert_eq!(Value::Null.repr(), "null");
    }

    #[test]
    fn option_none_becomes_null() {
        assert!(Value::from(None::<i64>).is_null());
        assert_eq!(Value::from(Some(3)), Value::Integer(3));
    }

    #[test]
    fn serializes_to_plain_json() {
        let vals = vec![Value::from(1), Value::from("a"), Value::Null, Value::from(0.5)];
        let json = serde_json::to_string(&vals).unwrap();
        assert_eq!(json, r#"[1,"a",null,0.5]"#);
    }

    #[test]
    fn json_scalars_map_to_variants() {
        let json: JsonValue = serde_json::from_str(r#"[1, 2.5, "x", true, null]"#).unwrap();
        let vals: Vec<Value> = json.as_array().unwrap().iter().map(Value::from).collect();
        assert!(matches!(vals[0], Value::Integer(1)));
        assert!(matches!(vals[1], Value::Float(f) if f == 2.5));
        assert_eq!(vals[2], Value::from("x"));
        assert_eq!(vals[3], Value::Bool(true));
        assert!(vals[4].is_null());
    }
}
