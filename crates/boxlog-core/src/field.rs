//! Field values and their printable form.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::BoxlogResult;

/// One logical value of a record, before wrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Rendered verbatim
    Text(String),
    /// Rendered through [`serialize`]
    Value(Value),
    /// Carried context text; rendered verbatim and marked with the
    /// `context` label when it is not the first field
    Context(String),
}

impl Field {
    /// Capture any serializable value. Values that serialize to a plain
    /// string become [`Field::Text`] so they render without quotes.
    pub fn value<T: Serialize + ?Sized>(value: &T) -> BoxlogResult<Field> {
        Ok(match serde_json::to_value(value)? {
            Value::String(s) => Field::Text(s),
            other => Field::Value(other),
        })
    }

    /// An error and its whole source chain, `outer: inner: root`.
    pub fn error(err: &(dyn std::error::Error + 'static)) -> Field {
        let mut text = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        Field::Text(text)
    }

    pub fn is_context(&self) -> bool {
        matches!(self, Field::Context(_))
    }

    /// The printable text of this field.
    pub fn to_text(&self) -> BoxlogResult<String> {
        match self {
            Field::Text(s) | Field::Context(s) => Ok(s.clone()),
            Field::Value(v) => serialize(v),
        }
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Text(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Text(s)
    }
}

impl From<&String> for Field {
    fn from(s: &String) -> Self {
        Field::Text(s.clone())
    }
}

impl From<Value> for Field {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => Field::Text(s),
            other => Field::Value(other),
        }
    }
}

/// Pretty, multi-line JSON with a 4-space indent.
pub fn serialize(value: &Value) -> BoxlogResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
