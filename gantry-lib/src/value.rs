//! Typed field values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw form field value.
///
/// The closed set of shapes a submitted field can take. Validation rules
/// dispatch on the variant instead of probing untyped data at call time.
///
/// # Type Mapping
///
/// | Submission shape | Variant |
/// |------------------|---------|
/// | absent / null | `Null` |
/// | integer | `Int` |
/// | text | `Text` |
/// | language-code → text object | `Map` |
///
/// # Example
///
/// ```
/// use gantry_lib::value::FieldValue;
///
/// let name = FieldValue::from("Contoso");
/// let age = FieldValue::from(42);
/// let empty = FieldValue::Null;
/// assert!(empty.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Null/absent value.
    #[default]
    Null,
    /// Integer value.
    Int(i64),
    /// Text value.
    Text(String),
    /// Structured language-code → text mapping.
    Map(BTreeMap<String, String>),
}

impl FieldValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Int(_) => "int",
            FieldValue::Text(_) => "text",
            FieldValue::Map(_) => "map",
        }
    }

    /// Borrow the text content, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer content, if this is an `Int` value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the language map, if this is a `Map` value.
    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            FieldValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// String conversion used for report echo and string-based rules.
    /// `Null` converts to the empty string; maps render as JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Map(m) => {
                f.write_str(&serde_json::to_string(m).unwrap_or_default())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        FieldValue::Map(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}
