//! Value sources - the seam between the validation engine and the host request.

use std::collections::BTreeMap;

use crate::value::FieldValue;

/// Trait for anything that can supply raw field values by name.
///
/// The host's request type implements this; the engine never sees the request
/// itself, only the lookup capability.
pub trait ValueSource {
    /// The raw value for a field name, if the source carries one.
    fn value(&self, field: &str) -> Option<FieldValue>;
}

/// Plain map-backed value source.
///
/// # Example
///
/// ```
/// use gantry_lib::source::{FormData, ValueSource};
///
/// let mut data = FormData::new();
/// data.set("username", "norpie");
/// assert!(data.value("username").is_some());
/// assert!(data.value("missing").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: BTreeMap<String, FieldValue>,
}

impl FormData {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous one.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Number of fields in the source.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the source is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ValueSource for FormData {
    fn value(&self, field: &str) -> Option<FieldValue> {
        self.values.get(field).cloned()
    }
}

impl ValueSource for BTreeMap<String, FieldValue> {
    fn value(&self, field: &str) -> Option<FieldValue> {
        self.get(field).cloned()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
