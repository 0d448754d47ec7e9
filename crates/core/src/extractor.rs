//! Flattens a response payload into named fields using a [`ResponseMap`].

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::endpoint::ResponseMap;

/// One extracted field: the value found, or the marker for an unresolvable path.
///
/// `Missing` is distinct from a present `null`, `""` or `[]`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Present(Value),
    Missing,
}

impl FieldValue {
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing => None,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// The value if present and not `null`, `false`, `0`, `""`, `[]` or `{}`.
    #[must_use]
    pub fn truthy(&self) -> Option<&Value> {
        self.as_value().filter(|value| is_truthy(value))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Extracted fields in response-map order.
///
/// Serializes as a JSON object with missing fields written as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedResult {
    fields: IndexMap<String, FieldValue>,
}

impl ExtractedResult {
    /// Field by name. `None` means the field was not in the response map.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Value of a present field.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.get(field).and_then(FieldValue::as_value)
    }

    /// Removes a field and returns its value if present.
    pub fn take(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field).and_then(FieldValue::into_value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(field, value)| (field.as_str(), value))
    }

    /// Names of fields whose path did not resolve.
    pub fn missing_fields(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, value)| value.is_missing()).map(|(field, _)| field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ExtractedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, &value.as_value().unwrap_or(&Value::Null))?;
        }
        map.end()
    }
}

/// Extracts every field of `response` from `payload`.
///
/// Never fails: a path that does not resolve yields [`FieldValue::Missing`] for
/// that field only. Values are cloned out of the payload.
#[must_use]
pub fn extract(payload: &Value, response: &ResponseMap) -> ExtractedResult {
    let mut fields = IndexMap::with_capacity(response.len());
    for (field, path) in response.iter() {
        let value = match path.lookup(payload) {
            Some(found) => FieldValue::Present(found.clone()),
            None => {
                tracing::debug!(field, path = %path, "response path did not resolve");
                FieldValue::Missing
            },
        };
        fields.insert(field.to_owned(), value);
    }
    ExtractedResult { fields }
}
