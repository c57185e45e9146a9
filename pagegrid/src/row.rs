//! Keyed dynamic rows

use std::collections::HashMap;

use serde_json::Value;

use crate::error::RowError;

/// Stable identity of a row.
///
/// Keys survive re-fetches and re-sorts, so expansion and activation
/// always attach to the same logical record rather than a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey(String);

impl RowKey {
    /// Creates a new row key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RowKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for RowKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<i64> for RowKey {
    fn from(key: i64) -> Self {
        Self(key.to_string())
    }
}

/// A dynamic table row.
///
/// Rows hold field values as a `HashMap<String, Value>`, allowing any
/// backend payload shape to flow through the table without a schema.
/// The key is mandatory: a row cannot be constructed without one.
///
/// # Example
///
/// ```
/// use pagegrid::Row;
///
/// let row = Row::new("42")
///     .set("name", "Alice")
///     .set("balance", 1250);
///
/// assert_eq!(row.get_str("name"), Some("Alice"));
/// assert_eq!(row.display("balance"), "1250");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    key: RowKey,
    fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new empty row with the given key.
    pub fn new(key: impl Into<RowKey>) -> Self {
        Self {
            key: key.into(),
            fields: HashMap::new(),
        }
    }

    /// Builds a row from a JSON object, taking the key from `key_field`.
    ///
    /// The key value is stringified, so numeric and string ids are both
    /// accepted. Objects without the key field are rejected.
    pub fn from_object(
        key_field: &str,
        fields: serde_json::Map<String, Value>,
    ) -> Result<Self, RowError> {
        let key = match fields.get(key_field) {
            Some(Value::String(s)) => RowKey::new(s.clone()),
            Some(Value::Number(n)) => RowKey::new(n.to_string()),
            _ => {
                return Err(RowError::MissingKey {
                    field: key_field.to_owned(),
                });
            }
        };

        Ok(Self {
            key,
            fields: fields.into_iter().collect(),
        })
    }

    /// Sets a field value, consuming and returning the row.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the row key.
    pub fn key(&self) -> &RowKey {
        &self.key
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the field as a string slice, if it is a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Returns the field as an `i64`, if it is an integral number.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.fields.get(field).and_then(Value::as_i64)
    }

    /// Returns the field as an `f64`, if it is a number.
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(Value::as_f64)
    }

    /// Returns the field as a `bool`, if it is a boolean.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.fields.get(field).and_then(Value::as_bool)
    }

    /// Returns the display text for a field.
    ///
    /// Missing fields and nulls render as the empty string. This is the
    /// same stringification the search filter matches against.
    pub fn display(&self, field: &str) -> String {
        self.fields.get(field).map(display_value).unwrap_or_default()
    }
}

/// Display stringification for cell values.
///
/// Strings render verbatim (no surrounding quotes); nulls render empty;
/// everything else renders as compact JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn display_stringification() {
        let row = Row::new("1")
            .set("name", "Alice")
            .set("age", 30)
            .set("active", true)
            .set("note", Value::Null)
            .set("tags", json!(["a", "b"]));

        assert_eq!(row.display("name"), "Alice");
        assert_eq!(row.display("age"), "30");
        assert_eq!(row.display("active"), "true");
        assert_eq!(row.display("note"), "");
        assert_eq!(row.display("missing"), "");
        assert_eq!(row.display("tags"), r#"["a","b"]"#);
    }

    #[test]
    fn from_object_takes_string_or_numeric_keys() {
        let obj = json!({"id": 7, "name": "Bob"});
        let Value::Object(fields) = obj else {
            unreachable!()
        };
        let row = Row::from_object("id", fields).unwrap();
        assert_eq!(row.key().as_str(), "7");
        assert_eq!(row.get_str("name"), Some("Bob"));
    }

    #[test]
    fn from_object_rejects_missing_key() {
        let obj = json!({"name": "Bob"});
        let Value::Object(fields) = obj else {
            unreachable!()
        };
        let err = Row::from_object("id", fields).unwrap_err();
        assert!(matches!(err, RowError::MissingKey { field } if field == "id"));
    }
}
