//! Database row representation.

use crate::Result;
use crate::error::{Error, PayloadErrorKind, TypeError};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Column metadata shared across all rows in a result set.
///
/// This struct is wrapped in `Arc` so all rows from the same query share
/// the same column information, saving memory for large result sets.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    /// Column names in order
    names: Vec<String>,
    /// Name -> index mapping for O(1) lookup
    name_to_index: HashMap<String, usize>,
}

impl ColumnInfo {
    /// Create new column info from a list of column names.
    ///
    /// If a name repeats, lookups by that name resolve to its last position.
    pub fn new(names: Vec<String>) -> Self {
        let name_to_index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            names,
            name_to_index,
        }
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the index of a column by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Check if a column exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Get all column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// A single row of a result set: an ordered column-name to value mapping.
///
/// Rows are immutable once produced. Column metadata is shared via `Arc`
/// when rows come from the same fetch.
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values in order
    values: Vec<Value>,
    /// Shared column metadata
    columns: Arc<ColumnInfo>,
}

impl Row {
    /// Create a new row with the given columns and values.
    pub fn new(column_names: Vec<String>, values: Vec<Value>) -> Self {
        let columns = Arc::new(ColumnInfo::new(column_names));
        Self { values, columns }
    }

    /// Create a new row with shared column metadata.
    pub fn with_columns(columns: Arc<ColumnInfo>, values: Vec<Value>) -> Self {
        Self { values, columns }
    }

    /// Build a row from `(column, value)` pairs, keeping their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let (names, values): (Vec<String>, Vec<Value>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::new(names, values)
    }

    /// Build a row from a decoded JSON object, keeping key order.
    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::from_pairs(
            object
                .into_iter()
                .map(|(name, json)| (name, Value::from_json(json))),
        )
    }

    /// Build a row from any JSON value, which must be an object.
    #[allow(clippy::result_large_err)]
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Object(object) => Ok(Self::from_json_object(object)),
            other => Err(Error::payload(
                PayloadErrorKind::InvalidRow,
                format!("expected a column mapping, found {}", json_kind(&other)),
            )),
        }
    }

    /// Get the shared column metadata.
    pub fn column_info(&self) -> Arc<ColumnInfo> {
        Arc::clone(&self.columns)
    }

    /// Get the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this row is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column index. O(1) operation.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column name. O(1) operation via HashMap lookup.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.columns.index_of(name).and_then(|i| self.values.get(i))
    }

    /// Check if a column exists by name.
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Get a typed value by column name.
    #[allow(clippy::result_large_err)]
    pub fn get_named<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self.get_by_name(name).ok_or_else(|| {
            Error::Type(TypeError {
                expected: std::any::type_name::<T>(),
                actual: format!("column '{}' not found", name),
                column: Some(name.to_string()),
            })
        })?;
        T::from_value(value).map_err(|e| match e {
            Error::Type(mut te) => {
                te.column = Some(name.to_string());
                Error::Type(te)
            }
            e => e,
        })
    }

    /// Get all column names.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.names().iter().map(String::as_str)
    }

    /// Iterate over all values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Iterate over (column_name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Convert the row into a JSON object, keeping column order.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(name, value)| (name.to_string(), value.to_json()))
                .collect(),
        )
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.columns.names() == other.columns.names() && self.values == other.values
    }
}

pub(crate) fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Trait for converting from a `Value` to a typed value.
pub trait FromValue: Sized {
    /// Convert from a Value, returning an error if the conversion fails.
    #[allow(clippy::result_large_err)]
    fn from_value(value: &Value) -> Result<Self>;
}

fn type_error(expected: &'static str, value: &Value) -> Error {
    Error::Type(TypeError {
        expected,
        actual: value.type_name().to_string(),
        column: None,
    })
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| type_error("bool", value))
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_i64().ok_or_else(|| type_error("i64", value))
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self> {
        let v = value.as_i64().ok_or_else(|| type_error("i32", value))?;
        i32::try_from(v).map_err(|_| {
            Error::Type(TypeError {
                expected: "i32",
                actual: format!("value {} out of range", v),
                column: None,
            })
        })
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Result<Self> {
        let v = value.as_i64().ok_or_else(|| type_error("u64", value))?;
        u64::try_from(v).map_err(|_| {
            Error::Type(TypeError {
                expected: "u64",
                actual: format!("value {} out of range", v),
                column: None,
            })
        })
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_f64().ok_or_else(|| type_error("f64", value))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| type_error("String", value))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Json(v) => Ok(v.clone()),
            Value::Text(s) => serde_json::from_str(s).map_err(|e| {
                Error::Type(TypeError {
                    expected: "valid JSON",
                    actual: format!("invalid JSON: {}", e),
                    column: None,
                })
            }),
            _ => Err(type_error("JSON", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_basic_access() {
        let row = Row::new(
            vec!["id".to_string(), "name".to_string(), "age".to_string()],
            vec![
                Value::BigInt(1),
                Value::Text("Alice".to_string()),
                Value::BigInt(30),
            ],
        );

        assert_eq!(row.len(), 3);
        assert!(!row.is_empty());
        assert_eq!(row.get(0), Some(&Value::BigInt(1)));
        assert_eq!(row.get(3), None);
        assert_eq!(
            row.get_by_name("name"),
            Some(&Value::Text("Alice".to_string()))
        );
        assert_eq!(row.get_by_name("missing"), None);
    }

    #[test]
    fn test_row_typed_access() {
        let row = Row::from_pairs([("id", Value::BigInt(42)), ("name", "Bob".into())]);

        assert_eq!(row.get_named::<i64>("id").unwrap(), 42);
        assert_eq!(row.get_named::<i32>("id").unwrap(), 42);
        assert_eq!(row.get_named::<String>("name").unwrap(), "Bob");
        assert!(row.get_named::<i64>("name").is_err());
        assert!(row.get_named::<i64>("missing").is_err());
    }

    #[test]
    fn test_type_error_names_column() {
        let row = Row::from_pairs([("id", "not a number")]);
        let err = row.get_named::<i64>("id").unwrap_err();
        match err {
            Error::Type(te) => assert_eq!(te.column.as_deref(), Some("id")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_row_null_handling() {
        let row = Row::from_pairs([("nullable", Value::Null)]);
        assert_eq!(row.get_named::<Option<i64>>("nullable").unwrap(), None);
        assert!(row.get_named::<i64>("nullable").is_err());
    }

    #[test]
    fn test_from_json_object_keeps_order() {
        let row = Row::from_json(json!({"z": 1, "a": "x", "m": null})).unwrap();
        let names: Vec<_> = row.column_names().collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        assert_eq!(row.get_by_name("z"), Some(&Value::BigInt(1)));
        assert_eq!(row.get_by_name("m"), Some(&Value::Null));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = Row::from_json(json!([1, 2])).unwrap_err();
        assert_eq!(err.payload_kind(), Some(PayloadErrorKind::InvalidRow));
    }

    #[test]
    fn test_to_json() {
        let row = Row::from_pairs([("id", Value::BigInt(7)), ("name", "n".into())]);
        assert_eq!(row.to_json(), json!({"id": 7, "name": "n"}));
    }

    #[test]
    fn test_row_equality_ignores_shared_metadata() {
        let columns = Arc::new(ColumnInfo::new(vec!["id".to_string()]));
        let shared = Row::with_columns(Arc::clone(&columns), vec![Value::BigInt(1)]);
        let fresh = Row::new(vec!["id".to_string()], vec![Value::BigInt(1)]);
        assert_eq!(shared, fresh);
        assert_ne!(shared, Row::from_pairs([("id", 2i64)]));
    }

    #[test]
    fn test_column_info() {
        let info = ColumnInfo::new(vec!["id".to_string(), "name".to_string()]);
        assert_eq!(info.len(), 2);
        assert_eq!(info.index_of("name"), Some(1));
        assert_eq!(info.index_of("missing"), None);
        assert!(info.contains("id"));
        assert!(!ColumnInfo::new(Vec::new()).contains("id"));
    }

    #[test]
    fn test_json_column_from_text() {
        let row = Row::from_pairs([("meta", r#"{"a":1}"#)]);
        let meta: serde_json::Value = row.get_named("meta").unwrap();
        assert_eq!(meta, json!({"a": 1}));
    }
}
