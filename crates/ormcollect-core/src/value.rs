//! Dynamic column values.

use serde::{Deserialize, Serialize};

use crate::error::{Error, TypeError};

/// A dynamically-typed column value as produced by a fetch.
///
/// The variants mirror what a database driver hands back for a single
/// column: scalars, text, raw bytes, and structured JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    BigInt(i64),

    /// 64-bit floating point
    Double(f64),

    /// Arbitrary precision decimal (stored as string)
    Decimal(String),

    /// Text string
    Text(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// Structured JSON (nested arrays and objects)
    Json(serde_json::Value),
}

impl Value {
    /// Check if this value is NULL.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the type name of this value.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::BigInt(_) => "BIGINT",
            Value::Double(_) => "DOUBLE",
            Value::Decimal(_) => "DECIMAL",
            Value::Text(_) => "TEXT",
            Value::Bytes(_) => "BLOB",
            Value::Json(_) => "JSON",
        }
    }

    /// Try to convert this value to a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::BigInt(v) => Some(*v != 0),
            _ => None,
        }
    }

    /// Try to convert this value to an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::BigInt(v) => Some(*v),
            Value::Bool(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Try to convert this value to an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            Value::BigInt(v) => Some(*v as f64),
            Value::Decimal(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            Value::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Convert a decoded JSON scalar into a column value.
    ///
    /// Integers that fit `i64` become `BigInt`; larger unsigned integers are
    /// kept exact as `Decimal`. Arrays and objects stay structured as `Json`.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::BigInt(i)
                } else if n.is_u64() {
                    Value::Decimal(n.to_string())
                } else {
                    n.as_f64().map_or(Value::Null, Value::Double)
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Json(other),
        }
    }

    /// Convert this value into its natural JSON form.
    ///
    /// Non-finite doubles have no JSON representation and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::BigInt(i) => serde_json::Value::from(*i),
            Value::Double(d) => serde_json::Number::from_f64(*d)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Decimal(s) | Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::from(b.clone()),
            Value::Json(v) => v.clone(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::BigInt(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::Decimal(s) | Value::Text(s) => f.write_str(s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::BigInt(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::BigInt(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::from_json(v)
    }
}

fn mismatch(expected: &'static str, actual: &Value) -> Error {
    Error::Type(TypeError {
        expected,
        actual: actual.type_name().to_string(),
        column: None,
    })
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_bool().ok_or_else(|| mismatch("bool", &value))
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_i64().ok_or_else(|| mismatch("i64", &value))
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_f64().ok_or_else(|| mismatch("f64", &value))
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(v) | Value::Decimal(v) => Ok(v),
            other => Err(mismatch("String", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Value::from_json(json!(null)), Value::Null);
        assert_eq!(Value::from_json(json!(true)), Value::Bool(true));
        assert_eq!(Value::from_json(json!(42)), Value::BigInt(42));
        assert_eq!(Value::from_json(json!(-7)), Value::BigInt(-7));
        assert_eq!(Value::from_json(json!(1.5)), Value::Double(1.5));
        assert_eq!(
            Value::from_json(json!("a")),
            Value::Text("a".to_string())
        );
    }

    #[test]
    fn test_from_json_keeps_large_unsigned_exact() {
        let big = json!(u64::MAX);
        assert_eq!(
            Value::from_json(big),
            Value::Decimal(u64::MAX.to_string())
        );
    }

    #[test]
    fn test_from_json_structured() {
        let nested = json!({"tags": ["a", "b"]});
        assert_eq!(Value::from_json(nested.clone()), Value::Json(nested));
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::BigInt(3).to_json(), json!(3));
        assert_eq!(Value::Text("x".into()).to_json(), json!("x"));
        assert_eq!(Value::Decimal("1.10".into()).to_json(), json!("1.10"));
        assert_eq!(Value::Double(f64::NAN).to_json(), json!(null));
        assert_eq!(Value::Bytes(vec![1, 2]).to_json(), json!([1, 2]));
    }

    #[test]
    fn test_try_from() {
        assert_eq!(i64::try_from(Value::BigInt(42)).unwrap(), 42);
        assert!(i64::try_from(Value::Text("42".to_string())).is_err());
        assert!(bool::try_from(Value::BigInt(1)).unwrap());
        assert_eq!(
            String::try_from(Value::Decimal("9.99".to_string())).unwrap(),
            "9.99"
        );
        assert!(String::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_from_option() {
        let some: Value = Some(42i64).into();
        assert_eq!(some, Value::BigInt(42));

        let none: Value = Option::<i64>::None.into();
        assert_eq!(none, Value::Null);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::BigInt(5).to_string(), "5");
        assert_eq!(Value::Text("hi".into()).to_string(), "hi");
        assert_eq!(Value::Bytes(vec![0; 3]).to_string(), "<3 bytes>");
    }
}
