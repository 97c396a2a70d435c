//! Value enum for dynamic field values

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value produced by a filter field or carried in a record.
///
/// Equality is structural: maps compare by content regardless of the order
/// their keys were inserted in, lists compare element by element.
///
/// # Example
///
/// ```
/// use protable_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let age = Value::from(42i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// # assert!(empty.is_null());
/// # assert_eq!(name.type_name(), "string");
/// # assert_eq!(age.as_i64(), Some(42));
/// # assert_eq!(active.as_bool(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Ordered list, e.g. a multi-select or a date range.
    List(Vec<Value>),
    /// Nested key/value map.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value carries no filtering information.
    ///
    /// Null, empty strings, empty lists and empty maps are blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns the boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_equality_ignores_insertion_order() {
        let mut a = BTreeMap::new();
        a.insert("name".to_string(), Value::from("Ada"));
        a.insert("age".to_string(), Value::from(36i64));

        let mut b = BTreeMap::new();
        b.insert("age".to_string(), Value::from(36i64));
        b.insert("name".to_string(), Value::from("Ada"));

        assert_eq!(Value::Map(a), Value::Map(b));
    }

    #[test]
    fn test_list_equality_is_order_sensitive() {
        assert_ne!(Value::from(vec![1i64, 2]), Value::from(vec![2i64, 1]));
        assert_eq!(Value::from(vec![1i64, 2]), Value::from(vec![1i64, 2]));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({
            "status": ["open", "closed"],
            "owner": { "id": 7 },
            "score": 1.5,
            "archived": null,
        });

        let Value::Map(map) = Value::from(json) else {
            panic!("expected map");
        };
        assert_eq!(
            map["status"],
            Value::List(vec![Value::from("open"), Value::from("closed")])
        );
        assert_eq!(map["score"], Value::Float(1.5));
        assert!(map["archived"].is_null());
        let Value::Map(owner) = &map["owner"] else {
            panic!("expected nested map");
        };
        assert_eq!(owner["id"].as_i64(), Some(7));
    }

    #[test]
    fn test_blank_values() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(Value::List(vec![]).is_blank());
        assert!(!Value::from(0i64).is_blank());
        assert!(!Value::from(false).is_blank());
    }

    #[test]
    fn test_untagged_serde() {
        let value: Value = serde_json::from_str(r#"[1, "two", true]"#).unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::Int(1), Value::from("two"), Value::Bool(true)])
        );
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,"two",true]"#);
    }
}
