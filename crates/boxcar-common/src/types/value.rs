//! Value - raw and resolved setting values
//!
//! A setting holds one of a closed set of value kinds:
//! - Scalars (bool, int, float, string)
//! - Tuples of scalars (e.g. the gravity vector)
//! - `Absent` for optional or derived parameters
//! - `Callable` naming a registered function (e.g. a fitness scorer)
//!
//! A `Str` value may also be the name of another setting in the same
//! controller, in which case the resolver follows it as an alias.

use serde::{Deserialize, Serialize};

use crate::error::BoxcarError;

/// Runtime tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Explicit "no value" marker
    Absent,
    Bool,
    Int,
    Float,
    Str,
    Tuple,
    Callable,
    /// Wildcard accepted by constraints only; no value has this kind
    Any,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Absent => write!(f, "None"),
            Kind::Bool => write!(f, "bool"),
            Kind::Int => write!(f, "int"),
            Kind::Float => write!(f, "float"),
            Kind::Str => write!(f, "str"),
            Kind::Tuple => write!(f, "tuple"),
            Kind::Callable => write!(f, "callable"),
            Kind::Any => write!(f, "any"),
        }
    }
}

/// A setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
    /// Name of a function registered with the consumer (e.g. `fitness_function2`)
    Callable(String),
}

impl Value {
    /// Runtime kind of this value
    pub fn kind(&self) -> Kind {
        match self {
            Value::Absent => Kind::Absent,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Tuple(_) => Kind::Tuple,
            Value::Callable(_) => Kind::Callable,
        }
    }

    /// Build a callable reference
    pub fn callable(name: &str) -> Self {
        Value::Callable(name.to_string())
    }

    /// Build a tuple of floats
    pub fn float_tuple(items: &[f64]) -> Self {
        Value::Tuple(items.iter().copied().map(Value::Float).collect())
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Int or float
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Numeric view of the value (ints widen to f64)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String payload; callables are not strings
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&str> {
        match self {
            Value::Callable(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Absent => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" so floats stay distinguishable from ints
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::Callable(name) => write!(f, "<function {}>", name),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Absent)
    }
}

/// Conversion from untyped override documents (JSON, TOML, YAML via `config`)
impl TryFrom<serde_json::Value> for Value {
    type Error = BoxcarError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Ok(Value::Absent),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(x) = n.as_f64() {
                    Ok(Value::Float(x))
                } else {
                    Err(BoxcarError::Serialization(format!(
                        "number out of range: {}",
                        n
                    )))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Str(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Tuple),
            serde_json::Value::Object(_) => Err(BoxcarError::Serialization(
                "nested tables are not valid setting values".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_csv_rendering() {
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Float(0.15).to_string(), "0.15");
        assert_eq!(Value::Int(150).to_string(), "150");
        assert_eq!(Value::Absent.to_string(), "None");
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::float_tuple(&[0.0, -9.8]).to_string(), "(0.0, -9.8)");
        assert_eq!(
            Value::callable("fitness_function").to_string(),
            "<function fitness_function>"
        );
    }

    #[test]
    fn test_kind_of_values() {
        assert_eq!(Value::Int(1).kind(), Kind::Int);
        assert_eq!(Value::from("gaussian").kind(), Kind::Str);
        assert_eq!(Value::from(None::<f64>).kind(), Kind::Absent);
        assert_eq!(Value::from(Some(1.2)).kind(), Kind::Float);
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Bool(true).as_f64(), None);
        assert!(Value::Float(0.0).is_numeric());
        assert!(!Value::from("1.5").is_numeric());
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!([0, -9.8]);
        let value = Value::try_from(json).unwrap();
        assert_eq!(
            value,
            Value::Tuple(vec![Value::Int(0), Value::Float(-9.8)])
        );

        assert_eq!(
            Value::try_from(serde_json::Value::Null).unwrap(),
            Value::Absent
        );
        assert!(Value::try_from(serde_json::json!({"a": 1})).is_err());
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Value::Int(7)).unwrap();
        assert_eq!(json, r#"{"kind":"int","value":7}"#);
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Value::Int(7));
    }
}
