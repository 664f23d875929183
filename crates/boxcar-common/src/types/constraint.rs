//! TypeConstraint - what a resolved setting value is allowed to be
//!
//! Settings are declared with intentionally loose types ("float or absent")
//! to support optional and derived parameters. The coercion policy lives
//! here so the resolver only has to call [`TypeConstraint::coerce`].
//!
//! Policy:
//! - `Exactly(Float)`: ints are widened to floats, everything else must be a float
//! - `Exactly(k)`: the value's kind must be `k`
//! - `OneOf(ks)`: `Absent` passes only if listed; numeric values become floats
//!   when `Float` is listed (float wins over int); otherwise the value's kind
//!   must be listed
//! - `Any` (alone or listed) accepts every value unchanged

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::{Kind, Value};

/// Declared type of a setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeConstraint {
    /// A single required kind
    Exactly(Kind),
    /// Ordered alternatives, possibly including [`Kind::Absent`]
    OneOf(Vec<Kind>),
}

/// A value that cannot satisfy a constraint
#[derive(Debug, Clone, PartialEq, Error)]
#[error("value {value} of type {} does not satisfy {expected}", .value.kind())]
pub struct ConstraintViolation {
    pub value: Value,
    pub expected: TypeConstraint,
}

impl TypeConstraint {
    pub fn any() -> Self {
        TypeConstraint::Exactly(Kind::Any)
    }

    pub fn float() -> Self {
        TypeConstraint::Exactly(Kind::Float)
    }

    pub fn int() -> Self {
        TypeConstraint::Exactly(Kind::Int)
    }

    pub fn bool() -> Self {
        TypeConstraint::Exactly(Kind::Bool)
    }

    pub fn str() -> Self {
        TypeConstraint::Exactly(Kind::Str)
    }

    pub fn tuple() -> Self {
        TypeConstraint::Exactly(Kind::Tuple)
    }

    /// `kind` or absent
    pub fn optional(kind: Kind) -> Self {
        TypeConstraint::OneOf(vec![kind, Kind::Absent])
    }

    pub fn one_of(kinds: &[Kind]) -> Self {
        TypeConstraint::OneOf(kinds.to_vec())
    }

    fn admits(&self, kind: Kind) -> bool {
        match self {
            TypeConstraint::Exactly(k) => *k == kind,
            TypeConstraint::OneOf(kinds) => kinds.contains(&kind),
        }
    }

    /// Whether the value is acceptable, possibly after coercion
    pub fn satisfies(&self, value: &Value) -> bool {
        if self.admits(Kind::Any) {
            return true;
        }
        if value.is_numeric() && self.admits(Kind::Float) {
            return true;
        }
        self.admits(value.kind())
    }

    /// Check and coerce a terminal value
    pub fn coerce(&self, value: Value) -> Result<Value, ConstraintViolation> {
        if !self.satisfies(&value) {
            return Err(ConstraintViolation {
                value,
                expected: self.clone(),
            });
        }

        match value {
            Value::Int(i) if self.admits(Kind::Float) => Ok(Value::Float(i as f64)),
            other => Ok(other),
        }
    }
}

impl std::fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeConstraint::Exactly(kind) => write!(f, "{}", kind),
            TypeConstraint::OneOf(kinds) => {
                let names: Vec<String> = kinds.iter().map(ToString::to_string).collect();
                write!(f, "({})", names.join(" | "))
            }
        }
    }
}

impl From<Kind> for TypeConstraint {
    fn from(kind: Kind) -> Self {
        TypeConstraint::Exactly(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_float_widens_ints() {
        let c = TypeConstraint::float();
        assert_eq!(c.coerce(Value::Int(5)).unwrap(), Value::Float(5.0));
        assert_eq!(c.coerce(Value::Int(0)).unwrap(), Value::Float(0.0));
        assert_eq!(c.coerce(Value::Float(0.15)).unwrap(), Value::Float(0.15));
    }

    #[test]
    fn test_single_float_rejects_non_numeric() {
        let c = TypeConstraint::float();
        assert!(c.coerce(Value::from("fast")).is_err());
        assert!(c.coerce(Value::Bool(true)).is_err());
        assert!(c.coerce(Value::Absent).is_err());
    }

    #[test]
    fn test_single_kind_requires_exact_match() {
        let c = TypeConstraint::int();
        assert_eq!(c.coerce(Value::Int(150)).unwrap(), Value::Int(150));
        let err = c.coerce(Value::Float(1.5)).unwrap_err();
        assert_eq!(err.value, Value::Float(1.5));
        assert_eq!(err.expected, TypeConstraint::int());
    }

    #[test]
    fn test_optional_float_accepts_absent() {
        let c = TypeConstraint::optional(Kind::Float);
        assert_eq!(c.coerce(Value::Absent).unwrap(), Value::Absent);
        assert_eq!(c.coerce(Value::Int(1)).unwrap(), Value::Float(1.0));
    }

    #[test]
    fn test_one_of_without_absent_rejects_absent() {
        let c = TypeConstraint::one_of(&[Kind::Int, Kind::Str]);
        assert!(!c.satisfies(&Value::Absent));
        assert!(c.coerce(Value::Absent).is_err());
    }

    #[test]
    fn test_float_takes_priority_over_int() {
        let c = TypeConstraint::one_of(&[Kind::Int, Kind::Float]);
        assert_eq!(c.coerce(Value::Int(7)).unwrap(), Value::Float(7.0));
    }

    #[test]
    fn test_one_of_accepts_listed_kind_unchanged() {
        let c = TypeConstraint::optional(Kind::Str);
        assert_eq!(
            c.coerce(Value::from("multiply")).unwrap(),
            Value::from("multiply")
        );
        assert!(c.coerce(Value::Int(3)).is_err());
    }

    #[test]
    fn test_any_accepts_everything() {
        let c = TypeConstraint::any();
        assert!(c.satisfies(&Value::callable("fitness_function")));
        assert_eq!(c.coerce(Value::Int(3)).unwrap(), Value::Int(3));
        assert!(c.satisfies(&Value::Absent));
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeConstraint::float().to_string(), "float");
        assert_eq!(
            TypeConstraint::optional(Kind::Float).to_string(),
            "(float | None)"
        );
    }

    proptest! {
        #[test]
        fn prop_float_admits_every_int(i in any::<i64>()) {
            let coerced = TypeConstraint::float().coerce(Value::Int(i)).unwrap();
            prop_assert_eq!(coerced, Value::Float(i as f64));
        }

        #[test]
        fn prop_int_rejects_floats(x in -1e9f64..1e9) {
            prop_assert!(TypeConstraint::int().coerce(Value::Float(x)).is_err());
        }
    }
}
