//! # Values and Expected Types
//!
//! Every entry declares one of four primitive types. Raw text typed by the
//! user is coerced into that type before anything is committed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::FormError;

/// The primitive type an entry's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedType {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
}

impl ExpectedType {
    pub fn label(&self) -> &'static str {
        match self {
            ExpectedType::String => "string",
            ExpectedType::Integer => "integer",
            ExpectedType::Float => "float",
            ExpectedType::Boolean => "boolean",
        }
    }

    /// Parse raw captured text into a typed value.
    ///
    /// Strings are kept verbatim. Numbers and booleans ignore surrounding
    /// whitespace. Nothing is mutated here; committing is the caller's job.
    pub fn coerce(&self, field_name: &str, raw: &str) -> Result<Value, FormError> {
        let rejected = || FormError::TypeCoercion {
            field: field_name.to_string(),
            expected: *self,
            raw: raw.to_string(),
        };
        let trimmed = raw.trim();

        match self {
            ExpectedType::String => Ok(Value::String(raw.to_string())),
            ExpectedType::Integer => trimmed
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| rejected()),
            ExpectedType::Float => match trimmed.parse::<f64>() {
                Ok(x) if x.is_finite() => Ok(Value::Float(x)),
                _ => Err(rejected()),
            },
            ExpectedType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "on" | "1" => Ok(Value::Boolean(true)),
                "false" | "no" | "n" | "off" | "0" => Ok(Value::Boolean(false)),
                _ => Err(rejected()),
            },
        }
    }

    /// Check a value against this type, widening integers for float entries.
    /// Non-finite floats are refused since they cannot be exported.
    pub fn accept(&self, value: Value) -> Option<Value> {
        match (self, value) {
            (ExpectedType::String, v @ Value::String(_)) => Some(v),
            (ExpectedType::Integer, v @ Value::Integer(_)) => Some(v),
            (ExpectedType::Float, Value::Float(x)) if x.is_finite() => Some(Value::Float(x)),
            (ExpectedType::Float, Value::Integer(i)) => Some(Value::Float(i as f64)),
            (ExpectedType::Boolean, v @ Value::Boolean(_)) => Some(v),
            _ => None,
        }
    }
}

impl FromStr for ExpectedType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" | "string" => Ok(ExpectedType::String),
            "int" | "integer" => Ok(ExpectedType::Integer),
            "float" => Ok(ExpectedType::Float),
            "bool" | "boolean" => Ok(ExpectedType::Boolean),
            other => Err(FormError::Configuration(format!(
                "'{other}' is not in the list of allowed types (str, int, float, bool)"
            ))),
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed entry value.
///
/// Untagged so it reads naturally from TOML and exports as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn type_of(&self) -> ExpectedType {
        match self {
            Value::String(_) => ExpectedType::String,
            Value::Integer(_) => ExpectedType::Integer,
            Value::Float(_) => ExpectedType::Float,
            Value::Boolean(_) => ExpectedType::Boolean,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            // Keep the fractional part so 3.0 does not read as an integer.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_coercion() {
        assert_eq!(
            ExpectedType::Integer.coerce("age", "42").unwrap(),
            Value::Integer(42)
        );
        assert_eq!(
            ExpectedType::Integer.coerce("age", " -7 ").unwrap(),
            Value::Integer(-7)
        );
    }

    #[test]
    fn test_integer_coercion_rejects_text() {
        let err = ExpectedType::Integer.coerce("age", "abc").unwrap_err();
        match err {
            FormError::TypeCoercion {
                field,
                expected,
                raw,
            } => {
                assert_eq!(field, "age");
                assert_eq!(expected, ExpectedType::Integer);
                assert_eq!(raw, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(
            ExpectedType::Float.coerce("ratio", "2.5").unwrap(),
            Value::Float(2.5)
        );
        assert!(ExpectedType::Float.coerce("ratio", "two").is_err());
    }

    #[test]
    fn test_float_coercion_rejects_non_finite() {
        for raw in ["NaN", "inf", "-infinity", "1e400"] {
            let err = ExpectedType::Float.coerce("ratio", raw).unwrap_err();
            assert!(
                matches!(err, FormError::TypeCoercion { ref field, .. } if field == "ratio"),
                "{raw}: {err:?}"
            );
        }
    }

    #[test]
    fn test_accept_refuses_non_finite_float() {
        assert_eq!(ExpectedType::Float.accept(Value::Float(f64::NAN)), None);
        assert_eq!(ExpectedType::Float.accept(Value::Float(f64::INFINITY)), None);
    }

    #[test]
    fn test_float_display_keeps_fraction() {
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Integer(3).to_string(), "3");
    }

    #[test]
    fn test_boolean_coercion_accepts_common_spellings() {
        for raw in ["true", "YES", "y", "On", "1"] {
            assert_eq!(
                ExpectedType::Boolean.coerce("flag", raw).unwrap(),
                Value::Boolean(true),
                "{raw}"
            );
        }
        for raw in ["false", "No", "n", "OFF", "0"] {
            assert_eq!(
                ExpectedType::Boolean.coerce("flag", raw).unwrap(),
                Value::Boolean(false),
                "{raw}"
            );
        }
        assert!(ExpectedType::Boolean.coerce("flag", "maybe").is_err());
    }

    #[test]
    fn test_string_coercion_keeps_raw_text() {
        assert_eq!(
            ExpectedType::String.coerce("name", "  padded ").unwrap(),
            Value::String("  padded ".to_string())
        );
    }

    #[test]
    fn test_type_names_parse() {
        assert_eq!("str".parse::<ExpectedType>().unwrap(), ExpectedType::String);
        assert_eq!("int".parse::<ExpectedType>().unwrap(), ExpectedType::Integer);
        assert_eq!("boolean".parse::<ExpectedType>().unwrap(), ExpectedType::Boolean);
        assert!(matches!(
            "list".parse::<ExpectedType>(),
            Err(FormError::Configuration(_))
        ));
    }

    #[test]
    fn test_accept_widens_integer_to_float() {
        assert_eq!(
            ExpectedType::Float.accept(Value::Integer(3)),
            Some(Value::Float(3.0))
        );
        assert_eq!(ExpectedType::Integer.accept(Value::from("3")), None);
    }

    #[test]
    fn test_untagged_value_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            a: Value,
            b: Value,
            c: Value,
            d: Value,
        }
        let holder: Holder = toml::from_str("a = 1\nb = 1.5\nc = true\nd = \"x\"").unwrap();
        assert_eq!(holder.a, Value::Integer(1));
        assert_eq!(holder.b, Value::Float(1.5));
        assert_eq!(holder.c, Value::Boolean(true));
        assert_eq!(holder.d, Value::from("x"));
    }
}
