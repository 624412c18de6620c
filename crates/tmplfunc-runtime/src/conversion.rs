//! Type conversion between Rust and runtime values
//!
//! Provides traits and implementations for bidirectional conversion:
//! - `ToValue` - Convert Rust types to `Value`
//! - `FromValue` - Convert `Value` to Rust types
//! - `StaticType` - The runtime `Type` a Rust type converts to, so that
//!   `Vec<T>` becomes a typed `T[]` array rather than `any[]`
//!
//! Plus JSON interop for hosts that receive their data as JSON.
//!
//! # Examples
//!
//! ```
//! use tmplfunc_runtime::conversion::{FromValue, ToValue};
//! use tmplfunc_runtime::types::Type;
//! use tmplfunc_runtime::Value;
//!
//! let value = vec![1i64, 2, 3].to_value();
//! assert_eq!(value.as_array().unwrap().element_type(), &Type::Int);
//!
//! let back: Vec<i64> = FromValue::from_value(&value).unwrap();
//! assert_eq!(back, vec![1, 2, 3]);
//! ```

use crate::types::Type;
use crate::value::Value;
use thiserror::Error;

/// Error type for value conversion failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
    /// Array element type mismatch
    #[error("Array element type mismatch at index {index}: expected {expected}, found {found}")]
    ArrayElementTypeMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    /// Value has no representation in the target format
    #[error("Cannot represent {what} as {target}")]
    Unrepresentable { what: String, target: &'static str },
}

/// Trait for converting `Value` to Rust types
pub trait FromValue: Sized {
    /// # Errors
    ///
    /// Returns `ConversionError` if the value cannot be converted to the target type.
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// Trait for converting Rust types to `Value`
pub trait ToValue {
    fn to_value(self) -> Value;
}

/// Runtime type of the values a Rust type converts to
pub trait StaticType {
    fn static_type() -> Type;
}

fn mismatch(expected: &str, value: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected: expected.to_string(),
        found: value.type_name(),
    }
}

// Implementations for i64 (int)

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Int(i) => Ok(*i),
            _ => Err(mismatch("int", value)),
        }
    }
}

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

impl StaticType for i64 {
    fn static_type() -> Type {
        Type::Int
    }
}

// Implementations for f64 (float)

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(n) => Ok(*n),
            _ => Err(mismatch("float", value)),
        }
    }
}

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Float(self)
    }
}

impl StaticType for f64 {
    fn static_type() -> Type {
        Type::Float
    }
}

// Implementations for bool

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(mismatch("bool", value)),
        }
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl StaticType for bool {
    fn static_type() -> Type {
        Type::Bool
    }
}

// Implementations for String

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(s) => Ok(s.to_string()),
            _ => Err(mismatch("string", value)),
        }
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::string(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::string(self)
    }
}

impl StaticType for String {
    fn static_type() -> Type {
        Type::String
    }
}

// () is null

impl FromValue for () {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(()),
            _ => Err(mismatch("null", value)),
        }
    }
}

impl ToValue for () {
    fn to_value(self) -> Value {
        Value::Null
    }
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl StaticType for Value {
    fn static_type() -> Type {
        Type::Any
    }
}

// Option<T> maps None to null

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

// Vec<T> is a typed array

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        let arr = value.as_array().ok_or_else(|| mismatch("array", value))?;
        arr.iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_value(item).map_err(|err| match err {
                    ConversionError::TypeMismatch { expected, found } => {
                        ConversionError::ArrayElementTypeMismatch {
                            index,
                            expected,
                            found,
                        }
                    }
                    other => other,
                })
            })
            .collect()
    }
}

impl<T: ToValue + StaticType> ToValue for Vec<T> {
    fn to_value(self) -> Value {
        Value::array(
            T::static_type(),
            self.into_iter().map(ToValue::to_value).collect(),
        )
    }
}

impl<T: StaticType> StaticType for Vec<T> {
    fn static_type() -> Type {
        Type::array(T::static_type())
    }
}

// JSON interop

/// Convert JSON into a value, typing each array by its common element type
///
/// Integers become `int`, other numbers `float`. An array whose items all have
/// the same runtime type gets that element type; mixed, empty or null-holding
/// arrays are `any[]`. Objects are rejected.
pub fn from_json(json: &serde_json::Value) -> Result<Value, ConversionError> {
    convert_json(json, false)
}

/// Like [`from_json`] but every array is `any[]`
pub fn from_json_untyped(json: &serde_json::Value) -> Result<Value, ConversionError> {
    convert_json(json, true)
}

fn convert_json(json: &serde_json::Value, untyped: bool) -> Result<Value, ConversionError> {
    use serde_json::Value as Json;

    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::string(s.as_str()),
        Json::Array(items) => {
            let values = items
                .iter()
                .map(|item| convert_json(item, untyped))
                .collect::<Result<Vec<_>, _>>()?;
            let element = if untyped {
                Type::Any
            } else {
                common_type(&values)
            };
            Value::array(element, values)
        }
        Json::Object(_) => {
            return Err(ConversionError::Unrepresentable {
                what: "object".to_string(),
                target: "value",
            })
        }
    })
}

fn common_type(values: &[Value]) -> Type {
    let mut types = values.iter().map(Value::runtime_type);
    match types.next() {
        Some(Some(first)) if types.all(|ty| ty.as_ref() == Some(&first)) => first,
        _ => Type::Any,
    }
}

/// Convert a value to JSON. Errors become their message; functions are rejected.
pub fn to_json(value: &Value) -> Result<serde_json::Value, ConversionError> {
    use serde_json::Value as Json;

    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::from(*i),
        Value::Float(n) => serde_json::Number::from_f64(*n)
            .map(Json::Number)
            .ok_or_else(|| ConversionError::Unrepresentable {
                what: n.to_string(),
                target: "JSON",
            })?,
        Value::String(s) => Json::String(s.to_string()),
        Value::Array(arr) => Json::Array(arr.iter().map(to_json).collect::<Result<_, _>>()?),
        Value::Error(err) => Json::String(err.to_string()),
        Value::Function(func) => {
            return Err(ConversionError::Unrepresentable {
                what: format!("function {}", func.name()),
                target: "JSON",
            })
        }
    })
}
