//! Runtime type model
//!
//! A deliberately small, closed set of types: enough to describe the element
//! type of an array and the signature of a callable, and to answer "can a value
//! of this type be passed where that type is expected?".
//!
//! `any` and `error` are interface types. Every type is assignable to `any`;
//! only `error` is assignable to `error`. There are no implicit numeric
//! conversions (`int` is not assignable to `float`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A runtime type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// Universal interface type, accepts every value
    Any,
    /// Boolean
    Bool,
    /// Signed 64-bit integer
    Int,
    /// IEEE 754 double
    Float,
    /// UTF-8 string
    String,
    /// Error interface (the type of a callable's error channel)
    Error,
    /// Array with a declared element type
    Array(Box<Type>),
    /// Callable with a signature
    Function(Box<Signature>),
}

/// Parameter and result types of a callable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    /// Parameter types, in order
    pub params: Vec<Type>,
    /// Result types, in order
    pub results: Vec<Type>,
}

impl Type {
    /// Array type with the given element type
    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    /// Function type with the given signature
    pub fn function(signature: Signature) -> Self {
        Type::Function(Box::new(signature))
    }

    /// Check whether a value of this type may be used where `target` is expected
    pub fn is_assignable_to(&self, target: &Type) -> bool {
        self == target || matches!(target, Type::Any)
    }

    /// Interface types hold values of other types; their contents must be
    /// inspected individually.
    pub fn is_interface(&self) -> bool {
        matches!(self, Type::Any | Type::Error)
    }

    /// Types whose zero value is null
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            Type::Any | Type::Error | Type::Array(_) | Type::Function(_)
        )
    }

    /// Element type (array types only)
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// Signature (function types only)
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Type::Function(sig) => Some(sig),
            _ => None,
        }
    }
}

impl Signature {
    pub fn new(params: Vec<Type>, results: Vec<Type>) -> Self {
        Self { params, results }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => write!(f, "any"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Error => write!(f, "error"),
            Type::Array(elem) => match elem.as_ref() {
                // fn(..) -> ..[] would be ambiguous
                Type::Function(_) => write!(f, "({})[]", elem),
                _ => write!(f, "{}[]", elem),
            },
            Type::Function(sig) => write!(f, "{}", sig),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "fn({})", params)?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " -> {}", single),
            many => {
                let results = many
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, " -> ({})", results)
            }
        }
    }
}
