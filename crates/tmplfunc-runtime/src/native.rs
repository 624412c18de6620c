//! Native function registration and builder
//!
//! Builds `Value::Function` callables from Rust closures, declaring the
//! parameter and result types the higher-order operations validate against.
//!
//! # Examples
//!
//! ```rust
//! use tmplfunc_runtime::native::NativeFunctionBuilder;
//! use tmplfunc_runtime::types::Type;
//! use tmplfunc_runtime::value::Value;
//! use tmplfunc_runtime::HostError;
//!
//! // fn(int) -> int
//! let double = NativeFunctionBuilder::new("double")
//!     .param(Type::Int)
//!     .returns(Type::Int)
//!     .with_implementation(|args| match &args[0] {
//!         Value::Int(i) => vec![Value::Int(i * 2)],
//!         _ => vec![Value::Null],
//!     })
//!     .build()
//!     .unwrap();
//!
//! // fn(int) -> (int, error)
//! let checked = NativeFunctionBuilder::new("checked_double")
//!     .param(Type::Int)
//!     .returns(Type::Int)
//!     .with_fallible(|args| match &args[0] {
//!         Value::Int(i) => i
//!             .checked_mul(2)
//!             .map(Value::Int)
//!             .ok_or_else(|| HostError::msg("overflow")),
//!         other => Err(HostError::msg(format!("not an int: {}", other))),
//!     })
//!     .build()
//!     .unwrap();
//! ```

use crate::error::HostError;
use crate::types::{Signature, Type};
use crate::value::{Callable, NativeFn, Value};
use std::sync::Arc;
use thiserror::Error;

/// Builder for callables with a declared signature
///
/// Parameter and result types are declared explicitly; nothing is inferred
/// from the closure.
pub struct NativeFunctionBuilder {
    name: String,
    params: Vec<Type>,
    results: Vec<Type>,
    implementation: Option<NativeFn>,
}

impl NativeFunctionBuilder {
    /// Create a new native function builder with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            results: Vec::new(),
            implementation: None,
        }
    }

    /// Append a parameter type
    pub fn param(mut self, ty: Type) -> Self {
        self.params.push(ty);
        self
    }

    /// Append a result type
    pub fn returns(mut self, ty: Type) -> Self {
        self.results.push(ty);
        self
    }

    /// Set the raw implementation
    ///
    /// The closure must return exactly one value per declared result.
    pub fn with_implementation<F>(mut self, implementation: F) -> Self
    where
        F: Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        self.implementation = Some(Arc::new(implementation));
        self
    }

    /// Set an implementation that can fail
    ///
    /// Appends an `error` result to the signature. `Ok(v)` is returned as
    /// `[v, null]`, `Err(e)` as `[null, e]`.
    pub fn with_fallible<F>(mut self, implementation: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HostError> + Send + Sync + 'static,
    {
        self.results.push(Type::Error);
        self.implementation = Some(Arc::new(move |args: &[Value]| match implementation(args) {
            Ok(value) => vec![value, Value::Null],
            Err(err) => vec![Value::Null, Value::Error(err)],
        }));
        self
    }

    /// Build the callable value
    pub fn build(self) -> Result<Value, BuildError> {
        let implementation = self
            .implementation
            .ok_or_else(|| BuildError::MissingImplementation(self.name.clone()))?;

        Ok(Value::Function(Callable::new(
            self.name,
            Signature::new(self.params, self.results),
            implementation,
        )))
    }
}

/// Errors that can occur when building a native function
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No implementation was provided
    #[error("Native function '{0}' missing implementation")]
    MissingImplementation(String),
}
