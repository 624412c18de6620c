//! Function table registration
//!
//! Exposes the four operations as callables following the host's calling
//! convention, `fn(any, any) -> (any, error)`, ready to be installed into a
//! template engine's function table before templates are compiled.

use crate::error::HostError;
use crate::ops::{Operation, NOT_FOUND};
use crate::types::{Signature, Type};
use crate::value::{Callable, NativeFn, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name-to-callable table
pub type FuncMap = BTreeMap<String, Value>;

/// Callable wrapping one operation. Failures travel through the error channel.
pub fn operation_function(op: Operation) -> Value {
    // findIndex reports NOT_FOUND alongside an error, other operations null
    let (primary, on_error) = match op {
        Operation::FindIndex => (Type::Int, Value::Int(NOT_FOUND)),
        _ => (Type::Any, Value::Null),
    };
    let implementation: NativeFn = Arc::new(move |args: &[Value]| {
        let outcome = match args {
            [seq, func] => op.apply(seq, func).map_err(HostError::new),
            _ => Err(HostError::msg(format!(
                "{}() expects 2 arguments, got {}",
                op.name(),
                args.len()
            ))),
        };
        match outcome {
            Ok(value) => vec![value, Value::Null],
            Err(err) => vec![on_error.clone(), Value::Error(err)],
        }
    });

    Value::Function(Callable::new(
        op.name(),
        Signature::new(vec![Type::Any, Type::Any], vec![primary, Type::Error]),
        implementation,
    ))
}

/// The four operations keyed by host name
pub fn functions() -> FuncMap {
    Operation::ALL
        .iter()
        .map(|op| (op.name().to_string(), operation_function(*op)))
        .collect()
}

/// Install the four operations into any host function table
pub fn install<T>(table: &mut T)
where
    T: Extend<(String, Value)>,
{
    table.extend(functions());
}

/// Merge two tables; entries in `overwrite_with` win
pub fn merge(original: &FuncMap, overwrite_with: &FuncMap) -> FuncMap {
    let mut merged = original.clone();
    merged.extend(
        overwrite_with
            .iter()
            .map(|(name, value)| (name.clone(), value.clone())),
    );
    merged
}
