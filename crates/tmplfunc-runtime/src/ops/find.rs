//! Search: first element a predicate accepts

use crate::error::FuncError;
use crate::invoke::{drive, Flow};
use crate::validate::{validate_callable, validate_sequence, CallContext};
use crate::value::Value;
use tracing::trace;

/// Returned by [`find_index`] when nothing matches
pub const NOT_FOUND: i64 = -1;

/// First element of `seq` for which `func` returns `true`, or null
pub fn find(seq: &Value, func: &Value) -> Result<Value, FuncError> {
    let index = find_index(seq, func)?;
    if index == NOT_FOUND {
        return Ok(Value::Null);
    }
    Ok(seq
        .as_array()
        .and_then(|arr| arr.get(index as usize))
        .cloned()
        .unwrap_or(Value::Null))
}

/// Position of the first element of `seq` for which `func` returns `true`,
/// or [`NOT_FOUND`]
pub fn find_index(seq: &Value, func: &Value) -> Result<i64, FuncError> {
    let seq = validate_sequence(seq)?;
    let contract = validate_callable(func, CallContext::Predicate)?;
    trace!(len = seq.len(), arity_in = contract.arity_in(), "findIndex");

    let mut found = NOT_FOUND;
    drive(&seq, &contract, |index, _, verdict| {
        if verdict.is_truthy() {
            found = index as i64;
            Flow::Stop
        } else {
            Flow::Continue
        }
    })?;

    Ok(found)
}
