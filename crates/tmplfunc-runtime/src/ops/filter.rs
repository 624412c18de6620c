//! Filter: keep the elements a predicate accepts

use crate::error::FuncError;
use crate::invoke::{drive, Flow};
use crate::types::Type;
use crate::validate::{validate_callable, validate_sequence, CallContext};
use crate::value::Value;
use tracing::trace;

/// Keep the elements of `seq` for which `func` returns `true`
///
/// Kept elements are the original input values, in input order, and the
/// result has the input's declared element type. For a null sequence the
/// element type is the predicate's parameter type, or `any` for a
/// 0-input predicate.
pub fn filter(seq: &Value, func: &Value) -> Result<Value, FuncError> {
    let seq = validate_sequence(seq)?;
    let contract = validate_callable(func, CallContext::Predicate)?;
    trace!(len = seq.len(), arity_in = contract.arity_in(), "filter");

    let element = seq
        .declared_element()
        .or(contract.param.as_ref())
        .cloned()
        .unwrap_or(Type::Any);

    let mut kept = Vec::new();
    drive(&seq, &contract, |_, item, verdict| {
        if verdict.is_truthy() {
            kept.push(item.clone());
        }
        Flow::Continue
    })?;

    Ok(Value::array(element, kept))
}
