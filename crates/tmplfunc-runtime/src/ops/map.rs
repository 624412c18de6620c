//! Transform: apply a callable to every element

use crate::error::FuncError;
use crate::invoke::{drive, Flow};
use crate::types::Type;
use crate::validate::{validate_callable, validate_sequence, CallContext};
use crate::value::Value;
use tracing::{debug, trace};

/// Map every element of `seq` through `func`
///
/// The result is a new array whose element type is `func`'s declared primary
/// result type, or `any` if some result was not assignable to it. A null
/// sequence maps to an empty array.
pub fn map(seq: &Value, func: &Value) -> Result<Value, FuncError> {
    let seq = validate_sequence(seq)?;
    let contract = validate_callable(func, CallContext::Transform)?;
    trace!(
        len = seq.len(),
        arity_in = contract.arity_in(),
        primary = %contract.primary,
        "map"
    );

    let mut acc = ResultAccumulator::new(contract.primary.clone(), seq.len());
    drive(&seq, &contract, |index, _, result| {
        acc.push(index, result);
        Flow::Continue
    })?;

    Ok(acc.finish())
}

/// Ordered output buffer with a running declared element type
#[derive(Debug)]
pub(crate) struct ResultAccumulator {
    element: Type,
    items: Vec<Value>,
}

impl ResultAccumulator {
    pub(crate) fn new(element: Type, capacity: usize) -> Self {
        Self {
            element,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append a result, widening to `any` once a result does not fit
    pub(crate) fn push(&mut self, index: usize, value: Value) {
        if self.element != Type::Any && !value.is_assignable_to(&self.element) {
            debug!(
                index,
                declared = %self.element,
                found = %value.type_name(),
                "widening map result to any"
            );
            self.element = Type::Any;
        }
        self.items.push(value);
    }

    pub(crate) fn finish(self) -> Value {
        Value::array(self.element, self.items)
    }
}
