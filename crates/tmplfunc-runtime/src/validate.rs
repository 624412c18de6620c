//! Signature and sequence validation
//!
//! Classifies the two dynamically-typed arguments of every operation before
//! anything is invoked: the first must be an array (or null), the second a
//! callable whose signature fits the operation's contract.

use crate::error::FuncError;
use crate::types::Type;
use crate::value::{Callable, Value};

/// What the operation does with the callable's primary result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallContext {
    /// Any primary result type (map)
    Transform,
    /// Primary result must be bool (filter, find, findIndex)
    Predicate,
}

/// Normalized shape of a validated callable
#[derive(Debug, Clone)]
pub struct CallableContract<'a> {
    callable: &'a Callable,
    /// Parameter type, `None` for a 0-input callable
    pub param: Option<Type>,
    /// Declared primary result type
    pub primary: Type,
    /// Whether result position 2 is an error channel
    pub has_error_channel: bool,
}

impl<'a> CallableContract<'a> {
    pub fn callable(&self) -> &'a Callable {
        self.callable
    }

    pub fn arity_in(&self) -> usize {
        usize::from(self.param.is_some())
    }

    pub fn out_count(&self) -> usize {
        if self.has_error_channel {
            2
        } else {
            1
        }
    }
}

/// Validate the callable argument against the contract for `context`
pub fn validate_callable(value: &Value, context: CallContext) -> Result<CallableContract<'_>, FuncError> {
    let callable = value.as_callable().ok_or_else(|| FuncError::NotAFunction {
        found: value.kind().to_string(),
    })?;
    let signature = callable.signature();

    let param = match signature.params.as_slice() {
        [] => None,
        [only] => Some(only.clone()),
        many => return Err(FuncError::BadInputArity { found: many.len() }),
    };

    let (primary, error_channel) = match signature.results.as_slice() {
        [primary] => (primary, None),
        [primary, second] => (primary, Some(second)),
        other => {
            return Err(FuncError::BadOutputArity {
                found: other.len(),
                index: None,
            })
        }
    };

    if let Some(second) = error_channel {
        if !second.is_assignable_to(&Type::Error) {
            return Err(FuncError::SecondReturnNotError {
                found: second.to_string(),
                index: None,
            });
        }
    }

    if context == CallContext::Predicate && !primary.is_assignable_to(&Type::Bool) {
        return Err(FuncError::FirstReturnNotBool {
            found: primary.clone(),
        });
    }

    Ok(CallableContract {
        callable,
        param,
        primary: primary.clone(),
        has_error_channel: error_channel.is_some(),
    })
}

/// Read-only view of a validated sequence argument
#[derive(Debug, Clone, Copy)]
pub struct SequenceView<'a> {
    items: &'a [Value],
    declared: Option<&'a Type>,
}

impl<'a> SequenceView<'a> {
    pub fn items(&self) -> &'a [Value] {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Declared element type; `None` when the sequence was null
    pub fn declared_element(&self) -> Option<&'a Type> {
        self.declared
    }

    /// Element type every item is known to have. `None` for interface-typed
    /// and null sequences, whose items must be checked one by one.
    ///
    /// [`validate_sequence`] has already verified the items of a concretely
    /// typed array against this type.
    pub fn static_element(&self) -> Option<&'a Type> {
        self.declared.filter(|ty| !ty.is_interface())
    }
}

/// Validate the sequence argument. Null is an empty sequence of unknown type.
///
/// An array with a concrete element type must hold only items of that type;
/// the first item that does not is reported as `ElementNotAssignable`.
pub fn validate_sequence(value: &Value) -> Result<SequenceView<'_>, FuncError> {
    match value {
        Value::Array(arr) => {
            let declared = arr.element_type();
            if !declared.is_interface() {
                let stray = arr
                    .iter()
                    .enumerate()
                    .find(|(_, item)| !item.is_assignable_to(declared));
                if let Some((index, item)) = stray {
                    return Err(FuncError::ElementNotAssignable {
                        index,
                        expected: declared.clone(),
                        found: item.type_name(),
                    });
                }
            }
            Ok(SequenceView {
                items: arr.as_slice(),
                declared: Some(declared),
            })
        }
        Value::Null => Ok(SequenceView {
            items: &[],
            declared: None,
        }),
        other => Err(FuncError::NotASlice {
            found: other.kind().to_string(),
        }),
    }
}
