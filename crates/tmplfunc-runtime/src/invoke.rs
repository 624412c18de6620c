//! Invocation loop shared by every operation
//!
//! Walks a validated sequence, passes each element (or nothing) to a validated
//! callable, checks the error channel and hands the primary result to an
//! operation-specific reducer. The first failure aborts the whole loop.

use crate::error::{FuncError, HostError};
use crate::validate::{CallableContract, SequenceView};
use crate::value::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Reducer verdict after each element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Stop,
}

/// Run the callable over `seq`, feeding `(index, element, primary_result)` to `reduce`.
pub(crate) fn drive<F>(
    seq: &SequenceView<'_>,
    contract: &CallableContract<'_>,
    mut reduce: F,
) -> Result<(), FuncError>
where
    F: FnMut(usize, &Value, Value) -> Flow,
{
    // Known element type: one check covers every item
    let check_each = match (&contract.param, seq.static_element()) {
        (Some(param), Some(element)) => {
            if !seq.is_empty() && !element.is_assignable_to(param) {
                return Err(FuncError::ElementNotAssignable {
                    index: 0,
                    expected: param.clone(),
                    found: element.to_string(),
                });
            }
            false
        }
        (Some(_), None) => true,
        (None, _) => false,
    };

    for (index, element) in seq.items().iter().enumerate() {
        let args: &[Value] = match &contract.param {
            Some(param) => {
                if check_each && !element.is_assignable_to(param) {
                    return Err(FuncError::ElementNotAssignable {
                        index,
                        expected: param.clone(),
                        found: element.type_name(),
                    });
                }
                std::slice::from_ref(element)
            }
            None => &[],
        };

        let primary = call_checked(contract, index, args)?;
        if reduce(index, element, primary) == Flow::Stop {
            break;
        }
    }

    Ok(())
}

/// Invoke once and unpack the results according to the contract.
fn call_checked(
    contract: &CallableContract<'_>,
    index: usize,
    args: &[Value],
) -> Result<Value, FuncError> {
    let callable = contract.callable();
    let results = panic::catch_unwind(AssertUnwindSafe(|| callable.call(args))).map_err(|payload| {
        FuncError::CallableFailed {
            index,
            source: HostError::msg(panic_message(payload.as_ref())),
        }
    })?;

    if results.len() != contract.out_count() {
        return Err(FuncError::BadOutputArity {
            found: results.len(),
            index: Some(index),
        });
    }

    let mut results = results.into_iter();
    let primary = results.next().unwrap_or(Value::Null);
    match results.next() {
        None | Some(Value::Null) => Ok(primary),
        Some(Value::Error(source)) => Err(FuncError::CallableFailed { index, source }),
        Some(other) => Err(FuncError::SecondReturnNotError {
            found: other.type_name(),
            index: Some(index),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::native::NativeFunctionBuilder;
    use crate::types::Type;
    use crate::validate::{validate_callable, validate_sequence, CallContext};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn collect(seq: &Value, func: &Value) -> Result<Vec<(usize, Value)>, FuncError> {
        let view = validate_sequence(seq)?;
        let contract = validate_callable(func, CallContext::Transform)?;
        let mut seen = Vec::new();
        drive(&view, &contract, |i, _, out| {
            seen.push((i, out));
            Flow::Continue
        })?;
        Ok(seen)
    }

    fn identity(param: Type) -> Value {
        NativeFunctionBuilder::new("id")
            .param(param.clone())
            .returns(param)
            .with_implementation(|args| vec![args[0].clone()])
            .build()
            .unwrap()
    }

    #[test]
    fn test_zero_arity_ignores_elements() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let func = NativeFunctionBuilder::new("tick")
            .returns(Type::Int)
            .with_implementation(move |args| {
                assert!(args.is_empty());
                let n = counter.fetch_add(1, Ordering::SeqCst);
                vec![Value::Int(n as i64)]
            })
            .build()
            .unwrap();

        let seq = Value::any_array(vec![Value::Null, Value::string("x"), Value::Bool(false)]);
        let seen = collect(&seq, &func).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(seen[2], (2, Value::Int(2)));
    }

    #[test]
    fn test_static_mismatch_fails_before_any_call() {
        let seq = Value::array(Type::String, vec![Value::string("a")]);
        let err = collect(&seq, &identity(Type::Int)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ElementNotAssignable);
        assert_eq!(err.index(), Some(0));
    }

    #[test]
    fn test_static_mismatch_on_empty_sequence_is_fine() {
        let seq = Value::array(Type::String, vec![]);
        assert!(collect(&seq, &identity(Type::Int)).unwrap().is_empty());
    }

    #[test]
    fn test_per_element_check_names_index() {
        let seq = Value::any_array(vec![Value::Int(1), Value::Int(2), Value::string("three")]);
        let err = collect(&seq, &identity(Type::Int)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ElementNotAssignable);
        assert_eq!(err.index(), Some(2));
        assert!(err.to_string().contains("item 2 not assignable to int"));
    }

    #[test]
    fn test_wrong_result_count_at_runtime() {
        let liar = NativeFunctionBuilder::new("liar")
            .returns(Type::Int)
            .with_implementation(|_| vec![])
            .build()
            .unwrap();
        let seq = Value::array(Type::Int, vec![Value::Int(1)]);
        let err = collect(&seq, &liar).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadOutputArity);
        assert_eq!(err.index(), Some(0));
    }

    #[test]
    fn test_non_error_in_error_position() {
        let liar = NativeFunctionBuilder::new("liar")
            .returns(Type::Int)
            .returns(Type::Error)
            .with_implementation(|_| vec![Value::Int(1), Value::Int(2)])
            .build()
            .unwrap();
        let seq = Value::array(Type::Int, vec![Value::Int(1)]);
        let err = collect(&seq, &liar).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SecondReturnNotError);
    }

    #[test]
    fn test_panic_becomes_callable_failed() {
        let boom = NativeFunctionBuilder::new("boom")
            .param(Type::Int)
            .returns(Type::Int)
            .with_implementation(|args| {
                if args[0] == Value::Int(2) {
                    panic!("two is not allowed");
                }
                vec![args[0].clone()]
            })
            .build()
            .unwrap();
        let seq = Value::array(Type::Int, vec![Value::Int(1), Value::Int(2)]);
        let err = collect(&seq, &boom).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CallableFailed);
        assert_eq!(err.index(), Some(1));
        assert!(err.to_string().contains("two is not allowed"));
    }

    #[test]
    fn test_stop_ends_loop() {
        let seq = Value::array(Type::Int, (0..10).map(Value::Int).collect());
        let func = identity(Type::Int);
        let view = validate_sequence(&seq).unwrap();
        let contract = validate_callable(&func, CallContext::Transform).unwrap();
        let mut visited = 0;
        drive(&view, &contract, |i, _, _| {
            visited += 1;
            if i == 3 {
                Flow::Stop
            } else {
                Flow::Continue
            }
        })
        .unwrap();
        assert_eq!(visited, 4);
    }
}
