//! Small demo function set
//!
//! `inc`, `odd` and `false`, used by the CLI, benchmarks and tests.

use crate::registry::FuncMap;
use crate::types::{Signature, Type};
use crate::value::{Callable, NativeFn, Value};
use std::sync::Arc;

fn callable(name: &str, signature: Signature, implementation: NativeFn) -> Value {
    Value::Function(Callable::new(name, signature, implementation))
}

/// `fn(int) -> int`, adds one
pub fn inc() -> Value {
    callable(
        "inc",
        Signature::new(vec![Type::Int], vec![Type::Int]),
        Arc::new(|args: &[Value]| match args {
            [Value::Int(i)] => vec![Value::Int(i.wrapping_add(1))],
            _ => vec![Value::Null],
        }),
    )
}

/// `fn(int) -> bool`, `i % 2 == 1`
///
/// The remainder keeps the sign of `i`, so negative odd numbers give `false`.
pub fn odd() -> Value {
    callable(
        "odd",
        Signature::new(vec![Type::Int], vec![Type::Bool]),
        Arc::new(|args: &[Value]| match args {
            [Value::Int(i)] => vec![Value::Bool(i % 2 == 1)],
            _ => vec![Value::Bool(false)],
        }),
    )
}

/// `fn() -> bool`, always false
pub fn always_false() -> Value {
    callable(
        "false",
        Signature::new(vec![], vec![Type::Bool]),
        Arc::new(|_: &[Value]| vec![Value::Bool(false)]),
    )
}

/// The demo functions keyed by name
pub fn simple_functions() -> FuncMap {
    let mut table = FuncMap::new();
    table.insert("inc".to_string(), inc());
    table.insert("odd".to_string(), odd());
    table.insert("false".to_string(), always_false());
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inc() {
        let f = inc();
        assert_eq!(f.as_callable().unwrap().call(&[Value::Int(1)]), vec![Value::Int(2)]);
    }

    #[test]
    fn test_odd_uses_signed_remainder() {
        let f = odd();
        let call = |i| f.as_callable().unwrap().call(&[Value::Int(i)]);
        assert_eq!(call(3), vec![Value::Bool(true)]);
        assert_eq!(call(4), vec![Value::Bool(false)]);
        assert_eq!(call(-3), vec![Value::Bool(false)]);
    }

    #[test]
    fn test_table() {
        let table = simple_functions();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table["false"].as_callable().unwrap().signature().to_string(),
            "fn() -> bool"
        );
    }
}
