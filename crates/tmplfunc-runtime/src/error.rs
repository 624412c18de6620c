//! Error taxonomy
//!
//! Every failure of `map`, `filter`, `find` and `findIndex` is a [`FuncError`].
//! Callers that only care about the category compare [`FuncError::kind`]
//! against an [`ErrorKind`] constant.

use crate::types::Type;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error category, compared by equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotASlice,
    NotAFunction,
    BadInputArity,
    BadOutputArity,
    FirstReturnNotBool,
    SecondReturnNotError,
    ElementNotAssignable,
    CallableFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NotASlice => "NotASlice",
            ErrorKind::NotAFunction => "NotAFunction",
            ErrorKind::BadInputArity => "BadInputArity",
            ErrorKind::BadOutputArity => "BadOutputArity",
            ErrorKind::FirstReturnNotBool => "FirstReturnNotBool",
            ErrorKind::SecondReturnNotError => "SecondReturnNotError",
            ErrorKind::ElementNotAssignable => "ElementNotAssignable",
            ErrorKind::CallableFailed => "CallableFailed",
        };
        f.write_str(name)
    }
}

/// Failure of a higher-order operation
#[derive(Debug, Error, Clone)]
pub enum FuncError {
    /// First argument is neither an array nor null
    #[error("expected first parameter to be an array, not {found}")]
    NotASlice { found: String },

    /// Second argument is not callable
    #[error("expected second parameter to be a function, not {found}")]
    NotAFunction { found: String },

    /// Callable takes other than 0 or 1 parameters
    #[error("expected second parameter function to take 0 or 1 parameters, got {found}")]
    BadInputArity { found: usize },

    /// Callable declares (or, at `index`, returned) other than 1 or 2 results
    #[error(
        "expected return with 1 or 2 values of types (any, error?), got {found}{}",
        at_item(.index)
    )]
    BadOutputArity { found: usize, index: Option<usize> },

    /// Predicate's primary result is not bool
    #[error("expected first return type to be assignable to bool, instead got {found}")]
    FirstReturnNotBool { found: Type },

    /// Second result is not an error
    #[error(
        "expected second return type to be assignable to error, instead got {found}{}",
        at_item(.index)
    )]
    SecondReturnNotError { found: String, index: Option<usize> },

    /// Element cannot be passed to the callable's parameter
    #[error("item {index} not assignable to {expected}: found {found}")]
    ElementNotAssignable {
        index: usize,
        expected: Type,
        found: String,
    },

    /// Callable returned an error (or panicked)
    #[error("f execution number {index} returned: {source}")]
    CallableFailed { index: usize, source: HostError },
}

fn at_item(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" from item {}", i),
        None => String::new(),
    }
}

impl FuncError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FuncError::NotASlice { .. } => ErrorKind::NotASlice,
            FuncError::NotAFunction { .. } => ErrorKind::NotAFunction,
            FuncError::BadInputArity { .. } => ErrorKind::BadInputArity,
            FuncError::BadOutputArity { .. } => ErrorKind::BadOutputArity,
            FuncError::FirstReturnNotBool { .. } => ErrorKind::FirstReturnNotBool,
            FuncError::SecondReturnNotError { .. } => ErrorKind::SecondReturnNotError,
            FuncError::ElementNotAssignable { .. } => ErrorKind::ElementNotAssignable,
            FuncError::CallableFailed { .. } => ErrorKind::CallableFailed,
        }
    }

    /// Index of the element being processed when the error occurred, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            FuncError::BadOutputArity { index, .. } => *index,
            FuncError::SecondReturnNotError { index, .. } => *index,
            FuncError::ElementNotAssignable { index, .. } => Some(*index),
            FuncError::CallableFailed { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Shorthand for `self.kind() == kind`
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }
}

/// Error value produced by a callable through its error channel
///
/// Wraps any error type behind an `Arc` so it can travel inside a [`Value`]
/// and be cloned freely.
///
/// [`Value`]: crate::value::Value
#[derive(Clone)]
pub struct HostError(Arc<dyn StdError + Send + Sync + 'static>);

#[derive(Debug, Error)]
#[error("{0}")]
struct Message(String);

impl HostError {
    /// Wrap an existing error
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        HostError(Arc::new(error))
    }

    /// Error carrying only a message
    pub fn msg(message: impl Into<String>) -> Self {
        HostError::new(Message(message.into()))
    }

    /// Borrow the wrapped error
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }

    /// Attempt to view the wrapped error as a concrete type
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Identity comparison: two handles to the same error
    pub fn ptr_eq(&self, other: &HostError) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostError({:?})", self.0)
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for HostError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = FuncError::NotASlice {
            found: "string".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::NotASlice);
        assert!(err.is(ErrorKind::NotASlice));
        assert!(!err.is(ErrorKind::NotAFunction));
    }

    #[test]
    fn test_messages() {
        let err = FuncError::NotASlice {
            found: "int".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "expected first parameter to be an array, not int"
        );

        let err = FuncError::BadOutputArity {
            found: 3,
            index: None,
        };
        assert_eq!(
            err.to_string(),
            "expected return with 1 or 2 values of types (any, error?), got 3"
        );

        let err = FuncError::BadOutputArity {
            found: 0,
            index: Some(2),
        };
        assert!(err.to_string().ends_with("got 0 from item 2"));

        let err = FuncError::FirstReturnNotBool { found: Type::Int };
        assert!(err.to_string().contains("instead got int"));
    }

    #[test]
    fn test_callable_failed_exposes_source() {
        let cause = HostError::msg("boom");
        let err = FuncError::CallableFailed {
            index: 3,
            source: cause.clone(),
        };
        assert_eq!(err.to_string(), "f execution number 3 returned: boom");
        assert_eq!(err.index(), Some(3));

        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "boom");
    }

    #[test]
    fn test_host_error_downcast() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = HostError::new(io);
        assert!(err.downcast_ref::<std::io::Error>().is_some());
        assert_eq!(err.to_string(), "missing");

        let copy = err.clone();
        assert!(copy.ptr_eq(&err));
        assert!(!HostError::msg("missing").ptr_eq(&err));
    }
}
