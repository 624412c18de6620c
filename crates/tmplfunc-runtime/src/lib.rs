//! tmplfunc runtime - higher-order functions for template engines
//!
//! This library provides `map`, `filter`, `find` and `findIndex` for template
//! engines whose expression language has no closures:
//! - A dynamic value model with runtime types
//! - Validation of sequence and callable arguments
//! - A shared invocation loop with an error channel and result-type widening
//! - A function table for installing the operations into a host
//!
//! # Examples
//!
//! ```
//! use tmplfunc_runtime::conversion::ToValue;
//! use tmplfunc_runtime::simple::{inc, odd};
//! use tmplfunc_runtime::{filter, find_index, map};
//!
//! let data = vec![1i64, 2, 3, 4].to_value();
//! assert_eq!(map(&data, &inc()).unwrap(), vec![2i64, 3, 4, 5].to_value());
//! assert_eq!(filter(&data, &odd()).unwrap(), vec![1i64, 3].to_value());
//! assert_eq!(find_index(&data, &odd()).unwrap(), 0);
//! ```

/// Runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod conversion;
pub mod error;
mod invoke;
pub mod native;
pub mod ops;
pub mod registry;
pub mod simple;
pub mod types;
pub mod validate;
pub mod value;

// Re-export commonly used types
pub use error::{ErrorKind, FuncError, HostError};
pub use ops::{filter, find, find_index, map, Operation, NOT_FOUND};
pub use registry::{functions, install, merge, FuncMap};
pub use types::{Signature, Type};
pub use value::{Callable, Value, ValueArray};
