//! Higher-order operations
//!
//! `map`, `filter`, `find` and `findIndex`, each taking a sequence value and a
//! callable value of unknown static type.

pub mod filter;
pub mod find;
pub mod map;

pub use filter::filter;
pub use find::{find, find_index, NOT_FOUND};
pub use map::map;

use crate::error::FuncError;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// One of the four operations, addressable by its host-facing name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Map,
    Filter,
    Find,
    FindIndex,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Filter,
        Operation::Find,
        Operation::FindIndex,
        Operation::Map,
    ];

    /// Name under which the host registers the operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Map => "map",
            Operation::Filter => "filter",
            Operation::Find => "find",
            Operation::FindIndex => "findIndex",
        }
    }

    /// Run the operation; `findIndex` results are returned as `Value::Int`
    pub fn apply(&self, seq: &Value, func: &Value) -> Result<Value, FuncError> {
        match self {
            Operation::Map => map(seq, func),
            Operation::Filter => filter(seq, func),
            Operation::Find => find(seq, func),
            Operation::FindIndex => find_index(seq, func).map(Value::Int),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown operation name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation '{0}' (expected one of: filter, find, findIndex, map)")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}
