//! Runtime value representation
//!
//! The dynamically-typed value pool a template host hands to the operations.
//! - Null, Bool, Int, Float: immediate values
//! - Strings: reference-counted, immutable
//! - Arrays: declared element type plus copy-on-write storage (`Arc<Vec<Value>>`)
//! - Functions: a signature plus a native closure following the multi-return
//!   call convention
//! - Errors: values travelling through a callable's error channel

use crate::error::HostError;
use crate::types::{Signature, Type};
use std::fmt;
use std::sync::Arc;

/// Native implementation of a callable.
///
/// Receives the call arguments and returns one value per declared result. A
/// callable declaring `(T, error)` returns `[value, Value::Null]` on success and
/// `[_, Value::Error(..)]` on failure.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Vec<Value> + Send + Sync>;

/// Copy-on-write array with a declared element type. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ValueArray {
    element: Type,
    items: Arc<Vec<Value>>,
}

impl ValueArray {
    /// Empty array of the given element type
    pub fn new(element: Type) -> Self {
        Self::from_vec(element, Vec::new())
    }

    /// Wrap existing values without checking them against `element`.
    /// Operations reject a concretely typed array holding a stray item.
    pub fn from_vec(element: Type, items: Vec<Value>) -> Self {
        ValueArray {
            element,
            items: Arc::new(items),
        }
    }

    /// Declared element type
    pub fn element_type(&self) -> &Type {
        &self.element
    }

    /// Read access — no clone needed.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Mutating access — triggers CoW if the storage is shared.
    pub fn push(&mut self, value: Value) {
        Arc::make_mut(&mut self.items).push(value);
    }

    /// Convert to owned Vec — clones only if shared.
    pub fn into_vec(self) -> Vec<Value> {
        Arc::try_unwrap(self.items).unwrap_or_else(|arc| (*arc).clone())
    }
}

impl PartialEq for ValueArray {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element && self.items.as_slice() == other.items.as_slice()
    }
}

impl std::ops::Index<usize> for ValueArray {
    type Output = Value;
    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

/// A callable value: name, signature and native implementation
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    signature: Arc<Signature>,
    implementation: NativeFn,
}

impl Callable {
    pub fn new(name: impl Into<Arc<str>>, signature: Signature, implementation: NativeFn) -> Self {
        Callable {
            name: name.into(),
            signature: Arc::new(signature),
            implementation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invoke the native implementation. Performs no checking of the
    /// arguments or of the returned values.
    pub fn call(&self, args: &[Value]) -> Vec<Value> {
        (self.implementation)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({} {})", self.name, self.signature)
    }
}

/// Coarse classification of a value, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Function,
    Error,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Function => "function",
            ValueKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// Runtime value type
#[derive(Clone)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value (reference-counted, immutable)
    String(Arc<str>),
    /// Typed array (copy-on-write)
    Array(ValueArray),
    /// Callable
    Function(Callable),
    /// Error travelling through an error channel
    Error(HostError),
}

impl Value {
    /// Create a new string value
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create an array with a declared element type
    pub fn array(element: Type, values: Vec<Value>) -> Self {
        Value::Array(ValueArray::from_vec(element, values))
    }

    /// Create a heterogeneous `any[]` array
    pub fn any_array(values: Vec<Value>) -> Self {
        Value::array(Type::Any, values)
    }

    /// Create an error value carrying a message
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(HostError::msg(message))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Function(_) => ValueKind::Function,
            Value::Error(_) => ValueKind::Error,
        }
    }

    /// Concrete type of this value; `None` for null, which has no type of its own
    pub fn runtime_type(&self) -> Option<Type> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(Type::Bool),
            Value::Int(_) => Some(Type::Int),
            Value::Float(_) => Some(Type::Float),
            Value::String(_) => Some(Type::String),
            Value::Array(arr) => Some(Type::array(arr.element_type().clone())),
            Value::Function(func) => Some(Type::function(func.signature().clone())),
            Value::Error(_) => Some(Type::Error),
        }
    }

    /// Name of the runtime type, `null` for null
    pub fn type_name(&self) -> String {
        match self.runtime_type() {
            Some(ty) => ty.to_string(),
            None => "null".to_string(),
        }
    }

    /// Check whether this value may be passed where `target` is expected
    pub fn is_assignable_to(&self, target: &Type) -> bool {
        match self.runtime_type() {
            Some(ty) => ty.is_assignable_to(target),
            None => target.is_nullable(),
        }
    }

    /// Only `true` is truthy - no implicit conversions
    pub fn is_truthy(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_array(&self) -> Option<&ValueArray> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// Value types compare by content (arrays include their declared element
    /// type). Functions and errors compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => {
                Arc::ptr_eq(&a.implementation, &b.implementation)
            }
            (Value::Error(a), Value::Error(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Array(arr) => {
                let elements: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Value::Function(func) => write!(f, "<fn {}>", func.name()),
            Value::Error(err) => write!(f, "<error {}>", err),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(n) => write!(f, "Float({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(arr) => write!(f, "Array<{}>({:?})", arr.element_type(), arr.as_slice()),
            Value::Function(func) => write!(f, "{:?}", func),
            Value::Error(err) => write!(f, "Error({})", err),
        }
    }
}
