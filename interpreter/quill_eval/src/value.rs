//! Runtime values.
//!
//! `Value` is small and cheap to clone: anything bigger than a machine
//! word lives behind [`Heap`], a reference-counted pointer. Cloning a
//! string or function value bumps a refcount, it does not copy.

// Builtin equality is fn-pointer equality; false negatives are
// acceptable there.
#![allow(unpredictable_function_pointer_comparisons)]

use crate::Environment;
use quill_ir::Block;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// A single-threaded shared allocation.
///
/// Wraps `Rc<T>` so that all runtime allocations go through the
/// `Heap::new()` factory method. The evaluator is single-threaded;
/// `Rc` is deliberate, not an oversight.
#[repr(transparent)]
pub struct Heap<T>(Rc<T>);

impl<T> Heap<T> {
    /// Allocate a value on the heap.
    #[inline]
    pub fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }

    /// Pointer identity: do both handles refer to the same allocation?
    #[inline]
    pub fn ptr_eq(a: &Heap<T>, b: &Heap<T>) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

/// A user-defined function: parameters, body, and the environment it
/// was created in. Calls extend that environment, which is what makes
/// closures work.
#[derive(Clone)]
pub struct FunctionValue {
    pub parameters: Vec<String>,
    pub body: Block,
    pub env: Environment,
}

impl fmt::Debug for FunctionValue {
    // The captured environment can contain this very function; leave
    // it out to keep Debug from recursing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// A native function callable from the language.
pub type BuiltinFn = fn(&[Value]) -> Value;

/// A named builtin.
#[derive(Clone, Copy, Debug)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.func == other.func
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(Heap<String>),
    Null,
    /// A `return` travelling up to its call boundary.
    Return(Heap<Value>),
    /// A runtime error travelling up to the caller.
    Error(Heap<String>),
    Function(Heap<FunctionValue>),
    Builtin(Builtin),
}

impl Value {
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);
    pub const NULL: Value = Value::Null;

    #[inline]
    pub fn int(value: i64) -> Value {
        Value::Int(value)
    }

    /// The shared boolean for a Rust `bool`.
    #[inline]
    pub fn bool_from(value: bool) -> Value {
        if value {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    pub fn string(value: impl Into<String>) -> Value {
        Value::Str(Heap::new(value.into()))
    }

    pub fn error(message: impl Into<String>) -> Value {
        Value::Error(Heap::new(message.into()))
    }

    /// Wrap a value as a travelling `return`.
    pub fn returned(value: Value) -> Value {
        Value::Return(Heap::new(value))
    }

    pub fn function(parameters: Vec<String>, body: Block, env: Environment) -> Value {
        Value::Function(Heap::new(FunctionValue {
            parameters,
            body,
            env,
        }))
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Only `false` and `null` are falsy. `0` and `""` are truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Null)
    }

    /// Type name as it appears in runtime error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "INTEGER",
            Value::Bool(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
            Value::Null => "NULL",
            Value::Return(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
        }
    }
}

/// Structural equality for embedding and tests. Language-level `==`
/// lives in the operator evaluation, not here.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Return(a), Value::Return(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Heap::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

/// The inspect form shown by the REPL.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Str(value) => f.write_str(value),
            Value::Null => f.write_str("null"),
            Value::Return(value) => write!(f, "{}", **value),
            Value::Error(message) => write!(f, "ERROR: {}", **message),
            Value::Function(func) => {
                // Same braces form as the AST's canonical Display.
                write!(f, "fn({}) {{ {} }}", func.parameters.join(", "), func.body)
            }
            Value::Builtin(_) => f.write_str("builtin function"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inspect_forms() {
        assert_eq!(Value::int(42).to_string(), "42");
        assert_eq!(Value::TRUE.to_string(), "true");
        assert_eq!(Value::NULL.to_string(), "null");
        assert_eq!(Value::string("hi").to_string(), "hi");
        assert_eq!(Value::error("boom").to_string(), "ERROR: boom");
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::int(1).type_name(), "INTEGER");
        assert_eq!(Value::FALSE.type_name(), "BOOLEAN");
        assert_eq!(Value::string("s").type_name(), "STRING");
        assert_eq!(Value::NULL.type_name(), "NULL");
        assert_eq!(Value::error("e").type_name(), "ERROR");
        assert_eq!(Value::returned(Value::NULL).type_name(), "RETURN_VALUE");
    }

    #[test]
    fn truthiness() {
        assert!(Value::int(0).is_truthy());
        assert!(Value::string("").is_truthy());
        assert!(!Value::FALSE.is_truthy());
        assert!(!Value::NULL.is_truthy());
    }

    #[test]
    fn string_values_clone_by_refcount() {
        let a = Value::string("shared");
        let b = a.clone();
        assert_eq!(a, b);
    }
}
