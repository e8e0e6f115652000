//! Tree-walking evaluator for Quill.
//!
//! Evaluation never panics and never unwinds: runtime failures are
//! [`Value::Error`] values that short-circuit outward, and `return`
//! travels as a [`Value::Return`] wrapper unwrapped only at call and
//! program boundaries.

mod builtins;
mod environment;
mod interpreter;
mod value;

pub use environment::Environment;
pub use interpreter::{eval, Interpreter};
pub use value::{Builtin, BuiltinFn, FunctionValue, Heap, Value};
