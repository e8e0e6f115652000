//! Environment for variable scoping.
//!
//! A chain of mutable scopes shared by reference: every closure created
//! in a scope holds a handle to that same scope, so later definitions
//! are visible through it.


use crate::Value;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A single-threaded scope handle.
///
/// Wraps `Rc<RefCell<T>>` so all scope allocations go through the
/// `LocalRef::new()` factory method. Not thread-safe; the evaluator is
/// single-threaded and `Rc` is the point.
#[repr(transparent)]
struct LocalRef<T>(Rc<RefCell<T>>);

impl<T> LocalRef<T> {
    #[inline]
    fn new(value: T) -> Self {
        LocalRef(Rc::new(RefCell::new(value)))
    }

    #[inline]
    fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalRef<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalRef(Rc::clone(&self.0))
    }
}

/// One scope: its bindings plus the scope it nests inside.
struct Scope {
    bindings: FxHashMap<String, Value>,
    outer: Option<Environment>,
}

/// A shared handle to a scope chain.
///
/// Cloning an `Environment` clones the handle, not the bindings; two
/// clones see each other's definitions. That sharing is what gives
/// closures their by-reference capture semantics.
#[derive(Clone)]
pub struct Environment(LocalRef<Scope>);

impl Environment {
    /// Create an empty top-level environment.
    pub fn new() -> Self {
        Environment(LocalRef::new(Scope {
            bindings: FxHashMap::default(),
            outer: None,
        }))
    }

    /// Create an empty environment nested inside `outer`.
    ///
    /// Lookups that miss fall through to `outer`; definitions stay in
    /// the new innermost scope.
    pub fn enclosed(outer: &Environment) -> Self {
        Environment(LocalRef::new(Scope {
            bindings: FxHashMap::default(),
            outer: Some(outer.clone()),
        }))
    }

    /// Look up a name, walking outward through the chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        let scope = self.0.borrow();
        if let Some(value) = scope.bindings.get(name) {
            return Some(value.clone());
        }
        scope.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Bind a name in this scope. Always the innermost: an outer
    /// binding of the same name is shadowed, never overwritten.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    // Scope chains can contain closures that point back at this very
    // environment; printing bindings would recurse.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}
