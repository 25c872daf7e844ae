use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::interpreter::value::{core::Value, models::ModelSet};

/// A lexical scope: a name→value store with an optional enclosing scope.
///
/// Environments form a reference-shared chain rooted in the global scope.
/// Function and lambda values capture the `Rc` handle of the environment
/// they were created in, which keeps that scope alive for as long as the
/// closure is.
pub struct Env {
    store:  RefCell<HashMap<String, Value>>,
    outer:  Option<Rc<Env>>,
    models: Rc<ModelSet>,
}

impl Env {
    /// Creates the global environment, wired to a fresh default model
    /// registry.
    #[must_use]
    pub fn global() -> Rc<Self> {
        Rc::new(Self { store:  RefCell::new(HashMap::new()),
                       outer:  None,
                       models: Rc::new(ModelSet::new()), })
    }

    /// Creates a scope enclosed by `outer`. Lookups that miss here continue
    /// in `outer`.
    #[must_use]
    pub fn enclosed(outer: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self { store:  RefCell::new(HashMap::new()),
                       outer:  Some(Rc::clone(outer)),
                       models: Rc::clone(&outer.models), })
    }

    /// Gets the default model registry.
    #[must_use]
    pub const fn models(&self) -> &Rc<ModelSet> {
        &self.models
    }

    /// Looks up a name: the default model registry first, then this scope,
    /// then the enclosing chain.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(model) = self.models.lookup(name) {
            return Some(model);
        }

        self.get_scoped(name)
    }

    fn get_scoped(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.borrow().get(name) {
            return Some(value.clone());
        }

        self.outer.as_ref().and_then(|outer| outer.get_scoped(name))
    }

    /// Binds `name` in this scope, shadowing any binding of the same name
    /// in enclosing scopes. Returns the bound value.
    pub fn declare(&self, name: &str, value: Value) -> Value {
        self.store.borrow_mut().insert(name.to_string(), value.clone());
        value
    }

    /// Rebinds the nearest existing binding of `name`, searching outward
    /// from this scope. Without one, binds in this scope. Returns the bound
    /// value.
    pub fn assign(&self, name: &str, value: Value) -> Value {
        if self.rebind(name, value.clone()) {
            value
        } else {
            self.declare(name, value)
        }
    }

    fn rebind(&self, name: &str, value: Value) -> bool {
        if self.store.borrow().contains_key(name) {
            self.store.borrow_mut().insert(name.to_string(), value);
            return true;
        }

        self.outer
            .as_ref()
            .is_some_and(|outer| outer.rebind(name, value))
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Environments are cyclic through captured closures; render opaquely.
        write!(f, "<env>")
    }
}
