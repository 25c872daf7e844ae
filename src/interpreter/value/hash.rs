use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::{core::Value, model::Model};

/// The language's object type: a string-keyed mutable map bound to the
/// model it was instantiated from.
///
/// Field lookup consults the model first (methods, inherited through the
/// parent chain), then the hash's own pairs. Iteration order of pairs is
/// unspecified.
#[derive(Debug)]
pub struct Hash {
    pairs: RefCell<HashMap<String, Value>>,
    model: Rc<Model>,
}

impl Hash {
    /// Creates an empty hash bound to `model`.
    #[must_use]
    pub fn new(model: Rc<Model>) -> Rc<Self> {
        Rc::new(Self { pairs: RefCell::new(HashMap::new()),
                       model })
    }

    /// Gets the model this hash was instantiated from.
    #[must_use]
    pub const fn model(&self) -> &Rc<Model> {
        &self.model
    }

    /// Looks up a field.
    ///
    /// If the model chain resolves a method by this name, the result is a
    /// method instance binding it to this hash. Otherwise the result is the
    /// hash's own pair value, or null if absent.
    #[must_use]
    pub fn get(self: &Rc<Self>, name: &str) -> Value {
        if let Some(function) = self.model.resolve_method(name) {
            return Value::Method(Rc::new(MethodInstance { function,
                                                          hash: Some(Rc::clone(self)) }));
        }

        self.pair(name)
    }

    /// Writes a field. A name the model chain resolves as a method is left
    /// untouched: methods cannot be shadowed by pairs.
    pub fn set(&self, name: &str, value: Value) {
        if self.model.resolve_method(name).is_some() {
            return;
        }

        self.pairs.borrow_mut().insert(name.to_string(), value);
    }

    /// Gets the pair value for `name` without consulting the model; null if
    /// absent.
    #[must_use]
    pub fn pair(&self, name: &str) -> Value {
        self.pairs
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Returns `true` if the hash's own pairs contain `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.borrow().contains_key(name)
    }

    /// Gets a snapshot of the pair keys, in unspecified order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.pairs.borrow().keys().cloned().collect()
    }
}

/// The transient binding of a callable to the hash it was accessed on.
///
/// Invoking a method instance binds `this` to the host hash. A method taken
/// off a model directly has no host; `this` is then null.
#[derive(Debug)]
pub struct MethodInstance {
    /// The underlying callable: a function or a builtin.
    pub function: Value,
    /// The host hash, if the method was reached through one.
    pub hash:     Option<Rc<Hash>>,
}
