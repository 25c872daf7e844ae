use std::{collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::{Builtin, Value}, model::Model},
    },
};

/// The default model registry.
///
/// Name lookup in an environment consults this registry before any scope,
/// so the names here cannot be shadowed. It holds a single entry: the root
/// model `object`, which every model literal without an explicit parent
/// clause inherits from.
#[derive(Debug)]
pub struct ModelSet {
    object: Rc<Model>,
}

impl ModelSet {
    /// Builds the registry with a fresh root model.
    ///
    /// The root carries the reflective methods `type` and `parent`, so
    /// every hash can report its model and its model's parent.
    #[must_use]
    pub fn new() -> Self {
        let mut methods = HashMap::new();
        methods.insert("type".to_string(),
                       Value::Builtin(Builtin { name: "type",
                                                func: method_type, }));
        methods.insert("parent".to_string(),
                       Value::Builtin(Builtin { name: "parent",
                                                func: method_parent, }));

        Self { object: Model::root(methods) }
    }

    /// Gets the root `object` model.
    #[must_use]
    pub const fn object(&self) -> &Rc<Model> {
        &self.object
    }

    /// Looks a name up in the registry.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if name == "object" {
            return Some(Value::Model(Rc::clone(&self.object)));
        }

        None
    }
}

impl Default for ModelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// `h.type()`: the model of the receiver hash.
fn method_type(this: Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    if !args.is_empty() {
        return Err(RuntimeError::BuiltinArity { builtin: "type",
                                                expected: "no arguments",
                                                line }.into());
    }

    match this {
        Value::Hash(hash) => Ok(Value::Model(Rc::clone(hash.model()))),
        _ => Err(RuntimeError::BuiltinArgument { builtin: "type",
                                                 expected: "hash",
                                                 line }.into()),
    }
}

/// `h.parent()`: the parent of the receiver hash's model, or null.
fn method_parent(this: Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    if !args.is_empty() {
        return Err(RuntimeError::BuiltinArity { builtin: "parent",
                                                expected: "no arguments",
                                                line }.into());
    }

    match this {
        Value::Hash(hash) => Ok(hash.model()
                                    .parent()
                                    .map_or(Value::Null, |parent| {
                                        Value::Model(Rc::clone(parent))
                                    })),
        _ => Err(RuntimeError::BuiltinArgument { builtin: "parent",
                                                 expected: "hash",
                                                 line }.into()),
    }
}
