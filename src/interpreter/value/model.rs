use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::Rc,
    sync::atomic::{AtomicI64, Ordering},
};

use crate::{ast::Expr, interpreter::value::core::Value};

static NEXT_MODEL_ID: AtomicI64 = AtomicI64::new(1);

/// A prototype template: property names, a method table, and an optional
/// parent model.
///
/// Calling a model instantiates it into a hash; the hash keeps a reference
/// back to the model for method resolution. Two models are equal iff their
/// identities match; identity is assigned once, monotonically, and never
/// changes. The method table is the only mutable part, grown by
/// `Model.name = fn (...) { ... }` assignments.
#[derive(Debug)]
pub struct Model {
    id:          i64,
    properties:  Vec<String>,
    methods:     RefCell<HashMap<String, Value>>,
    parent:      Option<Rc<Model>>,
    parent_args: Vec<Expr>,
}

impl Model {
    /// Creates a model with a fresh identity.
    ///
    /// `parent_args` are the unevaluated expressions that construct the
    /// parent's properties at instantiation time; they must match the
    /// parent's property count.
    #[must_use]
    pub fn new(properties: Vec<String>, parent: Rc<Self>, parent_args: Vec<Expr>) -> Rc<Self> {
        Rc::new(Self { id: NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed),
                       properties,
                       methods: RefCell::new(HashMap::new()),
                       parent: Some(parent),
                       parent_args })
    }

    /// Creates the root model: identity −1, no properties, no parent, with
    /// the given method table.
    #[must_use]
    pub(in crate::interpreter::value) fn root(methods: HashMap<String, Value>) -> Rc<Self> {
        Rc::new(Self { id:          -1,
                       properties:  Vec::new(),
                       methods:     RefCell::new(methods),
                       parent:      None,
                       parent_args: Vec::new(), })
    }

    /// Gets the model's stable identity.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Gets the ordered property names.
    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Gets the parent model, if any. Only the root has none.
    #[must_use]
    pub const fn parent(&self) -> Option<&Rc<Self>> {
        self.parent.as_ref()
    }

    /// Gets the unevaluated parent construction arguments.
    #[must_use]
    pub fn parent_args(&self) -> &[Expr] {
        &self.parent_args
    }

    /// Resolves a method by name, searching this model first and then the
    /// parent chain.
    #[must_use]
    pub fn resolve_method(&self, name: &str) -> Option<Value> {
        if let Some(method) = self.methods.borrow().get(name) {
            return Some(method.clone());
        }

        self.parent
            .as_ref()
            .and_then(|parent| parent.resolve_method(name))
    }

    /// Installs a method under `name`, replacing any previous one.
    pub fn install_method(&self, name: &str, function: Value) {
        self.methods.borrow_mut().insert(name.to_string(), function);
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties = self.properties.join(", ");

        match &self.parent {
            Some(parent) => write!(f, "model ({properties}) : ({parent})"),
            None => write!(f, "model ({properties})"),
        }
    }
}
