use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::{Block, Expr},
    interpreter::{
        env::Env,
        evaluator::core::EvalResult,
        value::{hash::{Hash, MethodInstance}, model::Model},
    },
};

/// The signature of a native callable: `(this, arguments, line)`.
///
/// `this` is the host hash for method calls and null otherwise; `line` is
/// the call site, used for error reporting.
pub type BuiltinFn = fn(Value, Vec<Value>, usize) -> EvalResult<Value>;

/// A native callable. Builtins compare equal to nothing, including
/// themselves.
#[derive(Clone, Copy)]
pub struct Builtin {
    /// The name the builtin is known by.
    pub name: &'static str,
    /// The native implementation.
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// A user function: parameters, body, and the captured environment.
///
/// The captured environment is the one the literal was evaluated in, which
/// is what makes closures work.
#[derive(Debug, Clone)]
pub struct Function {
    /// Parameter names, pairwise unique.
    pub parameters: Vec<String>,
    /// The body block.
    pub body:       Block,
    /// The environment captured at the literal.
    pub env:        Rc<Env>,
}

/// A lambda: like a function, but the body is a single expression.
#[derive(Debug, Clone)]
pub struct Lambda {
    /// Parameter names, pairwise unique.
    pub parameters: Vec<String>,
    /// The single-expression body.
    pub body:       Expr,
    /// The environment captured at the literal.
    pub env:        Rc<Env>,
}

/// Represents a runtime value in the interpreter.
///
/// Arrays, hashes, and models are reference-shared: cloning a `Value` clones
/// a handle, and mutation through any handle is visible through all of them.
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A boolean value, `true` or `false`.
    Boolean(bool),
    /// A string value.
    Str(String),
    /// The null value.
    Null,
    /// An ordered, mutable sequence of values.
    Array(Rc<RefCell<Vec<Value>>>),
    /// A string-keyed map bound to the model it was instantiated from.
    Hash(Rc<Hash>),
    /// A user function with its captured environment.
    Function(Rc<Function>),
    /// A lambda with its captured environment.
    Lambda(Rc<Lambda>),
    /// A native callable.
    Builtin(Builtin),
    /// A model: a prototype template instantiated into hashes.
    Model(Rc<Model>),
    /// A callable bound to its host hash by field access.
    Method(Rc<MethodInstance>),
}

impl Value {
    /// Gets the kind name used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "NUMBER",
            Self::Boolean(_) => "BOOLEAN",
            Self::Str(_) => "STRING",
            Self::Null => "NULL",
            Self::Array(_) => "ARRAY",
            Self::Hash(_) => "HASH",
            Self::Function(_) => "FUNCTION",
            Self::Lambda(_) => "LAMBDA",
            Self::Builtin(_) => "BUILTIN",
            Self::Model(_) => "MODEL",
            Self::Method(_) => "METHOD_INSTANCE",
        }
    }

    /// Every value is truthy except `null` and `false`. Zero, the empty
    /// string, and empty collections are all truthy.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean(false))
    }

    /// Returns `true` if the value is `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Structural equality.
    ///
    /// Values of different kinds are never equal. Arrays compare
    /// element-wise. Hashes compare by model identity plus every key of the
    /// left hash against the right; extra keys on the right are not checked.
    /// Models compare by identity; functions and lambdas by their rendered
    /// source; builtins compare equal to nothing.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::Boolean(left), Self::Boolean(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Null, Self::Null) => true,
            (Self::Array(left), Self::Array(right)) => {
                let left = left.borrow();
                let right = right.borrow();
                left.len() == right.len()
                && left.iter().zip(right.iter()).all(|(l, r)| l.equals(r))
            },
            (Self::Hash(left), Self::Hash(right)) => {
                if left.model().id() != right.model().id() {
                    return false;
                }

                left.keys()
                    .iter()
                    .all(|key| left.pair(key).equals(&right.pair(key)))
            },
            (Self::Model(left), Self::Model(right)) => left.id() == right.id(),
            (Self::Function(_), Self::Function(_)) | (Self::Lambda(_), Self::Lambda(_)) => {
                self.to_string() == other.to_string()
            },
            (Self::Method(left), Self::Method(right)) => {
                let hosts_equal = match (&left.hash, &right.hash) {
                    (Some(l), Some(r)) => {
                        Self::Hash(Rc::clone(l)).equals(&Self::Hash(Rc::clone(r)))
                    },
                    (None, None) => true,
                    _ => false,
                };
                hosts_equal && left.function.equals(&right.function)
            },
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value}"),
            Self::Null => write!(f, "<null>"),
            Self::Array(elements) => {
                let elements = elements.borrow()
                                       .iter()
                                       .map(ToString::to_string)
                                       .collect::<Vec<_>>()
                                       .join(", ");
                write!(f, "[{elements}]")
            },
            Self::Hash(hash) => {
                let pairs = hash.keys()
                                .iter()
                                .map(|key| format!("{key}: {}", hash.pair(key)))
                                .collect::<Vec<_>>()
                                .join(", ");
                write!(f, "{{{pairs}}}")
            },
            Self::Function(function) => {
                write!(f, "fn ({}) {}", function.parameters.join(", "), function.body)
            },
            Self::Lambda(lambda) => {
                write!(f, "\\({}) = {}", lambda.parameters.join(", "), lambda.body)
            },
            Self::Builtin(_) => write!(f, "<builtin>"),
            Self::Model(model) => write!(f, "{model}"),
            Self::Method(_) => write!(f, "<method instance>"),
        }
    }
}
