//! # molde
//!
//! molde is a small dynamically-typed scripting language written in Rust.
//! Its defining feature is the *model*: a prototype template with
//! properties, methods, inheritance, and operator overloading, which
//! instantiates into string-keyed hashes. The language also has
//! first-class functions and lambdas, arrays, and imperative control flow.
//!
//! Source text is tokenized, parsed by a Pratt parser into an AST, and
//! evaluated by a tree-walking interpreter against a lexically-scoped
//! environment chain.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::multiple_crate_versions)]

use std::rc::Rc;

use crate::{
    error::InterpretError,
    interpreter::{
        env::Env,
        evaluator::core::eval_program,
        lexer::lex,
        parser::core::Parser,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` types that represent
/// source code as a tree, along with the operator enums and `Display`
/// impls that render nodes back into parseable source.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
/// - Renders nodes back to source for inspect forms and diagnostics.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing,
/// parsing, or evaluating code, each carrying the source line it
/// originated from.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Attaches line numbers and detailed messages for user feedback.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, values,
/// environments, and the object system to provide a complete runtime for
/// source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, values.
/// - Provides entry points for interpreting user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive read/evaluate/print loop.
pub mod repl;
/// General numeric utilities shared across the interpreter.
pub mod util;

/// Interprets a source text in the given environment and returns its
/// value.
///
/// The text is tokenized and parsed first; if the parser recorded any
/// errors, they are all returned and evaluation is skipped. Otherwise the
/// program runs to completion or to its first runtime error. Passing the
/// same environment across calls gives REPL-style persistence.
///
/// # Errors
/// Returns [`InterpretError::Parse`] with every parse error, or
/// [`InterpretError::Runtime`] if evaluation raised one.
///
/// # Examples
/// ```
/// use molde::{interpret, interpreter::env::Env};
///
/// let env = Env::global();
///
/// let value = interpret("x := 3 + 4 * 2; x;", &env).unwrap();
/// assert_eq!(value.to_string(), "11");
///
/// // The environment persists between calls.
/// let value = interpret("x - 1;", &env).unwrap();
/// assert_eq!(value.to_string(), "10");
/// ```
pub fn interpret(source: &str, env: &Rc<Env>) -> Result<Value, InterpretError> {
    let mut parser = Parser::new(lex(source));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        return Err(InterpretError::Parse(parser.errors().to_vec()));
    }

    eval_program(&program, env).map_err(InterpretError::Runtime)
}
