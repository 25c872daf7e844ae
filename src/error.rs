/// Parsing errors.
///
/// Defines all error types that can occur while turning the token stream
/// into an abstract syntax tree. Parse errors are accumulated, not fatal:
/// the parser keeps going and reports everything it found.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: wrong
/// operand kinds, unresolved names, arity mismatches, failed overload
/// lookups, and the user-built errors of the `err` builtin.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

#[derive(Debug)]
/// The top-level failure of a source run: either the parser rejected the
/// text, or evaluation raised an error.
pub enum InterpretError {
    /// One or more parse errors; evaluation was skipped.
    Parse(Vec<ParseError>),
    /// A runtime error that reached the top level.
    Runtime(RuntimeError),
}

impl std::fmt::Display for InterpretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(errors) => {
                write!(f, "parser errors:")?;
                for error in errors {
                    write!(f, "\n  {error}")?;
                }
                Ok(())
            },
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for InterpretError {}
