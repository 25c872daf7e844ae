use crate::interpreter::lexer::TokenKind;

#[derive(Debug, Clone)]
/// Represents all errors that can occur while parsing a token stream.
///
/// The parser accumulates these instead of stopping: a statement that fails
/// to parse is discarded and parsing resumes at the next token.
pub enum ParseError {
    /// The token after the current one was not the required kind.
    Expected {
        /// The token kind the grammar required here.
        expected: TokenKind,
        /// The token kind that was actually found.
        found:    TokenKind,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// No expression can start with the current token.
    NoPrefixParse {
        /// The token kind that cannot begin an expression.
        found: TokenKind,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A parameter list repeats a name.
    DuplicateParameters {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expected { expected, found, line } => write!(f,
                                                               "Error on line {line}: expected next token to be {expected}, but got {found}"),
            Self::NoPrefixParse { found, line } => write!(f,
                                                          "Error on line {line}: no prefix parse function for {found} found"),
            Self::DuplicateParameters { line } => write!(f,
                                                         "Error on line {line}: all function parameters must be unique"),
        }
    }
}

impl std::error::Error for ParseError {}
