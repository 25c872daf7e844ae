use logos::{Logos, Skip};

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Whitespace and `#`-to-end-of-line comments are skipped and never surface.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `42` or `3.14`. All numbers are
    /// 64-bit floats; there is no exponent syntax.
    #[regex(r"[0-9]+\.[0-9]+", number)]
    #[regex(r"[0-9]+", number)]
    Number(f64),
    /// String literal tokens. The payload carries the decoded contents:
    /// escapes are resolved, the delimiting quotes are gone. A string that
    /// reaches end of input without a closing quote ends there.
    #[regex(r#""([^"\\]|\\[\s\S])*"?"#, string)]
    Str(String),
    /// `fn`
    #[token("fn")]
    Function,
    /// `model`
    #[token("model")]
    Model,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `null`
    #[token("null")]
    Null,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `break`
    #[token("break")]
    Break,
    /// `next`
    #[token("next")]
    Next,
    /// `return`
    #[token("return")]
    Return,
    /// `in`
    #[token("in")]
    In,
    /// Identifier tokens. Identifier characters are letters, `_`, and `?`;
    /// digits are not identifier characters, so a number glued to letters
    /// lexes as two tokens.
    #[regex(r"[A-Za-z_?]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `:=`
    #[token(":=")]
    Declare,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    Eq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `!`
    #[token("!")]
    Bang,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    Exp,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `\`
    #[token("\\")]
    Backslash,
    /// `<`
    #[token("<")]
    Lt,
    /// `>`
    #[token(">")]
    Gt,
    /// `<=`
    #[token("<=")]
    LtEq,
    /// `>=`
    #[token(">=")]
    GtEq,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `&&`
    #[token("&&")]
    And,
    /// `||`
    #[token("||")]
    Or,
    /// `&`
    #[token("&")]
    BitAnd,
    /// `|`
    #[token("|")]
    VLine,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `..`
    #[token("..")]
    Range,
    /// `..<`
    #[token("..<")]
    RangeExclusive,
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semi,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `# Comments run to the end of the line.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// Newlines are skipped but counted for diagnostics.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Skip
    })]
    NewLine,
    /// Spaces, tabs, and carriage returns.
    #[regex(r"[ \t\r]+", logos::skip)]
    Whitespace,
    /// Any byte no other rule matches. The parser reports it as an error.
    #[regex(r"[\s\S]", |lex| lex.slice().to_string(), priority = 0)]
    Illegal(String),
}

/// The closed set of token kinds, without payloads.
///
/// The parser compares and reports kinds; `Eof` is synthesized by the parser
/// when it runs past the final token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal.
    Num,
    /// A string literal.
    Str,
    /// An identifier.
    Ident,
    /// A byte the lexer could not match.
    Illegal,
    /// End of input.
    Eof,
    /// `fn`
    Function,
    /// `model`
    Model,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `if`
    If,
    /// `else`
    Else,
    /// `elif`
    Elif,
    /// `while`
    While,
    /// `for`
    For,
    /// `break`
    Break,
    /// `next`
    Next,
    /// `return`
    Return,
    /// `in`
    In,
    /// `:=`
    Declare,
    /// `=`
    Assign,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `!`
    Bang,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    Exp,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `\`
    Backslash,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `&`
    BitAnd,
    /// `|`
    VLine,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `..`
    Range,
    /// `..<`
    RangeExclusive,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `;`
    Semi,
    /// `:`
    Colon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
}

impl Token {
    /// Gets the payload-free kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Number(_) => TokenKind::Num,
            Self::Str(_) => TokenKind::Str,
            Self::Identifier(_) => TokenKind::Ident,
            Self::Function => TokenKind::Function,
            Self::Model => TokenKind::Model,
            Self::True => TokenKind::True,
            Self::False => TokenKind::False,
            Self::Null => TokenKind::Null,
            Self::If => TokenKind::If,
            Self::Else => TokenKind::Else,
            Self::Elif => TokenKind::Elif,
            Self::While => TokenKind::While,
            Self::For => TokenKind::For,
            Self::Break => TokenKind::Break,
            Self::Next => TokenKind::Next,
            Self::Return => TokenKind::Return,
            Self::In => TokenKind::In,
            Self::Declare => TokenKind::Declare,
            Self::Assign => TokenKind::Assign,
            Self::Eq => TokenKind::Eq,
            Self::NotEq => TokenKind::NotEq,
            Self::Bang => TokenKind::Bang,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::Star => TokenKind::Star,
            Self::Exp => TokenKind::Exp,
            Self::Slash => TokenKind::Slash,
            Self::Percent => TokenKind::Percent,
            Self::Backslash => TokenKind::Backslash,
            Self::Lt => TokenKind::Lt,
            Self::Gt => TokenKind::Gt,
            Self::LtEq => TokenKind::LtEq,
            Self::GtEq => TokenKind::GtEq,
            Self::ShiftLeft => TokenKind::ShiftLeft,
            Self::ShiftRight => TokenKind::ShiftRight,
            Self::And => TokenKind::And,
            Self::Or => TokenKind::Or,
            Self::BitAnd => TokenKind::BitAnd,
            Self::VLine => TokenKind::VLine,
            Self::Caret => TokenKind::Caret,
            Self::Tilde => TokenKind::Tilde,
            Self::Range => TokenKind::Range,
            Self::RangeExclusive => TokenKind::RangeExclusive,
            Self::Dot => TokenKind::Dot,
            Self::Comma => TokenKind::Comma,
            Self::Semi => TokenKind::Semi,
            Self::Colon => TokenKind::Colon,
            Self::LParen => TokenKind::LParen,
            Self::RParen => TokenKind::RParen,
            Self::LBrace => TokenKind::LBrace,
            Self::RBrace => TokenKind::RBrace,
            Self::LBracket => TokenKind::LBracket,
            Self::RBracket => TokenKind::RBracket,
            // Skipped variants are never emitted.
            Self::Comment | Self::NewLine | Self::Whitespace => TokenKind::Illegal,
            Self::Illegal(_) => TokenKind::Illegal,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Num => "num",
            Self::Str => "string",
            Self::Ident => "id",
            Self::Illegal => "illegal",
            Self::Eof => "eof",
            Self::Function => "fn",
            Self::Model => "model",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::If => "if",
            Self::Else => "else",
            Self::Elif => "elif",
            Self::While => "while",
            Self::For => "for",
            Self::Break => "break",
            Self::Next => "next",
            Self::Return => "return",
            Self::In => "in",
            Self::Declare => ":=",
            Self::Assign => "=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Bang => "!",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Exp => "**",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Backslash => "\\",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::VLine => "|",
            Self::Caret => "^",
            Self::Tilde => "~",
            Self::Range => "..",
            Self::RangeExclusive => "..<",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Semi => ";",
            Self::Colon => ":",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
        };
        write!(f, "{name}")
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Tokenizes the entire source text into `(token, line)` pairs.
///
/// Bytes no rule matches become [`Token::Illegal`] entries rather than
/// aborting the lex; they surface later as parse errors. Unknown string
/// escapes are dropped silently.
///
/// # Parameters
/// - `source`: The full source text.
///
/// # Returns
/// All tokens in order, each paired with its 1-based source line.
///
/// # Example
/// ```
/// use molde::interpreter::lexer::{lex, Token};
///
/// let tokens = lex("x := 2;");
/// let kinds: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Identifier("x".to_string()),
///                 Token::Declare,
///                 Token::Number(2.0),
///                 Token::Semi]);
/// ```
#[must_use]
pub fn lex(source: &str) -> Vec<(Token, usize)> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push((token, lexer.extras.line)),
            Err(()) => tokens.push((Token::Illegal(lexer.slice().to_string()), lexer.extras.line)),
        }
    }

    tokens
}

/// Parses a numeric literal from the current token slice.
fn number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Decodes a string literal from the current token slice.
///
/// Recognized escapes are `\\`, `\'`, `\"`, `\a`, `\b`, `\f`, `\n`, `\r`,
/// `\t`, and `\v`; a literal newline after a backslash decodes to a
/// backslash. Any other escape is dropped.
fn string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.matches('\n').count();

    let mut decoded = String::new();
    let mut chars = slice[1..].chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => break,
            '\\' => match chars.next() {
                Some('\n') | Some('\\') => decoded.push('\\'),
                Some('\'') => decoded.push('\''),
                Some('"') => decoded.push('"'),
                Some('a') => decoded.push('\x07'),
                Some('b') => decoded.push('\x08'),
                Some('f') => decoded.push('\x0C'),
                Some('n') => decoded.push('\n'),
                Some('r') => decoded.push('\r'),
                Some('t') => decoded.push('\t'),
                Some('v') => decoded.push('\x0B'),
                _ => {},
            },
            ch => decoded.push(ch),
        }
    }

    decoded
}
