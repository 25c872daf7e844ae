use std::fmt;

/// Represents a prefix (unary) operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Identity (`+x`); evaluation returns the operand unchanged.
    Identity,
    /// Logical NOT over truthiness (`!x`).
    Not,
    /// Bitwise complement of the 64-bit reinterpretation (`~x`).
    BitNot,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Identity => "+",
            Self::Not => "!",
            Self::BitNot => "~",
        };
        write!(f, "{operator}")
    }
}

/// Represents an infix (binary) operator.
///
/// Field access (`.`) is parsed as an ordinary infix operator; the evaluator
/// gives it its special meaning.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Exponentiation (`**`)
    Exp,
    /// Less than (`<`)
    Lt,
    /// Greater than (`>`)
    Gt,
    /// Less than or equal (`<=`)
    LtEq,
    /// Greater than or equal (`>=`)
    GtEq,
    /// Equal to (`==`)
    Eq,
    /// Not equal to (`!=`)
    NotEq,
    /// Logical and over truthiness (`&&`)
    And,
    /// Logical or over truthiness (`||`)
    Or,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Left shift (`<<`)
    ShiftLeft,
    /// Right shift (`>>`)
    ShiftRight,
    /// Inclusive range (`..`)
    Range,
    /// Exclusive range (`..<`)
    RangeExclusive,
    /// Membership test (`in`)
    In,
    /// Field access (`.`)
    Dot,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Exp => "**",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Range => "..",
            Self::RangeExclusive => "..<",
            Self::In => "in",
            Self::Dot => ".",
        };
        write!(f, "{operator}")
    }
}

/// The parent clause of a model literal: `model (a, b) : Parent(x, y)`.
///
/// The argument expressions stay unevaluated until the child model is
/// instantiated; they then run in a scope where the child's own property
/// names are bound to the instantiation arguments.
#[derive(Debug, Clone)]
pub struct ParentSpec {
    /// The identifier naming the parent model.
    pub name: String,
    /// The unevaluated expressions constructing the parent's properties.
    pub args: Vec<Expr>,
    /// Line number in the source code.
    pub line: usize,
}

/// An abstract syntax tree node representing an expression.
///
/// Every construct of the language except the four statement forms is an
/// expression and yields a value, including `if`, `while`, `for`, and the
/// literal forms for functions, lambdas, and models.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Reference to a binding by name.
    Identifier {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A numeric literal; all numbers are 64-bit floats.
    Number {
        /// The literal value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal with escapes already decoded.
    Str {
        /// The decoded string contents.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// A boolean literal, `true` or `false`.
    Boolean {
        /// The literal value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// The `null` literal.
    Null {
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix operation (`-x`, `+x`, `!x`, `~x`).
    Prefix {
        /// The prefix operator to apply.
        operator: PrefixOperator,
        /// The operand expression.
        right:    Box<Expr>,
        /// Line number in the source code.
        line:     usize,
    },
    /// An infix operation, including field access.
    Infix {
        /// Left operand.
        left:     Box<Expr>,
        /// The operator.
        operator: InfixOperator,
        /// Right operand.
        right:    Box<Expr>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A conditional expression with optional alternative.
    ///
    /// `elif` chains are desugared by the parser into a nested `If` inside a
    /// single-statement alternative block.
    If {
        /// The condition expression.
        condition:   Box<Expr>,
        /// Block evaluated when the condition is truthy.
        consequence: Block,
        /// Block evaluated otherwise, if present.
        alternative: Option<Block>,
        /// Line number in the source code.
        line:        usize,
    },
    /// A function literal: `fn (a, b) { ... }`.
    Function {
        /// Parameter names, pairwise unique.
        parameters: Vec<String>,
        /// The body block.
        body:       Block,
        /// Line number in the source code.
        line:       usize,
    },
    /// A lambda literal: `\(a, b) = expr`.
    Lambda {
        /// Parameter names, pairwise unique.
        parameters: Vec<String>,
        /// The single-expression body.
        body:       Box<Expr>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A model literal: `model (a, b)` with an optional parent clause.
    Model {
        /// Property names of the model.
        parameters: Vec<String>,
        /// Optional parent model clause.
        parent:     Option<ParentSpec>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A call: `f(a, b)`. The callee may be a function, lambda, builtin,
    /// model, or method instance.
    Call {
        /// The callee expression.
        function:  Box<Expr>,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line:      usize,
    },
    /// An array literal: `[a, b, c]`.
    Array {
        /// Element expressions.
        elements: Vec<Expr>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A hash literal: `{key: value, ...}`.
    ///
    /// Keys are expressions; a bare identifier key becomes a string key with
    /// the identifier's name at evaluation time.
    HashLiteral {
        /// Key/value expression pairs in source order.
        pairs: Vec<(Expr, Expr)>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An index access: `a[i]`.
    Index {
        /// The indexed expression.
        left:  Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A while loop; yields the array of non-null body results.
    While {
        /// The loop condition.
        condition: Box<Expr>,
        /// The loop body.
        body:      Block,
        /// Line number in the source code.
        line:      usize,
    },
    /// A for-over-set loop: `for (i | set) { ... }`.
    For {
        /// The loop variable name.
        variable: String,
        /// The set expression: an array, hash, or string.
        set:      Box<Expr>,
        /// The loop body.
        body:     Block,
        /// Line number in the source code.
        line:     usize,
    },
    /// A declaration: `name := value`, binding in the current scope.
    Declare {
        /// The declaration target.
        target: Box<Expr>,
        /// The value expression.
        value:  Box<Expr>,
        /// Line number in the source code.
        line:   usize,
    },
    /// An assignment: `target = value`, rebinding an enclosing binding or
    /// mutating an index or field target.
    Assign {
        /// The assignment target.
        target: Box<Expr>,
        /// The value expression.
        value:  Box<Expr>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// Gets the source line this expression originated from.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Identifier { line, .. }
            | Self::Number { line, .. }
            | Self::Str { line, .. }
            | Self::Boolean { line, .. }
            | Self::Null { line }
            | Self::Prefix { line, .. }
            | Self::Infix { line, .. }
            | Self::If { line, .. }
            | Self::Function { line, .. }
            | Self::Lambda { line, .. }
            | Self::Model { line, .. }
            | Self::Call { line, .. }
            | Self::Array { line, .. }
            | Self::HashLiteral { line, .. }
            | Self::Index { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. }
            | Self::Declare { line, .. }
            | Self::Assign { line, .. } => *line,
        }
    }
}

/// A top-level statement. Every statement is terminated by `;` in source.
#[derive(Debug, Clone)]
pub enum Statement {
    /// An expression evaluated for its value.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A return statement; a missing value is the `null` literal.
    Return {
        /// The returned expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A break statement, terminating the innermost loop.
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// A next statement, skipping to the next loop iteration.
    Next {
        /// Line number in the source code.
        line: usize,
    },
}

/// A brace-delimited sequence of statements, appearing only as the body of
/// `if`, `while`, `for`, and function literals.
#[derive(Debug, Clone)]
pub struct Block {
    /// The statements in source order.
    pub statements: Vec<Statement>,
    /// Line number of the opening brace.
    pub line:       usize,
}

/// A parsed program: the ordered list of top-level statements.
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// The statements in source order.
    pub statements: Vec<Statement>,
}

fn join<T: fmt::Display>(items: &[T], separator: &str) -> String {
    items.iter()
         .map(ToString::to_string)
         .collect::<Vec<_>>()
         .join(separator)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Str { value, .. } => write!(f, "\"{value}\""),
            Self::Boolean { value, .. } => write!(f, "{value}"),
            Self::Null { .. } => write!(f, "null"),
            Self::Prefix { operator, right, .. } => write!(f, "({operator}{right})"),
            Self::Infix { left,
                          operator,
                          right,
                          .. } => write!(f, "({left} {operator} {right})"),
            Self::If { condition,
                       consequence,
                       alternative,
                       .. } => {
                write!(f, "(if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                write!(f, ")")
            },
            Self::Function { parameters, body, .. } => {
                write!(f, "(fn ({}) {body})", parameters.join(", "))
            },
            Self::Lambda { parameters, body, .. } => {
                write!(f, "(\\({}) = {body})", parameters.join(", "))
            },
            Self::Model { parameters, parent, .. } => match parent {
                Some(parent) => write!(f,
                                       "(model ({}) : {}({}))",
                                       parameters.join(", "),
                                       parent.name,
                                       join(&parent.args, ", ")),
                None => write!(f, "(model ({}))", parameters.join(", ")),
            },
            Self::Call { function, arguments, .. } => {
                write!(f, "({function}({}))", join(arguments, ", "))
            },
            Self::Array { elements, .. } => write!(f, "[{}]", join(elements, ", ")),
            Self::HashLiteral { pairs, .. } => {
                let pairs = pairs.iter()
                                 .map(|(key, value)| format!("{key}: {value}"))
                                 .collect::<Vec<_>>()
                                 .join(", ");
                write!(f, "{{{pairs}}}")
            },
            Self::Index { left, index, .. } => write!(f, "({left}[{index}])"),
            Self::While { condition, body, .. } => write!(f, "(while {condition} {body})"),
            Self::For { variable, set, body, .. } => {
                write!(f, "(for ({variable} | {set}) {body})")
            },
            Self::Declare { target, value, .. } => write!(f, "({target} := {value})"),
            Self::Assign { target, value, .. } => write!(f, "({target} = {value})"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression { expr, .. } => write!(f, "{expr};"),
            Self::Return { value, .. } => write!(f, "return {value};"),
            Self::Break { .. } => write!(f, "break;"),
            Self::Next { .. } => write!(f, "next;"),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ {} }}", join(&self.statements, " "))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join(&self.statements, " "))
    }
}
