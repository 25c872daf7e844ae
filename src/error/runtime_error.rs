#[derive(Debug, Clone)]
/// Represents all errors that can be raised during evaluation.
///
/// Runtime errors short-circuit evaluation: once one is produced, it
/// propagates through every dispatch point up to the embedder. The language
/// offers no way to catch one.
pub enum RuntimeError {
    /// Looked up a name with no binding in scope.
    IdentifierNotFound {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A prefix operator was applied to an operand of the wrong kind.
    UnknownPrefixOperator {
        /// The operator's spelling.
        operator: String,
        /// The kind name of the operand.
        operand:  &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An infix operator has no meaning for same-kinded operands.
    UnknownOperator {
        /// The kind name of the left operand.
        left:     &'static str,
        /// The operator's spelling.
        operator: String,
        /// The kind name of the right operand.
        right:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An infix operator was applied to operands of different kinds.
    TypeMismatch {
        /// The kind name of the left operand.
        left:     &'static str,
        /// The operator's spelling.
        operator: String,
        /// The kind name of the right operand.
        right:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Used `:=` on an index or field target.
    DeclareField {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of `:=` is not a name.
    DeclareTarget {
        /// The rendered target expression.
        target: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// The left side of `=` is not a name, index, or field.
    AssignTarget {
        /// The rendered target expression.
        target: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Assigned through an infix expression that is not a field access.
    FieldAssignOperator {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The right side of `.` is not an identifier.
    FieldNotIdentifier {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Stored a non-function in a model's method table.
    ModelFieldNotFunction {
        /// The kind name of the rejected value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Assigned a field of a value that has none.
    FieldAssignTarget {
        /// The kind name of the target value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Accessed a field of a value that has none.
    FieldAccessTarget {
        /// The kind name of the target value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Wrote to an array index that is not a number.
    ArrayIndexNotNumber {
        /// The inspect form of the offending index.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Wrote to an array index with a fractional part.
    ArrayIndexNotIntegral {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Used a non-string value as a hash key.
    HashKeyNotString {
        /// The inspect form of the offending key.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A hash literal key expression evaluated to a non-string.
    HashKeyKind {
        /// The kind name of the offending key.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Indexed a value that does not support this index kind.
    IndexNotSupported {
        /// The kind name of the indexed value.
        left:  &'static str,
        /// The kind name of the index.
        index: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Wrote through an index on a value that is neither array nor hash.
    IndexAssignTarget {
        /// The inspect form of the target value.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Indexed an array or string with no elements.
    EmptyIndex {
        /// Either `array` or `string`.
        target: &'static str,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// The left operand of `in <string>` was neither string nor number.
    InLeftString {
        /// The inspect form of the left operand.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The left operand of `in <number>` was not a number.
    InLeftNumber {
        /// The inspect form of the left operand.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The left operand of `in <hash>` was not a string.
    InLeftHash {
        /// The inspect form of the left operand.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The right operand of `in` supports no membership test.
    InRight {
        /// The inspect form of the right operand.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The operator has no overload method name.
    NotOverloadable {
        /// The operator's spelling.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The operand's model does not define the operator's method.
    NotOverloaded {
        /// The operator's spelling.
        operator: String,
        /// The underscore method that would overload it.
        method:   String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The overload name resolved to a plain property, not a method.
    OverloadNotMethod {
        /// The underscore method name.
        method: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// The set of a `for` loop is not iterable.
    InvalidIterable {
        /// The inspect form of the set value.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A call supplied the wrong number of arguments.
    WrongArgumentCount {
        /// How many arguments the callee declares.
        expected: usize,
        /// How many arguments the call supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Called a value that is not callable.
    NotCallable {
        /// The kind name of the called value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The parent clause of a model literal named a non-model.
    ParentNotModel {
        /// The kind name of the resolved parent value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A builtin was called with the wrong number of arguments.
    BuiltinArity {
        /// The builtin's name.
        builtin:  &'static str,
        /// A description of the expected argument count.
        expected: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A builtin was called with an argument of the wrong kind.
    BuiltinArgument {
        /// The builtin's name.
        builtin:  &'static str,
        /// A description of the expected argument.
        expected: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reading a line from standard input failed.
    InputFailed {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An error value built by the `err` builtin.
    Custom {
        /// The space-joined message.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentifierNotFound { name, line } => {
                write!(f, "Error on line {line}: identifier not found: {name}")
            },
            Self::UnknownPrefixOperator { operator, operand, line } => {
                write!(f, "Error on line {line}: unknown operator: {operator}{operand}")
            },
            Self::UnknownOperator { left,
                                    operator,
                                    right,
                                    line, } => write!(f,
                                                      "Error on line {line}: unknown operator: {left} {operator} {right}"),
            Self::TypeMismatch { left,
                                 operator,
                                 right,
                                 line, } => write!(f,
                                                   "Error on line {line}: type mismatch: {left} {operator} {right}"),
            Self::DeclareField { line } => write!(f,
                                                  "Error on line {line}: cannot declare (:=) a hash field. try assigning (=)"),
            Self::DeclareTarget { target, line } => write!(f,
                                                           "Error on line {line}: cannot declare {target}. expected an identifier"),
            Self::AssignTarget { target, line } => write!(f,
                                                          "Error on line {line}: cannot assign {target}. expected an identifier, index, or field"),
            Self::FieldAssignOperator { line } => write!(f,
                                                         "Error on line {line}: cannot assign any infix operator other than '.'"),
            Self::FieldNotIdentifier { line } => write!(f,
                                                        "Error on line {line}: expected an identifier to the right of '.'"),
            Self::ModelFieldNotFunction { found, line } => write!(f,
                                                                  "Error on line {line}: cannot assign a {found} to a model field. expected a function"),
            Self::FieldAssignTarget { found, line } => write!(f,
                                                              "Error on line {line}: cannot assign fields of a {found}. expected a hash or model"),
            Self::FieldAccessTarget { found, line } => write!(f,
                                                              "Error on line {line}: cannot access fields of a {found}. expected a hash or a model"),
            Self::ArrayIndexNotNumber { found, line } => write!(f,
                                                                "Error on line {line}: expected a number for an array index, not {found}"),
            Self::ArrayIndexNotIntegral { line } => write!(f,
                                                           "Error on line {line}: expected an integral number for an array index. got a real"),
            Self::HashKeyNotString { found, line } => write!(f,
                                                             "Error on line {line}: expected a string for a hash key, not {found}"),
            Self::HashKeyKind { found, line } => write!(f,
                                                        "Error on line {line}: unusable as hash key: {found}. expected a string"),
            Self::IndexNotSupported { left, index, line } => write!(f,
                                                                    "Error on line {line}: index operator not supported: {left}[{index}]"),
            Self::IndexAssignTarget { found, line } => write!(f,
                                                              "Error on line {line}: cannot index {found}. expected an array or a hash"),
            Self::EmptyIndex { target, line } => {
                write!(f, "Error on line {line}: cannot index an empty {target}")
            },
            Self::InLeftString { found, line } => write!(f,
                                                         "Error on line {line}: expected a string or number to the left of 'in <string>'. got {found}"),
            Self::InLeftNumber { found, line } => write!(f,
                                                         "Error on line {line}: expected a number to the left of 'in <number>'. got {found}"),
            Self::InLeftHash { found, line } => write!(f,
                                                       "Error on line {line}: expected a string for a hash key, got {found}"),
            Self::InRight { found, line } => write!(f,
                                                    "Error on line {line}: expected a hash, array, string, or number to the right of 'in'. got {found}"),
            Self::NotOverloadable { operator, line } => {
                write!(f, "Error on line {line}: operator {operator} cannot be overloaded")
            },
            Self::NotOverloaded { operator, method, line } => write!(f,
                                                                     "Error on line {line}: operator {operator} not overloaded. to overload, use the special method {method}"),
            Self::OverloadNotMethod { method, line } => write!(f,
                                                               "Error on line {line}: {method} must be a method, not a property"),
            Self::InvalidIterable { found, line } => write!(f,
                                                            "Error on line {line}: invalid set {found}. expected an array, hash, or string"),
            Self::WrongArgumentCount { expected, found, line } => write!(f,
                                                                         "Error on line {line}: invalid number of arguments. expected {expected}, got {found}"),
            Self::NotCallable { found, line } => {
                write!(f, "Error on line {line}: cannot call a {found}")
            },
            Self::ParentNotModel { found, line } => write!(f,
                                                           "Error on line {line}: expected a model as a parent, got a {found}"),
            Self::BuiltinArity { builtin,
                                 expected,
                                 line, } => {
                write!(f, "Error on line {line}: expected {expected} to '{builtin}'")
            },
            Self::BuiltinArgument { builtin,
                                    expected,
                                    line, } => write!(f,
                                                      "Error on line {line}: expected a {expected} to be passed to '{builtin}'"),
            Self::InputFailed { line } => {
                write!(f, "Error on line {line}: could not read a line")
            },
            Self::Custom { message, line } => write!(f, "Error on line {line}: {message}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
