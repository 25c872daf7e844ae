use crate::{
    ast::PrefixOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num,
};

/// Evaluates a prefix operation on an already-evaluated operand.
///
/// - `!x` is true iff `x` is falsy; every other value yields false.
/// - `-x` negates a number and rejects everything else.
/// - `+x` is the identity.
/// - `~x` complements the unsigned 64-bit reinterpretation of a number.
pub fn eval_prefix(operator: PrefixOperator, right: Value, line: usize) -> EvalResult<Value> {
    match operator {
        PrefixOperator::Not => Ok(Value::Boolean(!right.is_truthy())),
        PrefixOperator::Identity => Ok(right),
        PrefixOperator::Negate => match right {
            Value::Number(value) => Ok(Value::Number(-value)),
            other => Err(RuntimeError::UnknownPrefixOperator { operator: "-".to_string(),
                                                               operand:  other.kind(),
                                                               line }.into()),
        },
        PrefixOperator::BitNot => match right {
            Value::Number(value) => Ok(Value::Number(num::bit_not(value))),
            other => Err(RuntimeError::UnknownPrefixOperator { operator: "~".to_string(),
                                                               operand:  other.kind(),
                                                               line }.into()),
        },
    }
}
