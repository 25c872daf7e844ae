use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num,
};

/// Evaluates an index read.
///
/// - Array by number: the index truncates to an integer and wraps, negative
///   indices count from the end and out-of-range positive ones reduce
///   modulo the length.
/// - Hash by string: field lookup, exactly as `h.key` (methods included).
/// - String by number: the 1-byte string at the wrapped position.
///
/// Any other combination is an error, as is indexing an empty array or
/// string.
pub fn eval_index(left: &Value, index: &Value, line: usize) -> EvalResult<Value> {
    match (left, index) {
        (Value::Array(elements), Value::Number(index)) => {
            let elements = elements.borrow();

            if elements.is_empty() {
                return Err(RuntimeError::EmptyIndex { target: "array",
                                                      line }.into());
            }

            let position = num::wrap_index(*index as i64, elements.len());
            Ok(elements[position].clone())
        },
        (Value::Hash(hash), Value::Str(key)) => Ok(hash.get(key)),
        (Value::Str(string), Value::Number(index)) => {
            let bytes = string.as_bytes();

            if bytes.is_empty() {
                return Err(RuntimeError::EmptyIndex { target: "string",
                                                      line }.into());
            }

            let position = num::wrap_index(*index as i64, bytes.len());
            Ok(Value::Str(String::from_utf8_lossy(&bytes[position..=position]).into_owned()))
        },
        _ => Err(RuntimeError::IndexNotSupported { left:  left.kind(),
                                                   index: index.kind(),
                                                   line }.into()),
    }
}
