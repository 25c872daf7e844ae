use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Expr, InfixOperator},
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::{call, core::EvalResult},
        value::{core::Value, hash::MethodInstance},
    },
    util::num,
};

/// Maps an operator to the underscore method that overloads it on a hash's
/// model. `^` and `.` have no overload name.
const fn overload_method(operator: InfixOperator) -> Option<&'static str> {
    let name = match operator {
        InfixOperator::Add => "_plus",
        InfixOperator::Sub => "_minus",
        InfixOperator::Mul => "_mul",
        InfixOperator::Div => "_div",
        InfixOperator::Exp => "_exp",
        InfixOperator::Mod => "_mod",
        InfixOperator::Lt => "_lt",
        InfixOperator::Gt => "_gt",
        InfixOperator::Eq => "_eq",
        InfixOperator::NotEq => "_n_eq",
        InfixOperator::GtEq => "_gt_eq",
        InfixOperator::LtEq => "_lt_eq",
        InfixOperator::ShiftLeft => "_bit_left",
        InfixOperator::ShiftRight => "_bit_right",
        InfixOperator::Range => "_range",
        InfixOperator::RangeExclusive => "_xrange",
        InfixOperator::And => "_and",
        InfixOperator::Or => "_or",
        InfixOperator::BitAnd => "_bit_and",
        InfixOperator::BitOr => "_bit_or",
        InfixOperator::In => "_in",
        InfixOperator::BitXor | InfixOperator::Dot => return None,
    };
    Some(name)
}

/// Evaluates an infix operation on already-evaluated operands.
///
/// Dispatch order: operator overloading when a hash is involved, then the
/// truthiness operators, structural equality, `in`, and finally the native
/// number and string operators. Mixed kinds that reach the bottom are a
/// type mismatch.
///
/// For `in` the overload is consulted on the *right* operand's model, and
/// only when the right operand is a hash; a hash without `_in` falls back
/// to native key containment.
pub fn eval_infix(operator: InfixOperator,
                  left: Value,
                  right: Value,
                  env: &Rc<Env>,
                  line: usize)
                  -> EvalResult<Value> {
    if operator == InfixOperator::In {
        if let Value::Hash(hash) = &right {
            if hash.model().resolve_method("_in").is_some() {
                return eval_overloaded(operator, left, right, env, line);
            }
        }
    } else if matches!(left, Value::Hash(_)) || matches!(right, Value::Hash(_)) {
        return eval_overloaded(operator, left, right, env, line);
    }

    match operator {
        InfixOperator::And => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
        InfixOperator::Or => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
        InfixOperator::Eq => Ok(Value::Boolean(left.equals(&right))),
        InfixOperator::NotEq => Ok(Value::Boolean(!left.equals(&right))),
        InfixOperator::In => eval_in(&left, &right, line),
        _ => match (&left, &right) {
            (Value::Number(l), Value::Number(r)) => eval_number_infix(operator, *l, *r, line),
            (Value::Str(l), Value::Str(r)) => eval_string_infix(operator, l, r, line),
            _ if left.kind() != right.kind() => {
                Err(RuntimeError::TypeMismatch { left:     left.kind(),
                                                 operator: operator.to_string(),
                                                 right:    right.kind(),
                                                 line }.into())
            },
            _ => Err(RuntimeError::UnknownOperator { left:     left.kind(),
                                                     operator: operator.to_string(),
                                                     right:    right.kind(),
                                                     line }.into()),
        },
    }
}

/// Native operators over two numbers.
///
/// Bit operators work on 64-bit integer reinterpretations; `..` and `..<`
/// build arrays counting up from the left operand. `^` is deliberately
/// absent and reports an unknown operator.
fn eval_number_infix(operator: InfixOperator, left: f64, right: f64, line: usize)
                     -> EvalResult<Value> {
    match operator {
        InfixOperator::Add => Ok(Value::Number(left + right)),
        InfixOperator::Sub => Ok(Value::Number(left - right)),
        InfixOperator::Mul => Ok(Value::Number(left * right)),
        InfixOperator::Div => Ok(Value::Number(left / right)),
        InfixOperator::Mod => Ok(Value::Number(left % right)),
        InfixOperator::Exp => Ok(Value::Number(left.powf(right))),
        InfixOperator::Lt => Ok(Value::Boolean(left < right)),
        InfixOperator::Gt => Ok(Value::Boolean(left > right)),
        InfixOperator::LtEq => Ok(Value::Boolean(left <= right)),
        InfixOperator::GtEq => Ok(Value::Boolean(left >= right)),
        InfixOperator::ShiftLeft => Ok(Value::Number(num::shift_left(left, right))),
        InfixOperator::ShiftRight => Ok(Value::Number(num::shift_right(left, right))),
        InfixOperator::BitAnd => {
            Ok(Value::Number(((left as i64) & (right as i64)) as f64))
        },
        InfixOperator::BitOr => {
            Ok(Value::Number(((left as i64) | (right as i64)) as f64))
        },
        InfixOperator::Range => Ok(range_array(left as i64, right as i64, true)),
        InfixOperator::RangeExclusive => Ok(range_array(left as i64, right as i64, false)),
        _ => Err(RuntimeError::UnknownOperator { left:     "NUMBER",
                                                 operator: operator.to_string(),
                                                 right:    "NUMBER",
                                                 line }.into()),
    }
}

/// Builds the array for a range expression. A right end below the left end
/// yields an empty array.
fn range_array(start: i64, end: i64, inclusive: bool) -> Value {
    let end = if inclusive { end + 1 } else { end };
    let elements = (start..end).map(|i| Value::Number(i as f64)).collect();

    Value::Array(Rc::new(RefCell::new(elements)))
}

/// Native operators over two strings: concatenation and equality.
fn eval_string_infix(operator: InfixOperator, left: &str, right: &str, line: usize)
                     -> EvalResult<Value> {
    match operator {
        InfixOperator::Add => Ok(Value::Str(format!("{left}{right}"))),
        InfixOperator::Eq => Ok(Value::Boolean(left == right)),
        InfixOperator::NotEq => Ok(Value::Boolean(left != right)),
        _ => Err(RuntimeError::UnknownOperator { left:     "STRING",
                                                 operator: operator.to_string(),
                                                 right:    "STRING",
                                                 line }.into()),
    }
}

/// The membership operator, keyed on the right operand's kind:
///
/// - array: some element equals the left operand (structurally),
/// - hash: the left operand must be a string and is looked up as a key,
/// - string: the left operand's inspect form is a substring,
/// - number: the left operand divides the right one.
fn eval_in(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match right {
        Value::Array(elements) => {
            let found = elements.borrow().iter().any(|element| left.equals(element));
            Ok(Value::Boolean(found))
        },
        Value::Hash(hash) => match left {
            Value::Str(key) => Ok(Value::Boolean(hash.contains(key))),
            other => Err(RuntimeError::InLeftHash { found: other.to_string(),
                                                    line }.into()),
        },
        Value::Str(haystack) => {
            let needle = match left {
                Value::Str(needle) => needle.clone(),
                Value::Number(_) => left.to_string(),
                other => {
                    return Err(RuntimeError::InLeftString { found: other.to_string(),
                                                            line }.into());
                },
            };
            Ok(Value::Boolean(haystack.contains(&needle)))
        },
        Value::Number(divisor_of) => match left {
            Value::Number(divisor) => Ok(Value::Boolean(divisor_of % divisor == 0.0)),
            other => Err(RuntimeError::InLeftNumber { found: other.to_string(),
                                                      line }.into()),
        },
        other => Err(RuntimeError::InRight { found: other.to_string(),
                                             line }.into()),
    }
}

/// Dispatches an operator to the underscore method on the relevant hash's
/// model: the right operand for `in`, the left one for everything else.
///
/// The resolved method is invoked with the hash as `this` and the other
/// operand as the single argument. A name that resolves to a plain
/// property, or a missing overload, is an error.
fn eval_overloaded(operator: InfixOperator,
                   left: Value,
                   right: Value,
                   env: &Rc<Env>,
                   line: usize)
                   -> EvalResult<Value> {
    let Some(method_name) = overload_method(operator) else {
        return Err(RuntimeError::NotOverloadable { operator: operator.to_string(),
                                                   line }.into());
    };

    let (hash, operand) = if operator == InfixOperator::In {
        match right {
            Value::Hash(hash) => (hash, left),
            _ => {
                return Err(RuntimeError::TypeMismatch { left:     left.kind(),
                                                        operator: operator.to_string(),
                                                        right:    right.kind(),
                                                        line }.into());
            },
        }
    } else {
        match left {
            Value::Hash(hash) => (hash, right),
            _ => {
                return Err(RuntimeError::TypeMismatch { left:     left.kind(),
                                                        operator: operator.to_string(),
                                                        right:    right.kind(),
                                                        line }.into());
            },
        }
    };

    match hash.get(method_name) {
        Value::Method(method) => {
            call::apply_function(Value::Method(method), vec![operand], env, line)
        },
        Value::Null => Err(RuntimeError::NotOverloaded { operator: operator.to_string(),
                                                         method:   method_name.to_string(),
                                                         line }.into()),
        _ => Err(RuntimeError::OverloadNotMethod { method: method_name.to_string(),
                                                   line }.into()),
    }
}

/// Field access: the right side of `.` must be an identifier.
///
/// On a hash, the model chain is consulted first (yielding a bound method
/// instance), then the hash's own pairs. On a model, the result is the
/// model's method (unbound) or null.
pub fn eval_field_access(left: Value, right: &Expr, line: usize) -> EvalResult<Value> {
    let Expr::Identifier { name, .. } = right else {
        return Err(RuntimeError::FieldNotIdentifier { line }.into());
    };

    match left {
        Value::Hash(hash) => Ok(hash.get(name)),
        Value::Model(model) => Ok(model.resolve_method(name).map_or(Value::Null, |function| {
            Value::Method(Rc::new(MethodInstance { function,
                                                   hash: None }))
        })),
        other => Err(RuntimeError::FieldAccessTarget { found: other.kind(),
                                                       line }.into()),
    }
}
