use std::rc::Rc;

use crate::{
    ast::{Expr, InfixOperator},
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::core::{eval, EvalResult},
        value::core::Value,
    },
    util::num,
};

/// Evaluates `target := value`.
///
/// Only a plain name can be declared; `:=` on an index or field target is
/// an error directing the user to `=`. The binding lands in the current
/// scope, shadowing any outer binding of the same name.
pub fn eval_declare(target: &Expr, value: Value, env: &Rc<Env>, line: usize) -> EvalResult<Value> {
    match target {
        Expr::Identifier { name, .. } => Ok(env.declare(name, value)),
        Expr::Index { .. } => Err(RuntimeError::DeclareField { line }.into()),
        other => Err(RuntimeError::DeclareTarget { target: other.to_string(),
                                                   line }.into()),
    }
}

/// Evaluates `target = value` for the three assignable target shapes:
/// names, index expressions, and field accesses.
pub fn eval_assign(target: &Expr, value: Value, env: &Rc<Env>, line: usize) -> EvalResult<Value> {
    match target {
        Expr::Identifier { name, .. } => Ok(env.assign(name, value)),
        Expr::Index { left, index, .. } => eval_index_assign(left, index, value, env, line),
        Expr::Infix { left,
                      operator,
                      right,
                      .. } => eval_field_assign(left, *operator, right, value, env, line),
        other => Err(RuntimeError::AssignTarget { target: other.to_string(),
                                                  line }.into()),
    }
}

/// Writes through `a[i] = v` or `h["k"] = v`.
///
/// Array indices must be integral numbers and wrap like reads do; hash keys
/// must be strings. The assignment evaluates to the mutated collection.
fn eval_index_assign(left: &Expr,
                     index: &Expr,
                     value: Value,
                     env: &Rc<Env>,
                     line: usize)
                     -> EvalResult<Value> {
    let target = eval(left, env)?;
    let index = eval(index, env)?;

    match target {
        Value::Array(elements) => {
            let index = match index {
                Value::Number(index) => index,
                other => {
                    return Err(RuntimeError::ArrayIndexNotNumber { found: other.to_string(),
                                                                   line }.into());
                },
            };

            if !num::is_integral(index) {
                return Err(RuntimeError::ArrayIndexNotIntegral { line }.into());
            }

            let length = elements.borrow().len();
            if length == 0 {
                return Err(RuntimeError::EmptyIndex { target: "array",
                                                      line }.into());
            }

            let position = num::wrap_index(index as i64, length);
            elements.borrow_mut()[position] = value;

            Ok(Value::Array(elements))
        },
        Value::Hash(hash) => {
            let key = match index {
                Value::Str(key) => key,
                other => {
                    return Err(RuntimeError::HashKeyNotString { found: other.to_string(),
                                                                line }.into());
                },
            };

            hash.set(&key, value);
            Ok(Value::Hash(hash))
        },
        other => Err(RuntimeError::IndexAssignTarget { found: other.to_string(),
                                                       line }.into()),
    }
}

/// Writes through `h.f = v` or `Model.m = fn (...) { ... }`.
///
/// On a hash, the field is updated or inserted, but a name the model
/// resolves as a method is never overwritten; the result is whatever the
/// field reads back as. On a model, only functions may be stored; the
/// assignment installs a method.
fn eval_field_assign(left: &Expr,
                     operator: InfixOperator,
                     field: &Expr,
                     value: Value,
                     env: &Rc<Env>,
                     line: usize)
                     -> EvalResult<Value> {
    if operator != InfixOperator::Dot {
        return Err(RuntimeError::FieldAssignOperator { line }.into());
    }

    let target = eval(left, env)?;

    let Expr::Identifier { name, .. } = field else {
        return Err(RuntimeError::FieldNotIdentifier { line }.into());
    };

    match target {
        Value::Hash(hash) => {
            hash.set(name, value);
            Ok(hash.get(name))
        },
        Value::Model(model) => {
            if !matches!(value, Value::Function(_)) {
                return Err(RuntimeError::ModelFieldNotFunction { found: value.kind(),
                                                                 line }.into());
            }

            model.install_method(name, value.clone());
            Ok(value)
        },
        other => Err(RuntimeError::FieldAssignTarget { found: other.kind(),
                                                       line }.into()),
    }
}
