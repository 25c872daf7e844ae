use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Block, Expr},
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::core::{eval, eval_block, EvalResult, Signal},
        value::{core::Value, hash::Hash},
    },
};

/// Evaluates a `while` loop.
///
/// The body runs in the loop's own environment (no per-iteration scope).
/// Non-null body results accumulate into the array the whole expression
/// yields. `break` ends the loop, `next` skips to the next iteration, and
/// a `return` or error keeps unwinding.
pub fn eval_while(condition: &Expr, body: &Block, env: &Rc<Env>) -> EvalResult<Value> {
    let mut results = Vec::new();

    loop {
        let condition_value = eval(condition, env)?;
        if !condition_value.is_truthy() {
            break;
        }

        match eval_block(body, env) {
            Ok(value) => {
                if !value.is_null() {
                    results.push(value);
                }
            },
            Err(Signal::Break) => break,
            Err(Signal::Next) => continue,
            Err(other) => return Err(other),
        }
    }

    Ok(Value::Array(Rc::new(RefCell::new(results))))
}

/// Evaluates a `for` loop over an array, hash, or string set.
///
/// Each iteration runs in its own scope enclosing the loop's environment,
/// with the loop variable declared there:
///
/// - over an array, the variable takes each successive *index*, and
///   non-null results accumulate into an array;
/// - over a hash, the variable takes each *key* (order unspecified), and
///   non-null results build a hash under the same keys;
/// - over a string, the variable takes each successive byte *index*, and
///   non-null results concatenate their inspect forms into a string.
pub fn eval_for(variable: &str,
                set: &Expr,
                body: &Block,
                env: &Rc<Env>,
                line: usize)
                -> EvalResult<Value> {
    let set = eval(set, env)?;

    match set {
        Value::Array(elements) => {
            let length = elements.borrow().len();
            let mut results = Vec::new();

            for index in 0..length {
                let scope = Env::enclosed(env);
                scope.declare(variable, Value::Number(index as f64));

                match eval_block(body, &scope) {
                    Ok(value) => {
                        if !value.is_null() {
                            results.push(value);
                        }
                    },
                    Err(Signal::Break) => break,
                    Err(Signal::Next) => continue,
                    Err(other) => return Err(other),
                }
            }

            Ok(Value::Array(Rc::new(RefCell::new(results))))
        },
        Value::Hash(hash) => {
            let result = Hash::new(Rc::clone(env.models().object()));

            for key in hash.keys() {
                let scope = Env::enclosed(env);
                scope.declare(variable, Value::Str(key.clone()));

                match eval_block(body, &scope) {
                    Ok(value) => {
                        if !value.is_null() {
                            result.set(&key, value);
                        }
                    },
                    Err(Signal::Break) => break,
                    Err(Signal::Next) => continue,
                    Err(other) => return Err(other),
                }
            }

            Ok(Value::Hash(result))
        },
        Value::Str(string) => {
            let mut result = String::new();

            for index in 0..string.len() {
                let scope = Env::enclosed(env);
                scope.declare(variable, Value::Number(index as f64));

                match eval_block(body, &scope) {
                    Ok(value) => {
                        if !value.is_null() {
                            result.push_str(&value.to_string());
                        }
                    },
                    Err(Signal::Break) => break,
                    Err(Signal::Next) => continue,
                    Err(other) => return Err(other),
                }
            }

            Ok(Value::Str(result))
        },
        other => Err(RuntimeError::InvalidIterable { found: other.to_string(),
                                                     line }.into()),
    }
}
