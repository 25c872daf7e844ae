use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Block, Expr, InfixOperator, Program, Statement},
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::{assign, builtins, call, index, infix, loops, prefix},
        value::{
            core::{Function, Lambda, Value},
            hash::Hash,
            model::Model,
        },
    },
};

/// A control-flow signal threaded through evaluation as the `Err` arm.
///
/// `return`, `break`, and `next` are not values a program can observe; they
/// unwind to the boundary responsible for them. `Return` is unwrapped by
/// calls and by the program; `Break` and `Next` by the enclosing loop, or
/// squashed to null at program level. `Error` unwinds all the way out.
#[derive(Debug)]
pub enum Signal {
    /// A `return` travelling up to the nearest call boundary.
    Return(Value),
    /// A `break` travelling up to the nearest loop.
    Break,
    /// A `next` travelling up to the nearest loop.
    Next,
    /// A runtime error; nothing catches it.
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`Signal`] describing why evaluation did not run to completion.
pub type EvalResult<T> = Result<T, Signal>;

/// Evaluates a program: statements in order, in the given environment.
///
/// A `return` ends the program with its unwrapped value. A stray `break` or
/// `next` at program level squashes that statement's result to null and
/// execution continues. The program's value is the value of its last
/// statement, or null for an empty program.
///
/// # Parameters
/// - `program`: The parsed program.
/// - `env`: The environment to evaluate in; usually [`Env::global`].
///
/// # Returns
/// The program's value, or the first runtime error.
pub fn eval_program(program: &Program, env: &Rc<Env>) -> Result<Value, RuntimeError> {
    let mut result = Value::Null;

    for statement in &program.statements {
        match eval_statement(statement, env) {
            Ok(value) => result = value,
            Err(Signal::Return(value)) => return Ok(value),
            Err(Signal::Break | Signal::Next) => result = Value::Null,
            Err(Signal::Error(error)) => return Err(error),
        }
    }

    Ok(result)
}

/// Evaluates one statement.
pub fn eval_statement(statement: &Statement, env: &Rc<Env>) -> EvalResult<Value> {
    match statement {
        Statement::Expression { expr, .. } => eval(expr, env),
        Statement::Return { value, .. } => {
            let value = eval(value, env)?;
            Err(Signal::Return(value))
        },
        Statement::Break { .. } => Err(Signal::Break),
        Statement::Next { .. } => Err(Signal::Next),
    }
}

/// Evaluates a block: statements in order, yielding the last statement's
/// value, or null for an empty block.
///
/// Signals are not handled here: a `return`, `break`, `next`, or error
/// inside a block propagates to the surrounding loop, call, or program.
pub fn eval_block(block: &Block, env: &Rc<Env>) -> EvalResult<Value> {
    let mut result = Value::Null;

    for statement in &block.statements {
        result = eval_statement(statement, env)?;
    }

    Ok(result)
}

/// Evaluates one expression. This is the recursive heart of the
/// interpreter; every expression form dispatches from here.
pub fn eval(expr: &Expr, env: &Rc<Env>) -> EvalResult<Value> {
    match expr {
        Expr::Identifier { name, line } => eval_identifier(name, env, *line),
        Expr::Number { value, .. } => Ok(Value::Number(*value)),
        Expr::Str { value, .. } => Ok(Value::Str(value.clone())),
        Expr::Boolean { value, .. } => Ok(Value::Boolean(*value)),
        Expr::Null { .. } => Ok(Value::Null),
        Expr::Prefix { operator, right, line } => {
            let right = eval(right, env)?;
            prefix::eval_prefix(*operator, right, *line)
        },
        Expr::Infix { left,
                      operator,
                      right,
                      line, } => {
            let left_value = eval(left, env)?;

            if *operator == InfixOperator::Dot {
                return infix::eval_field_access(left_value, right, *line);
            }

            let right_value = eval(right, env)?;
            infix::eval_infix(*operator, left_value, right_value, env, *line)
        },
        Expr::Declare { target, value, line } => {
            let value = eval(value, env)?;
            assign::eval_declare(target, value, env, *line)
        },
        Expr::Assign { target, value, line } => {
            let value = eval(value, env)?;
            assign::eval_assign(target, value, env, *line)
        },
        Expr::If { condition,
                   consequence,
                   alternative,
                   .. } => {
            let condition = eval(condition, env)?;

            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Ok(Value::Null)
            }
        },
        Expr::Function { parameters, body, .. } => {
            Ok(Value::Function(Rc::new(Function { parameters: parameters.clone(),
                                                  body:       body.clone(),
                                                  env:        Rc::clone(env), })))
        },
        Expr::Lambda { parameters, body, .. } => {
            Ok(Value::Lambda(Rc::new(Lambda { parameters: parameters.clone(),
                                              body:       (**body).clone(),
                                              env:        Rc::clone(env), })))
        },
        Expr::Call { function,
                     arguments,
                     line, } => {
            let function = eval(function, env)?;
            let args = eval_expressions(arguments, env)?;
            call::apply_function(function, args, env, *line)
        },
        Expr::Array { elements, .. } => {
            let elements = eval_expressions(elements, env)?;
            Ok(Value::Array(Rc::new(RefCell::new(elements))))
        },
        Expr::HashLiteral { pairs, line } => eval_hash_literal(pairs, env, *line),
        Expr::Index { left, index, line } => {
            let left = eval(left, env)?;
            let index_value = eval(index, env)?;
            index::eval_index(&left, &index_value, *line)
        },
        Expr::While { condition, body, .. } => loops::eval_while(condition, body, env),
        Expr::For { variable, set, body, line } => {
            loops::eval_for(variable, set, body, env, *line)
        },
        Expr::Model { parameters, parent, line } => {
            eval_model_literal(parameters, parent.as_ref(), env, *line)
        },
    }
}

/// Resolves a name: environment chain (with the model registry in front),
/// then the builtin table.
pub fn eval_identifier(name: &str, env: &Rc<Env>, line: usize) -> EvalResult<Value> {
    if let Some(value) = env.get(name) {
        return Ok(value);
    }

    if let Some(builtin) = builtins::lookup(name) {
        return Ok(Value::Builtin(builtin));
    }

    Err(RuntimeError::IdentifierNotFound { name: name.to_string(),
                                           line }.into())
}

/// Evaluates an expression list left to right, stopping at the first
/// signal.
pub fn eval_expressions(exprs: &[Expr], env: &Rc<Env>) -> EvalResult<Vec<Value>> {
    let mut values = Vec::with_capacity(exprs.len());

    for expr in exprs {
        values.push(eval(expr, env)?);
    }

    Ok(values)
}

/// Evaluates a hash literal into a hash bound to the root model.
///
/// A bare identifier key becomes a string key with the identifier's name;
/// any other key expression is evaluated and must yield a string.
fn eval_hash_literal(pairs: &[(Expr, Expr)], env: &Rc<Env>, line: usize) -> EvalResult<Value> {
    let hash = Hash::new(Rc::clone(env.models().object()));

    for (key_expr, value_expr) in pairs {
        let value = eval(value_expr, env)?;

        let key = match key_expr {
            Expr::Identifier { name, .. } => name.clone(),
            _ => match eval(key_expr, env)? {
                Value::Str(key) => key,
                other => {
                    return Err(RuntimeError::HashKeyKind { found: other.kind(),
                                                           line }.into());
                },
            },
        };

        hash.set(&key, value);
    }

    Ok(Value::Hash(hash))
}

/// Evaluates a model literal.
///
/// Without a parent clause the new model inherits from the root `object`
/// model with no construction arguments. With one, the named parent must
/// resolve to a model; its construction argument expressions are captured
/// unevaluated.
fn eval_model_literal(parameters: &[String],
                      parent: Option<&crate::ast::ParentSpec>,
                      env: &Rc<Env>,
                      line: usize)
                      -> EvalResult<Value> {
    let (parent_model, parent_args) = match parent {
        Some(spec) => match eval_identifier(&spec.name, env, spec.line)? {
            Value::Model(model) => (model, spec.args.clone()),
            other => {
                return Err(RuntimeError::ParentNotModel { found: other.kind(),
                                                          line }.into());
            },
        },
        None => (Rc::clone(env.models().object()), Vec::new()),
    };

    Ok(Value::Model(Model::new(parameters.to_vec(), parent_model, parent_args)))
}
