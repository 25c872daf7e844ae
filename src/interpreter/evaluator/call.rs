use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::core::{eval, eval_block, EvalResult, Signal},
        value::{core::Value, hash::{Hash, MethodInstance}, model::Model},
    },
};

/// Applies a callable to already-evaluated arguments with a null `this`.
pub fn apply_function(function: Value,
                      args: Vec<Value>,
                      env: &Rc<Env>,
                      line: usize)
                      -> EvalResult<Value> {
    apply_with_this(function, Value::Null, args, env, line)
}

/// Applies a callable with an explicit `this` binding.
///
/// Functions and lambdas run in a fresh scope enclosing their captured
/// environment, with parameters and `this` declared; arity is strict. A
/// `return` unwinding out of the body is unwrapped here. Calling a method
/// instance rebinds `this` to its host hash; calling a model instantiates
/// it; builtins are invoked directly.
pub fn apply_with_this(function: Value,
                       this: Value,
                       args: Vec<Value>,
                       env: &Rc<Env>,
                       line: usize)
                       -> EvalResult<Value> {
    match function {
        Value::Function(function) => {
            if function.parameters.len() != args.len() {
                return Err(RuntimeError::WrongArgumentCount { expected:
                                                                  function.parameters.len(),
                                                              found: args.len(),
                                                              line }.into());
            }

            let scope = Env::enclosed(&function.env);
            for (parameter, arg) in function.parameters.iter().zip(args) {
                scope.declare(parameter, arg);
            }
            scope.declare("this", this);

            match eval_block(&function.body, &scope) {
                Err(Signal::Return(value)) => Ok(value),
                other => other,
            }
        },
        Value::Lambda(lambda) => {
            if lambda.parameters.len() != args.len() {
                return Err(RuntimeError::WrongArgumentCount { expected:
                                                                  lambda.parameters.len(),
                                                              found: args.len(),
                                                              line }.into());
            }

            let scope = Env::enclosed(&lambda.env);
            for (parameter, arg) in lambda.parameters.iter().zip(args) {
                scope.declare(parameter, arg);
            }
            scope.declare("this", this);

            match eval(&lambda.body, &scope) {
                Err(Signal::Return(value)) => Ok(value),
                other => other,
            }
        },
        Value::Model(model) => instantiate(&model, args, env, line),
        Value::Method(method) => {
            let this = method.hash
                             .as_ref()
                             .map_or(Value::Null, |hash| Value::Hash(Rc::clone(hash)));
            apply_with_this(method.function.clone(), this, args, env, line)
        },
        Value::Builtin(builtin) => (builtin.func)(this, args, line),
        other => Err(RuntimeError::NotCallable { found: other.kind(),
                                                 line }.into()),
    }
}

/// Instantiates a model into a hash.
///
/// The arguments populate the model's declared properties, arity-strict.
/// If the model has a parent, the parent's construction expressions run in
/// a scope where the model's own property names are bound to the
/// arguments, and the results populate the parent's properties. If the
/// model chain resolves a `_new` method, it is invoked with no arguments
/// and `this` bound to the fresh hash, and its return value replaces it.
fn instantiate(model: &Rc<Model>, args: Vec<Value>, env: &Rc<Env>, line: usize)
               -> EvalResult<Value> {
    if model.properties().len() != args.len() {
        return Err(RuntimeError::WrongArgumentCount { expected: model.properties().len(),
                                                      found:    args.len(),
                                                      line }.into());
    }

    let hash = Hash::new(Rc::clone(model));
    let scope = Env::enclosed(env);

    for (property, arg) in model.properties().iter().zip(&args) {
        hash.set(property, arg.clone());
        scope.declare(property, arg.clone());
    }

    if let Some(parent) = model.parent() {
        if model.parent_args().len() != parent.properties().len() {
            return Err(RuntimeError::WrongArgumentCount { expected: parent.properties().len(),
                                                          found:    model.parent_args().len(),
                                                          line }.into());
        }

        for (property, arg_expr) in parent.properties().iter().zip(model.parent_args()) {
            let value = eval(arg_expr, &scope)?;
            hash.set(property, value);
        }
    }

    if let Some(constructor) = model.resolve_method("_new") {
        let method = Value::Method(Rc::new(MethodInstance { function: constructor,
                                                            hash:     Some(Rc::clone(&hash)), }));
        return apply_function(method, Vec::new(), env, line);
    }

    Ok(Value::Hash(hash))
}
