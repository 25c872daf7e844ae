use std::{
    io::{self, BufRead, Write},
    rc::Rc,
    thread,
    time::Duration,
};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::{Builtin, Value}},
};

/// Looks up a builtin by name.
///
/// Builtins are globally in scope but resolve after the environment, so a
/// user binding of the same name shadows them.
#[must_use]
pub fn lookup(name: &str) -> Option<Builtin> {
    let builtin = match name {
        "print" => Builtin { name: "print",
                             func: print, },
        "err" => Builtin { name: "err",
                           func: err, },
        "str" => Builtin { name: "str",
                           func: str, },
        "input" => Builtin { name: "input",
                             func: input, },
        "type" => Builtin { name: "type",
                            func: type_of, },
        "parent" => Builtin { name: "parent",
                              func: parent_of, },
        "sleep" => Builtin { name: "sleep",
                             func: sleep, },
        _ => return None,
    };

    Some(builtin)
}

/// `print(...values)`: writes each value's inspect form separated by
/// spaces, then a newline. Yields null.
fn print(_this: Value, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    for arg in &args {
        print!("{arg} ");
    }
    println!();

    Ok(Value::Null)
}

/// `err(...values)`: builds a message by space-joining inspect forms and
/// yields an error with it. The error is a real runtime error: it unwinds
/// like any other.
fn err(_this: Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let mut message = String::new();
    for arg in &args {
        message.push_str(&arg.to_string());
        message.push(' ');
    }

    Err(RuntimeError::Custom { message, line }.into())
}

/// `str(value)`: the value's inspect form as a string.
fn str(_this: Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(RuntimeError::BuiltinArity { builtin: "str",
                                                expected: "exactly one argument",
                                                line }.into());
    }

    Ok(Value::Str(args[0].to_string()))
}

/// `input(prompt)`: prints the prompt, reads one line from standard input
/// with the trailing newline stripped, and yields it as a string.
fn input(_this: Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(RuntimeError::BuiltinArity { builtin: "input",
                                                expected: "exactly one argument",
                                                line }.into());
    }

    print!("{}", args[0]);
    let _ = io::stdout().flush();

    let mut text = String::new();
    if io::stdin().lock().read_line(&mut text).is_err() {
        return Err(RuntimeError::InputFailed { line }.into());
    }

    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }

    Ok(Value::Str(text))
}

/// `type(hash)`: the model the hash was instantiated from.
fn type_of(_this: Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(RuntimeError::BuiltinArity { builtin: "type",
                                                expected: "exactly one argument",
                                                line }.into());
    }

    match &args[0] {
        Value::Hash(hash) => Ok(Value::Model(Rc::clone(hash.model()))),
        _ => Err(RuntimeError::BuiltinArgument { builtin: "type",
                                                 expected: "hash",
                                                 line }.into()),
    }
}

/// `parent(hash)`: the parent of the hash's model, or null.
fn parent_of(_this: Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(RuntimeError::BuiltinArity { builtin: "parent",
                                                expected: "exactly one argument",
                                                line }.into());
    }

    match &args[0] {
        Value::Hash(hash) => Ok(hash.model()
                                    .parent()
                                    .map_or(Value::Null, |parent| {
                                        Value::Model(Rc::clone(parent))
                                    })),
        _ => Err(RuntimeError::BuiltinArgument { builtin: "parent",
                                                 expected: "hash",
                                                 line }.into()),
    }
}

/// `sleep(seconds)`: blocks the thread for the given whole number of
/// seconds (fractions truncate). Yields null.
fn sleep(_this: Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(RuntimeError::BuiltinArity { builtin: "sleep",
                                                expected: "exactly one argument",
                                                line }.into());
    }

    match args[0] {
        Value::Number(seconds) => {
            thread::sleep(Duration::from_secs(seconds.max(0.0) as u64));
            Ok(Value::Null)
        },
        _ => Err(RuntimeError::BuiltinArgument { builtin: "sleep",
                                                 expected: "number",
                                                 line }.into()),
    }
}
