use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{interpret, interpreter::env::Env};

const PROMPT: &str = "> ";

/// Runs the interactive loop until end of input or interruption.
///
/// Each line is interpreted in one persistent environment, so bindings,
/// models, and methods accumulate across lines. Parse and runtime errors
/// are printed and the loop continues; non-null results echo as
/// ` => <inspect>`.
///
/// # Errors
/// Returns an error if the line editor cannot be constructed.
pub fn start() -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let env = Env::global();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());

                match interpret(&line, &env) {
                    Ok(value) => {
                        if !value.is_null() {
                            println!(" => {value}");
                        }
                    },
                    Err(error) => println!("{error}"),
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => {
                println!("Error: {error:?}");
                break;
            },
        }
    }

    Ok(())
}
