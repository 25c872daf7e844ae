use std::fs;

use clap::Parser;
use molde::{interpret, interpreter::env::Env, repl};

/// molde is a small dynamically-typed scripting language built around
/// prototype models.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a script to run. Without one, an interactive session
    /// starts.
    script: Option<String>,
}

fn main() {
    let args = Args::parse();

    match args.script {
        Some(path) => run_file(&path),
        None => start_repl(),
    }
}

fn run_file(path: &str) {
    let source = fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("Failed to read the script '{path}'. Perhaps this file does not exist?");
        std::process::exit(1);
    });

    let env = Env::global();

    if let Err(error) = interpret(&source, &env) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

fn start_repl() {
    println!("molde {}", env!("CARGO_PKG_VERSION"));

    if let Err(error) = repl::start() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
