use std::fs;
use std::path::PathBuf;
use std::process;

use rasp::{Environment, eval_program, register_stdlib};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rasp_history"))
}

fn repl() {
    let env = Environment::new();
    register_stdlib(&env);

    println!("rasp {}", env!("CARGO_PKG_VERSION"));
    println!("Type expressions to evaluate, Ctrl-D to quit");
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to start line editor: {e}");
            return;
        }
    };
    let history = history_path();
    if let Some(path) = &history {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match eval_program(line, &env) {
                    Ok(result) => println!("{result}"),
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("readline error: {e}");
                break;
            }
        }
    }

    if let Some(path) = &history {
        let _ = rl.save_history(path);
    }
}

fn run_file(filename: &str) -> Result<(), String> {
    let source = fs::read_to_string(filename)
        .map_err(|e| format!("Failed to read file '{filename}': {e}"))?;

    if source.trim().is_empty() {
        return Ok(());
    }

    let env = Environment::new();
    register_stdlib(&env);

    let result = eval_program(&source, &env).map_err(|e| e.to_string())?;
    println!("{result}");
    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  rasp              Start interactive REPL");
    eprintln!("  rasp <file.lisp>  Run a Lisp file");
    eprintln!("  rasp --help       Show this help message");
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match args.len() {
        1 => repl(),
        2 => {
            let arg = &args[1];
            if arg == "--help" || arg == "-h" {
                print_usage();
            } else if let Err(e) = run_file(arg) {
                eprintln!("{e}");
                process::exit(1);
            }
        }
        _ => {
            eprintln!("Error: Too many arguments");
            print_usage();
            process::exit(1);
        }
    }
}
