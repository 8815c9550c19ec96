//! todo - manage a todo.txt file from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todotxt::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
