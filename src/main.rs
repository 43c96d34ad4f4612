//! Task Burrito - Markdown task files into structured reports

use std::process::ExitCode;

fn main() -> ExitCode {
    match task_burrito::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
