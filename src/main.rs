//! unitclosure binary entry point.

use std::process::ExitCode;

use unitclosure::cli;
use unitclosure::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
