//! Binary entrypoint for the `buildlinks` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match buildlinks::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
