//! `transgen` - generate UO Landscaper transition XML

use std::process::ExitCode;

fn main() -> ExitCode {
    match transgen::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("An error occurred: {e:#}");
            ExitCode::FAILURE
        }
    }
}
