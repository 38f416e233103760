use std::process::ExitCode;

use dop_avm::{Invocation, Mode};

mod cli;
mod commands;
mod doctor;

fn main() -> ExitCode {
    let _telemetry = dop_avm::telemetry_init();

    let inv = match Invocation::detect() {
        Ok(inv) => inv,
        Err(e) => {
            let use_err = dop_avm::color_enabled_stderr();
            dop_avm::log_error_stderr(use_err, &format!("Error getting current binary path: {e}"));
            return ExitCode::from(dop_avm::exit_code_for_io_error(&e));
        }
    };

    match inv.mode {
        Mode::Primary => commands::run_primary(&inv),
        Mode::Alias => commands::run_launch(&inv),
    }
}
