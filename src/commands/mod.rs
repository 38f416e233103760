use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use dop_avm::docker::env::host_env_vars;
use dop_avm::launcher::{preview_container, resolve_cwd, run_container};
use dop_avm::{
    exit_code_for_launch_error, report_launch_error, DockerCli, Invocation, LaunchConfig,
    LaunchError, MountContext, PRIMARY_NAME, VERSION,
};

use crate::cli::{Cli, Command};
use crate::doctor::run_doctor;

pub fn print_help_banner() {
    println!("DevOps Pass AI - Ansible Version Manager v{VERSION}");
    println!("Run '{PRIMARY_NAME} setup' to setup Ansible binaries.");
}

/// Primary `dop-avm` surface: setup, doctor, or the help banner.
pub fn run_primary(inv: &Invocation) -> ExitCode {
    let argv = std::iter::once(PRIMARY_NAME.to_string()).chain(inv.args.iter().cloned());
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            let _ = e.print();
            print_help_banner();
            return ExitCode::from(2);
        }
    };
    if let Some(mode) = cli.color {
        dop_avm::set_color_mode(mode);
    }

    match cli.command {
        Some(Command::Setup { dir }) => run_setup(inv, dir),
        Some(Command::Doctor) => run_doctor(),
        None => {
            print_help_banner();
            ExitCode::SUCCESS
        }
    }
}

fn run_setup(inv: &Invocation, dir: Option<PathBuf>) -> ExitCode {
    let target_dir = dir.unwrap_or_else(|| PathBuf::from("."));
    match dop_avm::copy_binary_to_aliases(&inv.exe, &target_dir) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let use_err = dop_avm::color_enabled_stderr();
            dop_avm::log_error_stderr(use_err, &format!("{e:#}"));
            let code = e
                .downcast_ref::<io::Error>()
                .map(dop_avm::exit_code_for_io_error)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

/// Alias mode: launch the container and relay its output.
pub fn run_launch(inv: &Invocation) -> ExitCode {
    let config = LaunchConfig::from_env();
    match launch(inv, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_launch_error(&e);
            ExitCode::from(exit_code_for_launch_error(&e))
        }
    }
}

fn launch(inv: &Invocation, config: &LaunchConfig) -> Result<(), LaunchError> {
    let cwd = resolve_cwd()?;
    let host_env = host_env_vars();

    if config.dry_run {
        let ctx = MountContext::from_env(cwd, config)?;
        preview_container(inv, config, &ctx, &host_env);
        return Ok(());
    }

    let engine = DockerCli::connect()?;
    let ctx = MountContext::from_env(cwd, config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_container(&engine, inv, config, &ctx, &host_env, &mut out)
}
