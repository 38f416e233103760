use std::path::PathBuf;

use clap::{Parser, Subcommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("DOP_AVM_BUILD_DATE"),
    ", ",
    env!("DOP_AVM_BUILD_TARGET"),
    ", ",
    env!("DOP_AVM_BUILD_PROFILE"),
    ")"
);

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Copy this binary under the Ansible tool names (ansible, ansible-playbook, molecule, ...)
    Setup {
        /// Directory that receives the alias binaries (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Run diagnostics to check Docker, image and host mounts
    Doctor,
}

/// CLI of the primary `dop-avm` binary. Alias binaries never parse arguments.
#[derive(Parser, Debug)]
#[command(
    name = "dop-avm",
    version,
    long_version = LONG_VERSION,
    about = "DevOps Pass AI - Ansible Version Manager: run Ansible tooling inside Docker.",
    after_long_help = "Examples:\n  dop-avm setup\n  dop-avm setup --dir ~/.local/bin\n  dop-avm doctor\n\nAfter setup, run the aliases as usual, e.g.:\n  ansible-playbook -i inventory site.yml\n\nEnvironment:\n  DOP_AVM_IMAGE_NAME      image to run (default: devopspass/ansible:latest)\n  DOP_AVM_CONTAINER_NAME  fixed container name\n  DOP_AVM_VERBOSE=1       print the docker command before running it\n  DOP_AVM_DRY_RUN=1       print the docker command and exit\n"
)]
pub(crate) struct Cli {
    /// Colorize output: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<dop_avm::ColorMode>,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}
