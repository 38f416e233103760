//! dop-avm: run Ansible-family tooling inside Docker.
//!
//! The binary is copied under alias names (`ansible`, `ansible-playbook`, `molecule`, ...).
//! Invoked under an alias it creates a container from the Ansible image, mounts the current
//! directory plus well-known credential directories, forwards allow-listed environment
//! variables and streams the container output back to stdout.
//!
//! Module map
//! - invocation: argv0/executable name detection (primary vs alias mode).
//! - setup: alias list and binary self-copy.
//! - config: environment-driven settings for one run.
//! - docker::*: engine trait, docker CLI driver, mount/env planning, create-arg rendering.
//! - launcher: the sequential launch procedure.
//! - color / ui: color-aware stderr logging helpers.
//! - errors: launcher error taxonomy and exit code mapping.
//! - telemetry: optional `tracing` subscriber (feature `trace`).

mod color;
pub mod config;
pub mod docker;
mod errors;
pub mod invocation;
pub mod launcher;
pub mod setup;
mod telemetry;
mod ui;
pub mod util;

pub use color::*;
pub use config::{LaunchConfig, DEFAULT_IMAGE};
pub use docker::engine::{ContainerEngine, DockerCli};
pub use docker::env::{filter_env, ENV_PREFIXES};
pub use docker::mounts::{credentials_path, HostMounts, HostOs, MountContext};
pub use docker::runtime::container_runtime_path;
pub use docker::spec::ContainerSpec;
pub use errors::*;
pub use invocation::{binary_name, is_primary_invocation, Invocation, Mode, PRIMARY_NAME};
pub use launcher::{build_container_spec, run_container};
pub use setup::{alias_names, copy_binary_to_aliases, ALIASES};
pub use telemetry::{telemetry_init, TelemetryGuard};
pub use ui::warn::warn_print;
pub use util::{create_session_id, env_is_truthy, shell_escape, shell_join};

/// Version reported by help output and `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
