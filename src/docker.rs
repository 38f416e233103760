#![allow(clippy::module_name_repetitions)]
//! Docker integration.
//!
//! - runtime: locate the `docker` executable.
//! - engine: `ContainerEngine` trait and the `DockerCli` driver.
//! - mounts: bind-mount plan for the current directory and host credentials.
//! - env: allow-listed environment forwarding.
//! - spec: container create arguments and preview rendering.

pub mod engine;
pub mod env;
pub mod mounts;
pub mod runtime;
pub mod spec;
