//! Alias-mode launch procedure.
//!
//! Steps run strictly in order and the first failure aborts the rest:
//! image check/pull, mount + env planning, create, start, log streaming.

use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::config::LaunchConfig;
use crate::docker::engine::ContainerEngine;
use crate::docker::env::filter_env;
use crate::docker::mounts::{plan_host_mounts, MountContext};
use crate::docker::spec::ContainerSpec;
use crate::errors::LaunchError;
use crate::invocation::Invocation;

/// Current directory, canonicalized when possible.
pub fn resolve_cwd() -> Result<PathBuf, LaunchError> {
    let p = env::current_dir().map_err(|e| LaunchError::io("getting current directory", e))?;
    Ok(fs::canonicalize(&p).unwrap_or(p))
}

/// Assemble the container spec: mounts (creating ~/.ansible if needed), filtered env, command.
pub fn build_container_spec(
    inv: &Invocation,
    config: &LaunchConfig,
    ctx: &MountContext,
    host_env: &[(String, String)],
) -> ContainerSpec {
    let mounts = plan_host_mounts(ctx);
    let mut env = filter_env(host_env.iter().cloned());
    env.extend(mounts.env);
    ContainerSpec {
        image: config.image.clone(),
        name: config.container_name_for(&inv.alias),
        cmd: inv.command(),
        env,
        binds: mounts.binds,
        tty: true,
        auto_remove: true,
    }
}

/// Pull the image when it is not present locally. Returns true when a pull happened.
pub fn ensure_image(engine: &dyn ContainerEngine, image: &str) -> Result<bool, LaunchError> {
    if engine.image_exists(image)? {
        return Ok(false);
    }
    println!("Image {image} not found locally, pulling...");
    engine.pull_image(image)?;
    Ok(true)
}

fn print_plan(inv: &Invocation, spec: &ContainerSpec) {
    let use_err = crate::color_enabled_stderr();
    crate::log_info_stderr(use_err, &format!("dop-avm: image: {}", spec.image));
    crate::log_info_stderr(use_err, &format!("dop-avm: alias: {}", inv.alias));
    crate::log_info_stderr(use_err, &format!("dop-avm: docker: {}", spec.preview()));
}

/// Build and print the container spec without touching the engine.
pub fn preview_container(
    inv: &Invocation,
    config: &LaunchConfig,
    ctx: &MountContext,
    host_env: &[(String, String)],
) -> ContainerSpec {
    let spec = build_container_spec(inv, config, ctx, host_env);
    print_plan(inv, &spec);
    let use_err = crate::color_enabled_stderr();
    crate::log_info_stderr(use_err, "dop-avm: dry-run requested; not executing Docker.");
    spec
}

/// Run one container for this invocation and copy its output to `out` until it exits.
///
/// The container's own exit status is not inspected.
#[cfg_attr(
    feature = "trace",
    instrument(
        level = "info",
        skip(engine, inv, config, ctx, host_env, out),
        fields(alias = %inv.alias, image = %config.image)
    )
)]
pub fn run_container(
    engine: &dyn ContainerEngine,
    inv: &Invocation,
    config: &LaunchConfig,
    ctx: &MountContext,
    host_env: &[(String, String)],
    out: &mut dyn Write,
) -> Result<(), LaunchError> {
    ensure_image(engine, &config.image)?;

    let spec = build_container_spec(inv, config, ctx, host_env);
    if config.verbose {
        print_plan(inv, &spec);
    }

    let id = engine.create_container(&spec)?;
    engine.start_container(&id)?;
    let copied = engine.stream_logs(&id, out)?;

    #[cfg(feature = "trace")]
    tracing::debug!(container = %id, bytes = copied, "log stream closed");
    #[cfg(not(feature = "trace"))]
    let _ = copied;

    Ok(())
}
