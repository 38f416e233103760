use std::process::ExitCode;

use dop_avm::docker::engine::ContainerEngine;
use dop_avm::docker::env::{filter_env, host_env_vars};
use dop_avm::docker::mounts::{agent_socket_mount, is_dir, HOME_DIRS};
use dop_avm::{credentials_path, DockerCli, LaunchConfig, MountContext, ENV_PREFIXES};

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Print diagnostics to stderr. Read-only: nothing is created or pulled.
pub fn run_doctor() -> ExitCode {
    let config = LaunchConfig::from_env();
    eprintln!("dop-avm doctor");
    eprintln!(
        "  version: v{} (built {}, {})",
        dop_avm::VERSION,
        env!("DOP_AVM_BUILD_DATE"),
        env!("DOP_AVM_BUILD_TARGET")
    );
    eprintln!(
        "  host: {} / {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    let engine = match DockerCli::connect() {
        Ok(engine) => {
            eprintln!("  docker: {}", engine.runtime().display());
            if let Some(v) = engine.version() {
                eprintln!("  docker --version: {}", v);
            }
            Some(engine)
        }
        Err(e) => {
            eprintln!("  docker: not found ({e})");
            None
        }
    };

    eprintln!("  image: {}", config.image);
    if let Some(engine) = &engine {
        match engine.image_exists(&config.image) {
            Ok(present) => eprintln!("  image present locally: {}", yes_no(present)),
            Err(e) => eprintln!("  image present locally: unknown ({e})"),
        }
    }

    match dop_avm::launcher::resolve_cwd()
        .and_then(|cwd| MountContext::from_env(cwd, &config))
    {
        Ok(ctx) => {
            eprintln!("  workdir: {} -> /ansible", ctx.cwd.display());
            for name in HOME_DIRS {
                let p = ctx.home.join(name);
                eprintln!("  ~/{}: {}", name, yes_no(is_dir(&p)));
            }
            match credentials_path(&ctx) {
                Some(p) => eprintln!(
                    "  credentials: {} (exists: {})",
                    p.display(),
                    yes_no(p.is_file())
                ),
                None => eprintln!("  credentials: (no default path)"),
            }
            match agent_socket_mount(&ctx) {
                Some((bind, _)) => eprintln!("  ssh agent: {bind}"),
                None => eprintln!("  ssh agent: (not set)"),
            }
        }
        Err(e) => eprintln!("  mounts: unavailable ({e})"),
    }

    let forwarded = filter_env(host_env_vars());
    eprintln!(
        "  forwarded env ({}): {}",
        ENV_PREFIXES.join(" "),
        forwarded.len()
    );
    for kv in forwarded {
        let key = kv.split_once('=').map(|(k, _)| k).unwrap_or(kv.as_str());
        eprintln!("    {key}=***");
    }

    eprintln!("doctor: completed diagnostics.");
    ExitCode::SUCCESS
}
