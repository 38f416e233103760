#![allow(clippy::module_name_repetitions)]
//! Bind-mount policy for the Ansible container.
//!
//! Order of the resulting binds:
//! 1. current directory -> /ansible, engine socket -> itself (always)
//! 2. ~/.ssh, ~/.aws, ~/.azure, ~/.ansible -> /root/<name> (when present; ~/.ansible is created)
//! 3. SSH agent socket (platform dependent)
//! 4. gcloud application default credentials (when the file exists)
//!
//! `~/.ansible` is mounted only at `/root/.ansible`; no second `/.ansible` bind is added.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::LaunchConfig;
use crate::errors::LaunchError;

pub const WORKDIR_MOUNT: &str = "/ansible";
pub const DOCKER_SOCKET: &str = "/var/run/docker.sock";
pub const HOME_DIRS: &[&str] = &[".ssh", ".aws", ".azure", ".ansible"];
pub const ANSIBLE_HOME_DIR: &str = ".ansible";

/// Docker Desktop (macOS/Windows) exposes the host agent at this fixed path inside the VM.
pub const DESKTOP_SSH_AUTH_SOCK: &str = "/run/host-services/ssh-auth.sock";
pub const CONTAINER_SSH_AUTH_SOCK: &str = "/tmp/ssh-auth.sock";
pub const CONTAINER_CREDENTIALS_PATH: &str =
    "/root/.config/gcloud/application_default_credentials.json";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            HostOs::Windows
        } else if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else if cfg!(target_os = "linux") {
            HostOs::Linux
        } else {
            HostOs::Other
        }
    }

    fn uses_desktop_agent_socket(self) -> bool {
        matches!(self, HostOs::MacOs | HostOs::Windows)
    }
}

/// Host facts the mount plan depends on.
#[derive(Clone, Debug)]
pub struct MountContext {
    pub cwd: PathBuf,
    pub home: PathBuf,
    pub os: HostOs,
    pub ssh_auth_sock: Option<String>,
    pub credentials_override: Option<String>,
    pub user_profile: Option<PathBuf>,
}

impl MountContext {
    pub fn from_env(cwd: PathBuf, config: &LaunchConfig) -> Result<Self, LaunchError> {
        let home = home::home_dir().ok_or_else(|| {
            LaunchError::io(
                "getting home directory",
                io::Error::new(io::ErrorKind::NotFound, "home directory is not set"),
            )
        })?;
        Ok(Self {
            cwd,
            home,
            os: HostOs::current(),
            ssh_auth_sock: crate::util::env_non_empty("SSH_AUTH_SOCK"),
            credentials_override: config.credentials_override.clone(),
            user_profile: crate::util::env_non_empty("USERPROFILE").map(PathBuf::from),
        })
    }
}

/// Bind specs plus the env assignments that belong to them (SSH agent).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostMounts {
    pub binds: Vec<String>,
    pub env: Vec<String>,
}

impl HostMounts {
    fn bind(&mut self, host: &Path, container: &str) {
        self.binds.push(format!("{}:{container}", host.display()));
    }
}

/// Build the mount plan. Creates `~/.ansible` (0755) when missing.
pub fn plan_host_mounts(ctx: &MountContext) -> HostMounts {
    let mut m = HostMounts::default();
    m.bind(&ctx.cwd, WORKDIR_MOUNT);
    m.bind(Path::new(DOCKER_SOCKET), DOCKER_SOCKET);

    let ansible_dir = ctx.home.join(ANSIBLE_HOME_DIR);
    if !ansible_dir.exists() {
        match create_dir_0755(&ansible_dir) {
            Ok(()) => println!("Created directory {}", ansible_dir.display()),
            Err(e) => crate::warn_print(&format!(
                "Error creating directory {}: {}",
                ansible_dir.display(),
                e
            )),
        }
    }

    for name in HOME_DIRS {
        let dir = ctx.home.join(name);
        if dir.exists() {
            m.bind(&dir, &format!("/root/{name}"));
        }
    }

    if let Some((bind, env)) = agent_socket_mount(ctx) {
        m.binds.push(bind);
        m.env.push(env);
    }

    if let Some(creds) = credentials_path(ctx) {
        if creds.exists() {
            m.bind(&creds, CONTAINER_CREDENTIALS_PATH);
        }
    }

    m
}

/// SSH agent bind and the matching `SSH_AUTH_SOCK` assignment. No filesystem access.
pub fn agent_socket_mount(ctx: &MountContext) -> Option<(String, String)> {
    if ctx.os.uses_desktop_agent_socket() {
        return Some((
            format!("{DESKTOP_SSH_AUTH_SOCK}:{DESKTOP_SSH_AUTH_SOCK}"),
            format!("SSH_AUTH_SOCK={DESKTOP_SSH_AUTH_SOCK}"),
        ));
    }
    ctx.ssh_auth_sock
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|sock| {
            (
                format!("{sock}:{CONTAINER_SSH_AUTH_SOCK}"),
                format!("SSH_AUTH_SOCK={CONTAINER_SSH_AUTH_SOCK}"),
            )
        })
}

/// Credentials file: explicit override, else the platform's gcloud default location.
pub fn credentials_path(ctx: &MountContext) -> Option<PathBuf> {
    if let Some(p) = ctx
        .credentials_override
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        return Some(PathBuf::from(p));
    }
    match ctx.os {
        HostOs::Windows => ctx.user_profile.as_ref().map(|up| {
            up.join("AppData")
                .join("Roaming")
                .join("gcloud")
                .join("application_default_credentials.json")
        }),
        _ => Some(
            ctx.home
                .join(".config")
                .join("gcloud")
                .join("application_default_credentials.json"),
        ),
    }
}

#[cfg(unix)]
fn create_dir_0755(p: &Path) -> io::Result<()> {
    use nix::sys::stat::Mode;
    nix::unistd::mkdir(p, Mode::from_bits_truncate(0o755)).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn create_dir_0755(p: &Path) -> io::Result<()> {
    fs::create_dir(p)
}

/// True when `p` is an existing directory (used by doctor output).
pub fn is_dir(p: &Path) -> bool {
    fs::metadata(p).map(|m| m.is_dir()).unwrap_or(false)
}
