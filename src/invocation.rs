//! Invocation-name detection: primary `dop-avm` binary vs. alias copies.

use std::env;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

pub const PRIMARY_NAME: &str = "dop-avm";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Invoked as `dop-avm`: setup/doctor/help surface.
    Primary,
    /// Invoked under any other name: launch the container.
    Alias,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub exe: PathBuf,
    pub mode: Mode,
    /// Tool name inferred from argv0 (`.exe` stripped on Windows).
    pub alias: String,
    /// Everything after argv0, forwarded verbatim in alias mode.
    pub args: Vec<String>,
}

impl Invocation {
    pub fn detect() -> io::Result<Self> {
        let exe = env::current_exe()?;
        Ok(Self::from_parts(exe, env::args_os().collect()))
    }

    pub fn from_parts(exe: PathBuf, argv: Vec<OsString>) -> Self {
        let mut it = argv.into_iter();
        let alias = it
            .next()
            .map(|a0| binary_name(&a0))
            .unwrap_or_else(|| PRIMARY_NAME.to_string());
        let args = it.map(|a| a.to_string_lossy().to_string()).collect();
        let mode = if is_primary_invocation(&exe) {
            Mode::Primary
        } else {
            Mode::Alias
        };
        Self {
            exe,
            mode,
            alias,
            args,
        }
    }

    /// Container command vector: alias name followed by the forwarded arguments.
    pub fn command(&self) -> Vec<String> {
        let mut cmd = Vec::with_capacity(self.args.len() + 1);
        cmd.push(self.alias.clone());
        cmd.extend(self.args.iter().cloned());
        cmd
    }
}

/// Base name of argv0; `.exe` is removed on Windows.
pub fn binary_name(argv0: &OsStr) -> String {
    binary_name_for(argv0, cfg!(windows))
}

pub fn binary_name_for(argv0: &OsStr, windows: bool) -> String {
    let base = Path::new(argv0)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| argv0.to_string_lossy().to_string());
    if windows {
        base.replace(".exe", "")
    } else {
        base
    }
}

/// True when the resolved executable path ends with the primary binary name.
pub fn is_primary_invocation(exe: &Path) -> bool {
    let s = exe.to_string_lossy();
    s.ends_with(PRIMARY_NAME) || s.ends_with(&format!("{PRIMARY_NAME}.exe"))
}
