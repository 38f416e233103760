/*!
Test support helpers shared across integration tests.

- mount_ctx(home, cwd, os): MountContext with no agent socket or credential override
- vars(pairs): owned (KEY, VALUE) pairs for env filtering
- have_docker(): docker CLI present and daemon answering
- copy_bin_as(dir, name): copy the built dop-avm binary under another name

These helpers do not print skip messages themselves so tests keep their
own "skipping: ..." outputs.
*/

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use dop_avm::{HostOs, MountContext};

#[allow(dead_code)]
pub fn mount_ctx(home: &Path, cwd: &Path, os: HostOs) -> MountContext {
    MountContext {
        cwd: cwd.to_path_buf(),
        home: home.to_path_buf(),
        os,
        ssh_auth_sock: None,
        credentials_override: None,
        user_profile: None,
    }
}

#[allow(dead_code)]
pub fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Return true if docker is on PATH and `docker info` succeeds.
#[allow(dead_code)]
pub fn have_docker() -> bool {
    let Ok(rt) = dop_avm::container_runtime_path() else {
        return false;
    };
    Command::new(rt)
        .arg("info")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Copy the dop-avm binary into `dir` as `name` (alias mode when name != dop-avm).
#[allow(dead_code)]
pub fn copy_bin_as(dir: &Path, name: &str) -> PathBuf {
    let src = PathBuf::from(env!("CARGO_BIN_EXE_dop-avm"));
    let dst = dir.join(name);
    std::fs::copy(&src, &dst).expect("copy dop-avm binary");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&dst, std::fs::Permissions::from_mode(0o755))
            .expect("chmod copied binary");
    }
    dst
}
