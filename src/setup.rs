//! `dop-avm setup`: copy the launcher under every alias name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[cfg(feature = "trace")]
use tracing::instrument;

/// Tool names that trigger container mode when the binary is invoked under them.
pub const ALIASES: &[&str] = &[
    "ansible",
    "ansible-playbook",
    "ansible-galaxy",
    "ansible-vault",
    "ansible-doc",
    "ansible-config",
    "ansible-console",
    "ansible-inventory",
    "ansible-adhoc",
    "ansible-lint",
    "molecule",
];

pub fn alias_names() -> Vec<String> {
    alias_names_for(cfg!(windows))
}

pub fn alias_names_for(windows: bool) -> Vec<String> {
    ALIASES
        .iter()
        .map(|n| {
            if windows {
                format!("{n}.exe")
            } else {
                (*n).to_string()
            }
        })
        .collect()
}

/// Copy `src` to `<target_dir>/<alias>` for every alias, marking copies executable.
///
/// Progress lines go to stdout. The first failure aborts the remaining copies.
#[cfg_attr(
    feature = "trace",
    instrument(
        level = "info",
        skip(src, target_dir),
        fields(src = %src.display(), dir = %target_dir.display())
    )
)]
pub fn copy_binary_to_aliases(src: &Path, target_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for name in alias_names() {
        let target = target_dir.join(&name);
        fs::copy(src, &target)
            .with_context(|| format!("error copying binary to {}", target.display()))?;
        println!("Binary copied to {}", target.display());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).with_context(
                || {
                    format!(
                        "error setting executable permission for {}",
                        target.display()
                    )
                },
            )?;
            println!("Executable permission set for {}", target.display());
        }

        written.push(target);
    }
    Ok(written)
}
