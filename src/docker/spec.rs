#![allow(clippy::module_name_repetitions)]
//! Container create arguments and preview rendering.

/// Everything `docker create` needs for one launcher run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerSpec {
    pub image: String,
    pub name: String,
    /// Alias name followed by the forwarded arguments.
    pub cmd: Vec<String>,
    /// `KEY=VALUE` assignments.
    pub env: Vec<String>,
    /// `host:container` bind specs.
    pub binds: Vec<String>,
    pub tty: bool,
    pub auto_remove: bool,
}

impl ContainerSpec {
    /// Arguments after the docker executable, starting with `create`.
    pub fn create_args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec!["create".to_string()];
        args.push("--name".to_string());
        args.push(self.name.clone());
        if self.tty {
            args.push("-t".to_string());
        }
        if self.auto_remove {
            args.push("--rm".to_string());
        }
        for stream in ["stdout", "stderr"] {
            args.push("-a".to_string());
            args.push(stream.to_string());
        }
        for b in &self.binds {
            args.push("-v".to_string());
            args.push(b.clone());
        }
        for e in &self.env {
            args.push("-e".to_string());
            args.push(e.clone());
        }
        args.push(self.image.clone());
        args.extend(self.cmd.iter().cloned());
        args
    }

    /// Single-line, shell-escaped `docker create ...` preview.
    pub fn preview(&self) -> String {
        let mut words = vec!["docker".to_string()];
        words.extend(self.create_args());
        crate::shell_join(&words)
    }
}
