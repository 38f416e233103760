#![allow(clippy::module_name_repetitions)]
//! Container engine operations used by the launcher, and the docker CLI driver.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::docker::runtime::container_runtime_path;
use crate::docker::spec::ContainerSpec;
use crate::errors::{EngineOp, LaunchError};

/// The engine surface the launcher consumes: inspect, pull, create, start, logs.
pub trait ContainerEngine {
    /// True when the image is present locally.
    fn image_exists(&self, image: &str) -> Result<bool, LaunchError>;

    /// Pull the image, streaming progress to stdout.
    fn pull_image(&self, image: &str) -> Result<(), LaunchError>;

    /// Create the container and return its id.
    fn create_container(&self, spec: &ContainerSpec) -> Result<String, LaunchError>;

    fn start_container(&self, id: &str) -> Result<(), LaunchError>;

    /// Follow the combined output until the engine closes the stream.
    /// Returns the number of bytes copied to `out`.
    fn stream_logs(&self, id: &str, out: &mut dyn Write) -> Result<u64, LaunchError>;
}

/// Stderr fragments printed by the docker CLI when the daemon cannot be reached.
const UNREACHABLE_PATTERNS: &[&str] = &[
    "cannot connect to the docker daemon",
    "is the docker daemon running",
    "error during connect",
    "docker daemon is not running",
    "connect: connection refused",
    "connect: no such file or directory",
    "permission denied while trying to connect to the docker daemon",
    "connect: permission denied",
];

pub fn looks_engine_unreachable(stderr: &str) -> bool {
    let lower = stderr.to_ascii_lowercase();
    UNREACHABLE_PATTERNS.iter().any(|p| lower.contains(p))
}

pub fn looks_image_missing(stderr: &str) -> bool {
    let lower = stderr.to_ascii_lowercase();
    lower.contains("no such image") || lower.contains("no such object")
}

/// Turn a failed docker invocation into the matching error variant.
pub fn classify_failure(op: EngineOp, stderr: &str, status: &str) -> LaunchError {
    let msg = stderr.trim();
    let msg = if msg.is_empty() {
        format!("docker exited with {status}")
    } else {
        msg.to_string()
    };
    if looks_engine_unreachable(&msg) {
        let e = io::Error::new(io::ErrorKind::ConnectionRefused, msg);
        LaunchError::EngineUnavailable(op, e)
    } else {
        LaunchError::Engine(op, msg)
    }
}

/// Drives the `docker` executable found on PATH.
#[derive(Debug, Clone)]
pub struct DockerCli {
    runtime: PathBuf,
}

impl DockerCli {
    /// Locate the docker executable.
    pub fn connect() -> Result<Self, LaunchError> {
        container_runtime_path()
            .map(Self::with_runtime)
            .map_err(|e| LaunchError::EngineUnavailable(EngineOp::Connect, e))
    }

    pub fn with_runtime(runtime: PathBuf) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &Path {
        &self.runtime
    }

    /// `docker --version`, trimmed; None when it cannot be run.
    pub fn version(&self) -> Option<String> {
        let out = Command::new(&self.runtime).arg("--version").output().ok()?;
        let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
        (out.status.success() && !s.is_empty()).then_some(s)
    }

    fn captured(&self, op: EngineOp, args: &[&str]) -> Result<Output, LaunchError> {
        Command::new(&self.runtime)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| LaunchError::EngineUnavailable(op, e))
    }
}

impl ContainerEngine for DockerCli {
    #[cfg_attr(feature = "trace", instrument(level = "debug", skip(self)))]
    fn image_exists(&self, image: &str) -> Result<bool, LaunchError> {
        let out = self.captured(EngineOp::Inspect, &["image", "inspect", image])?;
        if out.status.success() {
            return Ok(true);
        }
        let stderr = String::from_utf8_lossy(&out.stderr);
        if looks_image_missing(&stderr) {
            return Ok(false);
        }
        Err(classify_failure(
            EngineOp::Inspect,
            &stderr,
            &out.status.to_string(),
        ))
    }

    #[cfg_attr(feature = "trace", instrument(level = "info", skip(self)))]
    fn pull_image(&self, image: &str) -> Result<(), LaunchError> {
        let out = Command::new(&self.runtime)
            .arg("pull")
            .arg(image)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| LaunchError::EngineUnavailable(EngineOp::Pull, e))?;
        if out.status.success() {
            return Ok(());
        }
        Err(classify_failure(
            EngineOp::Pull,
            &String::from_utf8_lossy(&out.stderr),
            &out.status.to_string(),
        ))
    }

    #[cfg_attr(
        feature = "trace",
        instrument(
            level = "info",
            skip(self, spec),
            fields(image = %spec.image, name = %spec.name)
        )
    )]
    fn create_container(&self, spec: &ContainerSpec) -> Result<String, LaunchError> {
        let args = spec.create_args();
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        let out = self.captured(EngineOp::Create, &argv)?;
        if !out.status.success() {
            return Err(classify_failure(
                EngineOp::Create,
                &String::from_utf8_lossy(&out.stderr),
                &out.status.to_string(),
            ));
        }
        let stdout = String::from_utf8_lossy(&out.stdout);
        stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .last()
            .map(str::to_string)
            .ok_or_else(|| {
                LaunchError::Engine(
                    EngineOp::Create,
                    "docker create returned no container id".to_string(),
                )
            })
    }

    #[cfg_attr(feature = "trace", instrument(level = "info", skip(self)))]
    fn start_container(&self, id: &str) -> Result<(), LaunchError> {
        let out = self.captured(EngineOp::Start, &["start", id])?;
        if out.status.success() {
            return Ok(());
        }
        Err(classify_failure(
            EngineOp::Start,
            &String::from_utf8_lossy(&out.stderr),
            &out.status.to_string(),
        ))
    }

    #[cfg_attr(feature = "trace", instrument(level = "info", skip(self, out)))]
    fn stream_logs(&self, id: &str, out: &mut dyn Write) -> Result<u64, LaunchError> {
        let mut child = Command::new(&self.runtime)
            .args(["logs", "--follow", id])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| LaunchError::EngineUnavailable(EngineOp::Logs, e))?;

        let copied = match child.stdout.take() {
            Some(mut pipe) => io::copy(&mut pipe, &mut *out),
            None => Ok(0),
        };
        let copied = match copied {
            Ok(n) => n,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(LaunchError::io("printing container logs", e));
            }
        };
        out.flush()
            .map_err(|e| LaunchError::io("printing container logs", e))?;

        let status = child
            .wait()
            .map_err(|e| LaunchError::EngineUnavailable(EngineOp::Logs, e))?;
        if !status.success() {
            return Err(LaunchError::Engine(
                EngineOp::Logs,
                format!("docker logs exited with {status}"),
            ));
        }
        Ok(copied)
    }
}
