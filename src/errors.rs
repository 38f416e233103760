//! Error mapping guide:
//! - Map io::ErrorKind::NotFound to exit code 127; all others to 1.
//! - LaunchError carries the user-visible wording; display_for_launch_error renders it.
//! - The container's own exit status never reaches these helpers.
use std::fmt;
use std::io;

/// Printed before the error text when the engine itself cannot be reached.
pub const ENGINE_UNAVAILABLE_HINT: &str =
    "ERROR: DOP Ansible Version Manager relies on Docker, so please ensure that it's installed and running.";

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

/// Container engine operations consumed by the launcher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineOp {
    Connect,
    Inspect,
    Pull,
    Create,
    Start,
    Logs,
}

impl EngineOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineOp::Connect => "creating Docker client",
            EngineOp::Inspect => "inspecting Docker image",
            EngineOp::Pull => "pulling Docker image",
            EngineOp::Create => "creating Docker container",
            EngineOp::Start => "starting Docker container",
            EngineOp::Logs => "streaming container logs",
        }
    }
}

/// Flat launcher error taxonomy. Every variant aborts the remaining steps.
#[derive(Debug)]
pub enum LaunchError {
    /// Environment or filesystem failure; the string names what was attempted.
    Io(String, io::Error),
    /// Docker binary missing or daemon unreachable during the given operation.
    EngineUnavailable(EngineOp, io::Error),
    /// An engine operation ran but reported failure.
    Engine(EngineOp, String),
}

impl LaunchError {
    pub fn io(what: &str, e: io::Error) -> Self {
        LaunchError::Io(what.to_string(), e)
    }

    pub fn is_engine_unavailable(&self) -> bool {
        matches!(self, LaunchError::EngineUnavailable(..))
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::Io(what, e) => write!(f, "Error {what}: {e}"),
            LaunchError::EngineUnavailable(op, e) => write!(f, "Error {}: {e}", op.as_str()),
            LaunchError::Engine(op, msg) => write!(f, "Error {}: {msg}", op.as_str()),
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::Io(_, e) | LaunchError::EngineUnavailable(_, e) => Some(e),
            LaunchError::Engine(..) => None,
        }
    }
}

/// Convert LaunchError to exit code (parity with io::Error mapping).
pub fn exit_code_for_launch_error(e: &LaunchError) -> u8 {
    match e {
        LaunchError::Io(_, ioe) | LaunchError::EngineUnavailable(_, ioe) => {
            exit_code_for_io_error(ioe)
        }
        LaunchError::Engine(..) => 1,
    }
}

/// Render the user-facing lines for a LaunchError.
pub fn display_for_launch_error(e: &LaunchError) -> Vec<String> {
    let mut lines = Vec::new();
    if e.is_engine_unavailable() {
        lines.push(ENGINE_UNAVAILABLE_HINT.to_string());
    }
    lines.push(e.to_string());
    lines
}

/// Print a LaunchError to stderr (color-aware).
pub fn report_launch_error(e: &LaunchError) {
    let use_err = crate::color_enabled_stderr();
    for line in display_for_launch_error(e) {
        crate::log_error_stderr(use_err, &line);
    }
}
