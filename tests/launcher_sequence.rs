use std::cell::RefCell;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use dop_avm::{
    run_container, ContainerEngine, ContainerSpec, EngineOp, HostOs, Invocation, LaunchConfig,
    LaunchError,
};

mod support;

/// Records every engine call; `fail_at` makes that operation fail.
struct RecordingEngine {
    present: bool,
    fail_at: Option<EngineOp>,
    unreachable: bool,
    logs: &'static [u8],
    calls: RefCell<Vec<String>>,
    created: RefCell<Option<ContainerSpec>>,
}

impl RecordingEngine {
    fn new(present: bool) -> Self {
        Self {
            present,
            fail_at: None,
            unreachable: false,
            logs: b"PLAY [all] ***\nok: [localhost]\n",
            calls: RefCell::new(Vec::new()),
            created: RefCell::new(None),
        }
    }

    fn failing_at(mut self, op: EngineOp) -> Self {
        self.fail_at = Some(op);
        self
    }

    fn check(&self, op: EngineOp, call: String) -> Result<(), LaunchError> {
        self.calls.borrow_mut().push(call);
        if self.fail_at != Some(op) {
            return Ok(());
        }
        if self.unreachable {
            Err(LaunchError::EngineUnavailable(
                op,
                io::Error::new(io::ErrorKind::ConnectionRefused, "daemon down"),
            ))
        } else {
            Err(LaunchError::Engine(op, "boom".to_string()))
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ContainerEngine for RecordingEngine {
    fn image_exists(&self, image: &str) -> Result<bool, LaunchError> {
        self.check(EngineOp::Inspect, format!("inspect {image}"))?;
        Ok(self.present)
    }

    fn pull_image(&self, image: &str) -> Result<(), LaunchError> {
        self.check(EngineOp::Pull, format!("pull {image}"))
    }

    fn create_container(&self, spec: &ContainerSpec) -> Result<String, LaunchError> {
        self.check(EngineOp::Create, format!("create {}", spec.name))?;
        *self.created.borrow_mut() = Some(spec.clone());
        Ok("c0ffee".to_string())
    }

    fn start_container(&self, id: &str) -> Result<(), LaunchError> {
        self.check(EngineOp::Start, format!("start {id}"))
    }

    fn stream_logs(&self, id: &str, out: &mut dyn Write) -> Result<u64, LaunchError> {
        self.check(EngineOp::Logs, format!("logs {id}"))?;
        out.write_all(self.logs)
            .map_err(|e| LaunchError::io("printing container logs", e))?;
        Ok(self.logs.len() as u64)
    }
}

fn run(engine: &RecordingEngine, out: &mut Vec<u8>) -> Result<(), LaunchError> {
    let home = tempfile::tempdir().expect("tmp home");
    let cwd = tempfile::tempdir().expect("tmp cwd");
    let ctx = support::mount_ctx(home.path(), cwd.path(), HostOs::Linux);
    let inv = Invocation::from_parts(
        PathBuf::from("/opt/bin/ansible"),
        ["ansible", "all", "-m", "ping"]
            .iter()
            .map(OsString::from)
            .collect(),
    );
    let config = LaunchConfig {
        container_name: Some("ansible".to_string()),
        ..LaunchConfig::default()
    };
    let host_env = support::vars(&[("ANSIBLE_NOCOLOR", "1"), ("SECRET", "x")]);
    run_container(engine, &inv, &config, &ctx, &host_env, out)
}

#[test]
fn test_present_image_is_not_pulled() {
    let engine = RecordingEngine::new(true);
    let mut out = Vec::new();
    run(&engine, &mut out).expect("launch succeeds");
    assert_eq!(
        engine.calls(),
        vec![
            "inspect devopspass/ansible:latest",
            "create ansible",
            "start c0ffee",
            "logs c0ffee",
        ]
    );
}

#[test]
fn test_absent_image_is_pulled_before_create() {
    let engine = RecordingEngine::new(false);
    let mut out = Vec::new();
    run(&engine, &mut out).expect("launch succeeds");
    assert_eq!(
        engine.calls()[..3],
        [
            "inspect devopspass/ansible:latest".to_string(),
            "pull devopspass/ansible:latest".to_string(),
            "create ansible".to_string(),
        ]
    );
}

#[test]
fn test_log_stream_is_copied_verbatim() {
    let engine = RecordingEngine::new(true);
    let mut out = Vec::new();
    run(&engine, &mut out).expect("launch succeeds");
    assert_eq!(out, engine.logs);
}

#[test]
fn test_created_spec_carries_command_env_and_policy() {
    let engine = RecordingEngine::new(true);
    let mut out = Vec::new();
    run(&engine, &mut out).expect("launch succeeds");
    let spec = engine.created.borrow().clone().expect("container created");
    assert_eq!(spec.cmd, vec!["ansible", "all", "-m", "ping"]);
    assert_eq!(spec.env, vec!["ANSIBLE_NOCOLOR=1"]);
    assert!(spec.tty && spec.auto_remove);
}

#[test]
fn test_each_failing_step_aborts_the_rest() {
    let cases = [
        (EngineOp::Inspect, 1usize),
        (EngineOp::Pull, 2),
        (EngineOp::Create, 3),
        (EngineOp::Start, 4),
        (EngineOp::Logs, 5),
    ];
    for (op, expected_calls) in cases {
        let engine = RecordingEngine::new(false).failing_at(op);
        let mut out = Vec::new();
        let err = run(&engine, &mut out).expect_err("launch must fail");
        assert!(matches!(err, LaunchError::Engine(failed, _) if failed == op));
        assert_eq!(
            engine.calls().len(),
            expected_calls,
            "calls after failing {op:?}: {:?}",
            engine.calls()
        );
        assert!(out.is_empty());
    }
}

#[test]
fn test_unreachable_engine_is_reported_with_hint() {
    let mut engine = RecordingEngine::new(true).failing_at(EngineOp::Create);
    engine.unreachable = true;
    let mut out = Vec::new();
    let err = run(&engine, &mut out).expect_err("launch must fail");
    assert!(err.is_engine_unavailable());
    let lines = dop_avm::display_for_launch_error(&err);
    assert_eq!(lines[0], dop_avm::ENGINE_UNAVAILABLE_HINT);
    assert_eq!(lines[1], "Error creating Docker container: daemon down");
}
