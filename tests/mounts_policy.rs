use std::fs;

use dop_avm::docker::mounts::{plan_host_mounts, CONTAINER_CREDENTIALS_PATH};
use dop_avm::HostOs;

mod support;

fn bind_for(binds: &[String], container: &str) -> Option<String> {
    binds
        .iter()
        .find(|b| b.ends_with(&format!(":{container}")))
        .cloned()
}

#[test]
fn test_workdir_and_socket_are_always_mounted() {
    let home = tempfile::tempdir().expect("tmp home");
    let cwd = tempfile::tempdir().expect("tmp cwd");
    let ctx = support::mount_ctx(home.path(), cwd.path(), HostOs::Linux);

    let m = plan_host_mounts(&ctx);
    assert_eq!(m.binds[0], format!("{}:/ansible", cwd.path().display()));
    assert_eq!(m.binds[1], "/var/run/docker.sock:/var/run/docker.sock");
}

#[test]
fn test_ansible_dir_is_created_and_mounted() {
    let home = tempfile::tempdir().expect("tmp home");
    let cwd = tempfile::tempdir().expect("tmp cwd");
    let ctx = support::mount_ctx(home.path(), cwd.path(), HostOs::Linux);

    let ansible_dir = home.path().join(".ansible");
    assert!(!ansible_dir.exists());
    let m = plan_host_mounts(&ctx);
    assert!(ansible_dir.is_dir(), ".ansible should have been created");
    assert_eq!(
        bind_for(&m.binds, "/root/.ansible"),
        Some(format!("{}:/root/.ansible", ansible_dir.display()))
    );
    assert!(
        !m.binds.iter().any(|b| b.ends_with(":/.ansible")),
        "binds: {:?}",
        m.binds
    );

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&ansible_dir).unwrap().permissions().mode() & 0o777;
        // mkdir honors the umask, so only bits outside 0755 are forbidden
        assert_eq!(mode & !0o755, 0, "unexpected mode {mode:o}");
    }
}

#[test]
fn test_optional_home_dirs_mounted_only_when_present() {
    let home = tempfile::tempdir().expect("tmp home");
    let cwd = tempfile::tempdir().expect("tmp cwd");
    fs::create_dir(home.path().join(".ssh")).unwrap();
    fs::create_dir(home.path().join(".azure")).unwrap();
    let ctx = support::mount_ctx(home.path(), cwd.path(), HostOs::Linux);

    let m = plan_host_mounts(&ctx);
    assert!(bind_for(&m.binds, "/root/.ssh").is_some());
    assert!(bind_for(&m.binds, "/root/.azure").is_some());
    assert!(bind_for(&m.binds, "/root/.aws").is_none(), "binds: {:?}", m.binds);

    let order: Vec<&str> = m
        .binds
        .iter()
        .filter_map(|b| b.rsplit(':').next())
        .filter(|c| c.starts_with("/root/."))
        .collect();
    assert_eq!(order, vec!["/root/.ssh", "/root/.azure", "/root/.ansible"]);
}

#[test]
fn test_linux_agent_socket_only_when_set() {
    let home = tempfile::tempdir().expect("tmp home");
    let cwd = tempfile::tempdir().expect("tmp cwd");
    let mut ctx = support::mount_ctx(home.path(), cwd.path(), HostOs::Linux);

    let m = plan_host_mounts(&ctx);
    assert!(m.env.is_empty());
    assert!(bind_for(&m.binds, "/tmp/ssh-auth.sock").is_none());

    ctx.ssh_auth_sock = Some("/run/user/1000/agent.sock".to_string());
    let m = plan_host_mounts(&ctx);
    assert_eq!(
        bind_for(&m.binds, "/tmp/ssh-auth.sock"),
        Some("/run/user/1000/agent.sock:/tmp/ssh-auth.sock".to_string())
    );
    assert_eq!(m.env, vec!["SSH_AUTH_SOCK=/tmp/ssh-auth.sock"]);
}

#[test]
fn test_desktop_platforms_use_host_services_socket() {
    let home = tempfile::tempdir().expect("tmp home");
    let cwd = tempfile::tempdir().expect("tmp cwd");
    for os in [HostOs::MacOs, HostOs::Windows] {
        let ctx = support::mount_ctx(home.path(), cwd.path(), os);
        let m = plan_host_mounts(&ctx);
        let agent = "/run/host-services/ssh-auth.sock:/run/host-services/ssh-auth.sock";
        assert!(m.binds.iter().any(|b| b == agent), "binds: {:?}", m.binds);
        assert_eq!(m.env, vec!["SSH_AUTH_SOCK=/run/host-services/ssh-auth.sock"]);
    }
}

#[test]
fn test_default_credentials_mounted_only_when_file_exists() {
    let home = tempfile::tempdir().expect("tmp home");
    let cwd = tempfile::tempdir().expect("tmp cwd");
    let ctx = support::mount_ctx(home.path(), cwd.path(), HostOs::Linux);

    assert!(bind_for(&plan_host_mounts(&ctx).binds, CONTAINER_CREDENTIALS_PATH).is_none());

    let gcloud = home.path().join(".config").join("gcloud");
    fs::create_dir_all(&gcloud).unwrap();
    let creds = gcloud.join("application_default_credentials.json");
    fs::write(&creds, "{}").unwrap();

    assert_eq!(
        bind_for(&plan_host_mounts(&ctx).binds, CONTAINER_CREDENTIALS_PATH),
        Some(format!("{}:{}", creds.display(), CONTAINER_CREDENTIALS_PATH))
    );
}

#[test]
fn test_credentials_override_replaces_default() {
    let home = tempfile::tempdir().expect("tmp home");
    let cwd = tempfile::tempdir().expect("tmp cwd");
    let creds = cwd.path().join("sa.json");
    fs::write(&creds, "{}").unwrap();

    let mut ctx = support::mount_ctx(home.path(), cwd.path(), HostOs::Linux);
    ctx.credentials_override = Some(creds.display().to_string());
    assert_eq!(dop_avm::credentials_path(&ctx).as_deref(), Some(creds.as_path()));

    ctx.credentials_override = Some("/nonexistent/sa.json".to_string());
    assert!(bind_for(&plan_host_mounts(&ctx).binds, CONTAINER_CREDENTIALS_PATH).is_none());
}
