//! Environment-driven settings for one launcher run.
//!
//! Alias mode forwards every CLI argument to the containerized tool, so the launcher
//! itself is configured only through environment variables.

use std::env;

pub const DEFAULT_IMAGE: &str = "devopspass/ansible:latest";

pub const IMAGE_ENV: &str = "DOP_AVM_IMAGE_NAME";
pub const CONTAINER_NAME_ENV: &str = "DOP_AVM_CONTAINER_NAME";
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const VERBOSE_ENV: &str = "DOP_AVM_VERBOSE";
pub const DRY_RUN_ENV: &str = "DOP_AVM_DRY_RUN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub image: String,
    pub container_name: Option<String>,
    pub credentials_override: Option<String>,
    pub verbose: bool,
    pub dry_run: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            container_name: None,
            credentials_override: None,
            verbose: false,
            dry_run: false,
        }
    }
}

impl LaunchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Deterministic constructor for tests: `get` stands in for `env::var`.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| get(k).filter(|v| !v.trim().is_empty());
        Self {
            image: resolve_image(non_empty(IMAGE_ENV)),
            container_name: non_empty(CONTAINER_NAME_ENV).map(|v| v.trim().to_string()),
            credentials_override: non_empty(CREDENTIALS_ENV),
            verbose: get(VERBOSE_ENV).is_some_and(|v| crate::util::is_truthy(&v)),
            dry_run: get(DRY_RUN_ENV).is_some_and(|v| crate::util::is_truthy(&v)),
        }
    }

    /// Explicit name when configured, otherwise `dop-avm-<alias>-<id>`.
    pub fn container_name_for(&self, alias: &str) -> String {
        match &self.container_name {
            Some(n) => n.clone(),
            None => format!("dop-avm-{}-{}", alias, crate::create_session_id()),
        }
    }
}

/// Image reference: the override when given, otherwise the default Ansible image.
pub fn resolve_image(override_value: Option<String>) -> String {
    override_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string())
}
