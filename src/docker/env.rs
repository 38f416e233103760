#![allow(clippy::module_name_repetitions)]
//! Environment forwarding policy: only allow-listed name prefixes reach the container.

use std::env;

/// Variables whose names start with one of these are forwarded as `KEY=VALUE`.
pub const ENV_PREFIXES: &[&str] = &["ANSIBLE_", "MOLECULE_", "GALAXY_", "AWS_"];

pub fn is_forwarded(name: &str) -> bool {
    ENV_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Keep allow-listed variables, in input order.
pub fn filter_env<I>(vars: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .filter(|(k, _)| is_forwarded(k))
        .map(|(k, v)| format!("{k}={v}"))
        .collect()
}

/// Snapshot of the process environment; variables with non-UTF-8 names or values are skipped.
pub fn host_env_vars() -> Vec<(String, String)> {
    env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
