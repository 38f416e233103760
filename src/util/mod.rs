#![allow(clippy::module_name_repetitions)]
//! Small utilities: shell escaping for previews, truthy env parsing, short ids.

pub mod id;

pub use id::create_session_id;

use std::env;

/// True when `key` is set to one of the accepted truthy spellings.
pub fn env_is_truthy(key: &str) -> bool {
    env::var(key).ok().is_some_and(|v| is_truthy(&v))
}

pub fn is_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Return the value of `key` when set and non-blank.
pub fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_escape(a))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_escape_simple() {
        assert_eq!(shell_escape("abc-123_./:@"), "abc-123_./:@");
    }

    #[test]
    fn test_shell_escape_with_spaces_and_quotes() {
        assert_eq!(shell_escape("a b c"), "'a b c'");
        assert_eq!(shell_escape("O'Reilly"), "'O'\"'\"'Reilly'");
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn test_shell_join() {
        let args = vec![
            "ansible-playbook".to_string(),
            "-e".to_string(),
            "x=a b".to_string(),
        ];
        assert_eq!(shell_join(&args), "ansible-playbook -e 'x=a b'");
    }

    #[test]
    fn test_is_truthy_spellings() {
        for v in ["1", "true", "YES", "on", " On ", "tRuE", "yEs"] {
            assert!(is_truthy(v), "{v} should be truthy");
        }
        for v in ["0", "false", "", "nope"] {
            assert!(!is_truthy(v), "{v} should not be truthy");
        }
    }
}
