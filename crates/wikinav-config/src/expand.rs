//! Environment variable and home directory expansion for config values.

use crate::ConfigError;

/// Expand `${VAR}`, `${VAR:-default}`, `$VAR` and a leading `~` in `value`.
///
/// `field` names the config field for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("wiki", "docs.source_dir").unwrap(), "wiki");
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WIKINAV_EXPAND_UNSET");
        }

        let value = expand_env("${WIKINAV_EXPAND_UNSET:-wiki}", "docs.source_dir").unwrap();

        assert_eq!(value, "wiki");
    }

    #[test]
    fn test_set_var_expanded() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WIKINAV_EXPAND_SET", "content");
        }

        let value = expand_env("${WIKINAV_EXPAND_SET}/wiki", "docs.source_dir").unwrap();

        assert_eq!(value, "content/wiki");

        unsafe {
            std::env::remove_var("WIKINAV_EXPAND_SET");
        }
    }

    #[test]
    fn test_missing_var_errors_with_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WIKINAV_EXPAND_MISSING");
        }

        let err = expand_env("${WIKINAV_EXPAND_MISSING}", "output.path").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("WIKINAV_EXPAND_MISSING"));
        assert!(msg.contains("output.path"));
    }
}
