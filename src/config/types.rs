use std::path::PathBuf;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "fetchTimeoutMs")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to read {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizerSettings {
    /// Marker attribute carrying the translation key.
    pub key_attribute: String,
    /// Attribute carrying the JSON argument bag.
    pub args_attribute: String,
    /// `type` of the `<link>` elements that declare resources.
    pub link_type: String,

    /// Upper bound for a single resource fetch, in milliseconds.
    pub fetch_timeout_ms: u64,

    /// Accept nested objects inside a locale entry and flatten them.
    ///
    /// Off by default: a locale entry must be a flat string-to-string mapping.
    pub nested_keys: bool,
    /// Joins nested keys when `nested_keys` is on.
    pub key_separator: String,

    /// Glob used when resources are discovered from a directory instead of links.
    pub resource_pattern: String,
}

impl LocalizerSettings {
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// # Errors
    /// - Required field is empty
    /// - Zero timeout
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("keyAttribute", &self.key_attribute),
            ("argsAttribute", &self.args_attribute),
            ("linkType", &self.link_type),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(
                    field,
                    "The value cannot be empty. Please remove this field to use the default",
                ));
            }
        }

        if self.fetch_timeout_ms == 0 {
            errors.push(ValidationError::new(
                "fetchTimeoutMs",
                "The timeout must be greater than zero. Example: 5000",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.resource_pattern.is_empty() {
            errors.push(ValidationError::new(
                "resourcePattern",
                "The pattern cannot be empty. Example: \"**/*.l10n.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.resource_pattern) {
            errors.push(ValidationError::new(
                "resourcePattern",
                format!("Invalid glob pattern '{}': {e}", self.resource_pattern),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for LocalizerSettings {
    fn default() -> Self {
        Self {
            key_attribute: "data-l10n-id".to_string(),
            args_attribute: "data-l10n-args".to_string(),
            link_type: "application/l10n+json".to_string(),
            fetch_timeout_ms: 5_000,
            nested_keys: false,
            key_separator: ".".to_string(),
            resource_pattern: "**/*.l10n.json".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = LocalizerSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"fetchTimeoutMs": 250, "nestedKeys": true}"#;

        let settings: LocalizerSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.fetch_timeout(), eq(Duration::from_millis(250)));
        assert_that!(settings.nested_keys, eq(true));
        assert_that!(settings.key_attribute, eq("data-l10n-id"));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: LocalizerSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings, eq(&LocalizerSettings::default()));
    }

    #[rstest]
    fn validate_zero_timeout() {
        let settings = LocalizerSettings { fetch_timeout_ms: 0, ..LocalizerSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("fetchTimeoutMs")),
                field!(ValidationError.message, contains_substring("greater than zero"))
            ]])
        );
    }

    #[rstest]
    #[case::key_attribute(LocalizerSettings { key_attribute: String::new(), ..LocalizerSettings::default() }, "keyAttribute")]
    #[case::args_attribute(LocalizerSettings { args_attribute: " ".to_string(), ..LocalizerSettings::default() }, "argsAttribute")]
    #[case::link_type(LocalizerSettings { link_type: String::new(), ..LocalizerSettings::default() }, "linkType")]
    #[case::key_separator(LocalizerSettings { key_separator: String::new(), ..LocalizerSettings::default() }, "keySeparator")]
    #[case::resource_pattern(LocalizerSettings { resource_pattern: String::new(), ..LocalizerSettings::default() }, "resourcePattern")]
    fn validate_empty_fields(#[case] settings: LocalizerSettings, #[case] field_path: &str) {
        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq(field_path)),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_resource_pattern() {
        let settings = LocalizerSettings {
            resource_pattern: "**/*.{json".to_string(),
            ..LocalizerSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("resourcePattern")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern")),
                field!(ValidationError.message, contains_substring("**/*.{json"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = LocalizerSettings {
            key_attribute: String::new(),
            fetch_timeout_ms: 0,
            ..LocalizerSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let error_message = format!("{}", ConfigError::ValidationErrors(errors));

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. keyAttribute"));
        assert_that!(error_message, contains_substring("2. fetchTimeoutMs"));
    }
}
