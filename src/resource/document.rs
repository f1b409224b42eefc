//! Parsed resource files.
//!
//! A resource is a JSON object keyed by locale. Each value is either a
//! redirect (a string naming another resource) or the locale's translations.

use serde_json::{
    Map,
    Value,
};

use super::error::LoadError;
use crate::types::{
    Locale,
    ResourceId,
    TranslationTable,
};

/// A resource body that parsed as a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResourceDocument {
    /// Top-level entries keyed by locale.
    locales: Map<String, Value>,
}

/// Classification of one locale's entry in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleEntry {
    /// No usable entry. Absent, `null`, `false` and `""` all count.
    Missing,
    /// The locale's data lives in another resource.
    Redirect(ResourceId),
    Table(TranslationTable),
    /// Present but not a mapping of strings.
    Malformed,
}

/// How nested objects inside a locale entry are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyShape<'a> {
    /// Only flat string-to-string objects are accepted.
    #[default]
    Flat,
    /// Nested objects are flattened with the separator.
    Nested(&'a str),
}

impl RawResourceDocument {
    /// Parses a resource body.
    ///
    /// # Errors
    /// `LoadError::Parse` when the body is not JSON or not a JSON object.
    pub fn parse(resource: &ResourceId, body: &str) -> Result<Self, LoadError> {
        let parse_error = |source| LoadError::Parse { resource: resource.clone(), source };

        match serde_json::from_str::<Value>(body).map_err(parse_error)? {
            Value::Object(locales) => Ok(Self { locales }),
            other => Err(parse_error(serde::de::Error::custom(format!(
                "expected an object keyed by locale, found {}",
                json_kind(&other)
            )))),
        }
    }

    /// Locales this document mentions.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    #[must_use]
    pub fn entry(&self, locale: &Locale, shape: KeyShape<'_>) -> LocaleEntry {
        match self.locales.get(locale.as_str()) {
            None | Some(Value::Null | Value::Bool(false)) => LocaleEntry::Missing,
            Some(Value::String(target)) if target.is_empty() => LocaleEntry::Missing,
            Some(Value::String(target)) => LocaleEntry::Redirect(ResourceId::from(target.as_str())),
            Some(Value::Object(map)) => {
                let mut table = TranslationTable::new();
                if collect_strings(map, shape, None, &mut table) {
                    LocaleEntry::Table(table)
                } else {
                    LocaleEntry::Malformed
                }
            }
            Some(_) => LocaleEntry::Malformed,
        }
    }
}

/// Copies string leaves of `map` into `table`; false on the first value that is not allowed.
fn collect_strings(
    map: &Map<String, Value>,
    shape: KeyShape<'_>,
    prefix: Option<&str>,
    table: &mut TranslationTable,
) -> bool {
    for (key, value) in map {
        let full_key = match (prefix, shape) {
            (Some(p), KeyShape::Nested(separator)) => format!("{p}{separator}{key}"),
            _ => key.clone(),
        };
        match (value, shape) {
            (Value::String(s), _) => {
                table.insert(full_key, s.clone());
            }
            (Value::Object(nested), KeyShape::Nested(_)) => {
                if !collect_strings(nested, shape, Some(&full_key), table) {
                    return false;
                }
            }
            _ => return false,
        }
    }
    true
}

/// Human name of a JSON value's type, for error messages.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
