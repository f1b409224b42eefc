//! Core types used throughout the project.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// Names a loadable resource (a path or URL). Identity key for the resource cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A locale identifier such as `en` or `fr-CA`. Opaque: never parsed or normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(locale: &str) -> Self {
        Self(locale.to_string())
    }
}

impl From<String> for Locale {
    fn from(locale: String) -> Self {
        Self(locale)
    }
}

/// Locales ordered most-preferred first.
///
/// Built from a single locale or from a list, so `localize("en")` and
/// `localize(["fr-CA", "fr", "en"])` both work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleList(Vec<Locale>);

impl LocaleList {
    #[must_use]
    pub fn as_slice(&self) -> &[Locale] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Locale> for LocaleList {
    fn from(locale: Locale) -> Self {
        Self(vec![locale])
    }
}

impl From<&str> for LocaleList {
    fn from(locale: &str) -> Self {
        Self(vec![Locale::from(locale)])
    }
}

impl From<Vec<Locale>> for LocaleList {
    fn from(locales: Vec<Locale>) -> Self {
        Self(locales)
    }
}

impl From<&[&str]> for LocaleList {
    fn from(locales: &[&str]) -> Self {
        Self(locales.iter().copied().map(Locale::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for LocaleList {
    fn from(locales: [&str; N]) -> Self {
        Self(locales.into_iter().map(Locale::from).collect())
    }
}

/// Translation key to translation string, for exactly one locale.
pub type TranslationTable = HashMap<String, String>;

/// Published tables, keyed by locale.
pub type TablesByLocale = HashMap<Locale, Arc<TranslationTable>>;

/// The flattened, priority-resolved mapping used for one localization pass.
///
/// Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveTable {
    /// Resolved entries.
    entries: HashMap<String, String>,
}

impl EffectiveTable {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, String>> for EffectiveTable {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EffectiveTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Argument bag supplied by an element for placeholder substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(HashMap<String, String>);

impl Arguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the structured argument attribute.
    ///
    /// Strings are kept verbatim, other scalars use their JSON text, `null`
    /// yields an empty bag. Anything other than an object or `null` is an error.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self(
                map.into_iter()
                    .map(|(key, value)| {
                        let text = match value {
                            Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (key, text)
                    })
                    .collect(),
            )),
            other => Err(serde::de::Error::custom(format!(
                "expected an object of arguments, found {other}"
            ))),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
