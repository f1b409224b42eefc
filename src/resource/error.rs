use std::time::Duration;

use thiserror::Error;

use crate::types::{
    Locale,
    ResourceId,
};

/// Transport-level failure while fetching a resource body.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to load {0}: not found")]
    NotFound(ResourceId),

    #[error("Failed to load {resource}: {source}")]
    Io {
        resource: ResourceId,
        #[source]
        source: std::io::Error,
    },

    /// Non-success status reported by a transport that has them.
    #[error("Failed to load {resource}: status {status}")]
    Status { resource: ResourceId, status: u16 },

    #[error("Failed to load {resource}: timed out after {after:?}")]
    Timeout { resource: ResourceId, after: Duration },
}

impl FetchError {
    #[must_use]
    pub const fn resource(&self) -> &ResourceId {
        match self {
            Self::NotFound(resource)
            | Self::Io { resource, .. }
            | Self::Status { resource, .. }
            | Self::Timeout { resource, .. } => resource,
        }
    }
}

/// Failure of a whole `load(locale)` call.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{resource} couldn't be parsed as a JSON object: {source}")]
    Parse {
        resource: ResourceId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Couldn't find translations for {locale} in {resource}")]
    LocaleNotFound { locale: Locale, resource: ResourceId },

    #[error("Translations for {locale} in {resource} should be a flat object of strings")]
    MalformedResource { locale: Locale, resource: ResourceId },

    #[error("Redirect cycle for {locale}: {resource} is already being resolved")]
    RedirectCycle { locale: Locale, resource: ResourceId },
}
