//! Resource transports.
//!
//! The loader only needs "give me the body named by this identifier";
//! how that happens is up to the [`ResourceFetcher`] implementation.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::time::Duration;

use super::error::FetchError;
use crate::types::ResourceId;

/// Fetches raw resource bodies.
pub trait ResourceFetcher: Send + Sync {
    /// Returns the body of `resource`.
    fn fetch(&self, resource: &ResourceId)
    -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Reads resources from the local file system.
///
/// Relative identifiers are resolved against `base_dir` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FsFetcher {
    /// Directory relative identifiers are resolved against.
    base_dir: Option<PathBuf>,
}

impl FsFetcher {
    #[must_use]
    pub const fn new() -> Self {
        Self { base_dir: None }
    }

    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: Some(base_dir.into()) }
    }

    /// Maps an identifier to a path. A `file://` scheme is accepted and stripped.
    fn resolve(&self, resource: &ResourceId) -> PathBuf {
        let raw = resource.as_str();
        let path = PathBuf::from(raw.strip_prefix("file://").unwrap_or(raw));
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

impl ResourceFetcher for FsFetcher {
    async fn fetch(&self, resource: &ResourceId) -> Result<String, FetchError> {
        let path = self.resolve(resource);
        tracing::debug!(path = %path.display(), "Reading resource");

        tokio::fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(resource.clone())
            } else {
                FetchError::Io { resource: resource.clone(), source }
            }
        })
    }
}

/// What a [`MemoryFetcher`] answers for one identifier.
#[derive(Debug)]
enum MemoryEntry {
    /// Body returned as-is.
    Body(String),
    /// Simulated transport status failure.
    Status(u16),
}

/// One registered identifier.
#[derive(Debug)]
struct MemorySlot {
    /// Response.
    entry: MemoryEntry,
    /// Artificial latency before answering.
    delay: Option<Duration>,
    /// Number of fetches served.
    hits: AtomicUsize,
}

/// Serves resources from memory.
///
/// Used by hosts that embed their resources in the binary. It counts
/// fetches per identifier, which makes cache behavior observable.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    /// Registered identifiers.
    slots: HashMap<ResourceId, MemorySlot>,
}

impl MemoryFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<ResourceId>, body: impl Into<String>) -> Self {
        self.insert(resource.into(), MemoryEntry::Body(body.into()), None);
        self
    }

    /// Registers an identifier that fails with the given status.
    #[must_use]
    pub fn with_status(mut self, resource: impl Into<ResourceId>, status: u16) -> Self {
        self.insert(resource.into(), MemoryEntry::Status(status), None);
        self
    }

    /// Registers a body that is only returned after `delay`.
    #[must_use]
    pub fn with_delayed_resource(
        mut self,
        resource: impl Into<ResourceId>,
        body: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.insert(resource.into(), MemoryEntry::Body(body.into()), Some(delay));
        self
    }

    /// How many times `resource` has been fetched.
    #[must_use]
    pub fn fetch_count(&self, resource: &str) -> usize {
        self.slots
            .get(&ResourceId::from(resource))
            .map_or(0, |slot| slot.hits.load(Ordering::SeqCst))
    }

    /// Adds or replaces a slot.
    fn insert(&mut self, resource: ResourceId, entry: MemoryEntry, delay: Option<Duration>) {
        self.slots.insert(resource, MemorySlot { entry, delay, hits: AtomicUsize::new(0) });
    }
}

impl ResourceFetcher for MemoryFetcher {
    async fn fetch(&self, resource: &ResourceId) -> Result<String, FetchError> {
        let Some(slot) = self.slots.get(resource) else {
            return Err(FetchError::NotFound(resource.clone()));
        };
        slot.hits.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = slot.delay {
            tokio::time::sleep(delay).await;
        }

        match &slot.entry {
            MemoryEntry::Body(body) => Ok(body.clone()),
            MemoryEntry::Status(status) => {
                Err(FetchError::Status { resource: resource.clone(), status: *status })
            }
        }
    }
}
