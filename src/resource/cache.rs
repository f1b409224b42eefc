//! Parsed-resource cache shared by every locale.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::document::RawResourceDocument;
use crate::types::ResourceId;

/// Maps resource identifiers to already-parsed documents.
///
/// Populate-once: entries are never evicted or invalidated. Two writers racing
/// on the same identifier store equal documents, so the last one wins.
#[derive(Clone, Debug, Default)]
pub struct ResourceCache {
    /// Parsed documents.
    documents: Arc<RwLock<HashMap<ResourceId, Arc<RawResourceDocument>>>>,
}

impl ResourceCache {
    #[must_use]
    pub fn new() -> Self {
        Self { documents: Arc::new(RwLock::new(HashMap::new())) }
    }

    pub async fn get(&self, resource: &ResourceId) -> Option<Arc<RawResourceDocument>> {
        self.documents.read().await.get(resource).cloned()
    }

    pub async fn put(&self, resource: ResourceId, document: Arc<RawResourceDocument>) {
        self.documents.write().await.insert(resource, document);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn document(body: &str) -> Arc<RawResourceDocument> {
        Arc::new(RawResourceDocument::parse(&ResourceId::from("test.json"), body).unwrap())
    }

    #[tokio::test]
    async fn get_returns_what_was_put() {
        let cache = ResourceCache::new();
        let id = ResourceId::from("a.json");

        assert!(cache.get(&id).await.is_none());
        cache.put(id.clone(), document(r#"{"en": {}}"#)).await;

        assert_eq!(cache.get(&id).await, Some(document(r#"{"en": {}}"#)));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = ResourceCache::new();
        let clone = cache.clone();

        clone.put(ResourceId::from("a.json"), document("{}")).await;

        assert!(!cache.is_empty().await);
    }
}
