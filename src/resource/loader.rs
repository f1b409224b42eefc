//! Loads per-locale translation tables from the configured resources.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use tokio::sync::RwLock;

use super::cache::ResourceCache;
use super::document::{
    KeyShape,
    LocaleEntry,
    RawResourceDocument,
};
use super::error::{
    FetchError,
    LoadError,
};
use super::fetch::ResourceFetcher;
use crate::config::LocalizerSettings;
use crate::types::{
    Locale,
    ResourceId,
    TablesByLocale,
    TranslationTable,
};

/// Owns the resource list, the resource cache, and every published table.
///
/// One instance per page or session. Tables are published whole: a locale
/// is either absent or fully loaded.
pub struct ResourceLoader<F> {
    /// Resources declared by the host, in declaration order.
    resources: Vec<ResourceId>,
    fetcher: Arc<F>,
    cache: ResourceCache,
    /// Published tables.
    tables: Arc<RwLock<TablesByLocale>>,
    /// Upper bound for each fetch.
    fetch_timeout: Duration,
    /// Whether nested locale entries are flattened.
    nested_keys: bool,
    /// Separator for flattened keys.
    key_separator: String,
}

impl<F: ResourceFetcher> ResourceLoader<F> {
    #[must_use]
    pub fn new(resources: Vec<ResourceId>, fetcher: Arc<F>, settings: &LocalizerSettings) -> Self {
        Self {
            resources,
            fetcher,
            cache: ResourceCache::new(),
            tables: Arc::new(RwLock::new(TablesByLocale::new())),
            fetch_timeout: settings.fetch_timeout(),
            nested_keys: settings.nested_keys,
            key_separator: settings.key_separator.clone(),
        }
    }

    #[must_use]
    pub fn resources(&self) -> &[ResourceId] {
        &self.resources
    }

    #[must_use]
    pub const fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    /// Makes the table for `locale` available.
    ///
    /// Memoized per locale. Otherwise every resource is resolved concurrently
    /// and the call completes only when all of them have; the first failure
    /// fails the call and nothing is published.
    ///
    /// When several resources carry the same locale, later resources win on
    /// duplicate keys.
    pub async fn load(&self, locale: &Locale) -> Result<(), LoadError> {
        if self.tables.read().await.contains_key(locale) {
            tracing::debug!(%locale, "Translations already loaded");
            return Ok(());
        }

        tracing::debug!(%locale, resources = self.resources.len(), "Loading translations");
        let parts =
            try_join_all(self.resources.iter().map(|resource| self.resolve(resource, locale)))
                .await?;

        let mut table = TranslationTable::new();
        for part in parts {
            table.extend(part);
        }

        tracing::debug!(%locale, keys = table.len(), "Publishing translations");
        self.tables.write().await.insert(locale.clone(), Arc::new(table));

        Ok(())
    }

    /// The published table for `locale`, if loaded.
    pub async fn table(&self, locale: &Locale) -> Option<Arc<TranslationTable>> {
        self.tables.read().await.get(locale).cloned()
    }

    /// Published tables for the given locales. Unloaded locales are left out.
    pub async fn tables(&self, locales: &[Locale]) -> TablesByLocale {
        let tables = self.tables.read().await;
        locales
            .iter()
            .filter_map(|locale| {
                tables.get(locale).map(|table| (locale.clone(), Arc::clone(table)))
            })
            .collect()
    }

    /// Follows `resource` and its redirects until it yields a table for `locale`.
    async fn resolve(
        &self,
        resource: &ResourceId,
        locale: &Locale,
    ) -> Result<TranslationTable, LoadError> {
        let mut visited = HashSet::new();
        let mut current = resource.clone();

        loop {
            if !visited.insert(current.clone()) {
                return Err(LoadError::RedirectCycle { locale: locale.clone(), resource: current });
            }

            let document = self.document(&current).await?;
            match document.entry(locale, self.key_shape()) {
                LocaleEntry::Table(table) => return Ok(table),
                LocaleEntry::Redirect(target) => {
                    tracing::debug!(%locale, from = %current, to = %target, "Following redirect");
                    current = target;
                }
                LocaleEntry::Missing => {
                    tracing::debug!(
                        %locale,
                        resource = %current,
                        available = ?document.locales().collect::<Vec<_>>(),
                        "Locale not in resource"
                    );
                    return Err(LoadError::LocaleNotFound {
                        locale: locale.clone(),
                        resource: current,
                    });
                }
                LocaleEntry::Malformed => {
                    return Err(LoadError::MalformedResource {
                        locale: locale.clone(),
                        resource: current,
                    });
                }
            }
        }
    }

    /// Returns the parsed document, from the cache or from the fetcher.
    async fn document(&self, resource: &ResourceId) -> Result<Arc<RawResourceDocument>, LoadError> {
        if let Some(document) = self.cache.get(resource).await {
            tracing::debug!(%resource, "Resource cache hit");
            return Ok(document);
        }

        tracing::debug!(%resource, "Fetching resource");
        let body = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(resource))
            .await
            .unwrap_or_else(|_| {
                Err(FetchError::Timeout { resource: resource.clone(), after: self.fetch_timeout })
            })
            .inspect_err(|err| tracing::debug!(resource = %err.resource(), %err, "Fetch failed"))?;

        let document = Arc::new(RawResourceDocument::parse(resource, &body)?);
        self.cache.put(resource.clone(), Arc::clone(&document)).await;

        Ok(document)
    }

    /// Key handling derived from the settings.
    fn key_shape(&self) -> KeyShape<'_> {
        if self.nested_keys { KeyShape::Nested(&self.key_separator) } else { KeyShape::Flat }
    }
}

impl<F> std::fmt::Debug for ResourceLoader<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceLoader")
            .field("resources", &self.resources)
            .field("fetcher", &"<ResourceFetcher>")
            .field("fetch_timeout", &self.fetch_timeout)
            .field("nested_keys", &self.nested_keys)
            .finish_non_exhaustive()
    }
}
