//! Entry points for the host: discover resources, then localize.

use std::sync::{
    Arc,
    OnceLock,
};

use thiserror::Error;
use tokio::sync::watch;

use crate::binding::{
    ApplyReport,
    BindingApplier,
};
use crate::config::LocalizerSettings;
use crate::discovery::discover_links;
use crate::document::Document;
use crate::merge::merge;
use crate::resource::{
    LoadError,
    ResourceFetcher,
    ResourceLoader,
};
use crate::types::{
    EffectiveTable,
    LocaleList,
    ResourceId,
};

#[derive(Error, Debug)]
pub enum LocalizeError {
    /// `localize` was called before resources were discovered.
    #[error("Resources have not been indexed yet")]
    NotIndexed,

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Localizes documents for one page or session.
///
/// Create it up front, call [`index`](Self::index) once the document is
/// available, then call [`localize`](Self::localize) as often as needed.
/// Callers that start before indexing can await [`ready`](Self::ready).
pub struct Localizer<F> {
    settings: LocalizerSettings,
    /// Shared with the loader once indexing creates it.
    fetcher: Arc<F>,
    /// Set once by indexing.
    loader: OnceLock<ResourceLoader<F>>,
    /// Flips to `true` exactly once, when indexing completes.
    ready: watch::Sender<bool>,
    /// Attribute names taken from `settings`.
    applier: BindingApplier,
}

impl<F: ResourceFetcher> Localizer<F> {
    #[must_use]
    pub fn new(fetcher: F, settings: LocalizerSettings) -> Self {
        let applier = BindingApplier::new(&settings);
        Self {
            settings,
            fetcher: Arc::new(fetcher),
            loader: OnceLock::new(),
            ready: watch::channel(false).0,
            applier,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &LocalizerSettings {
        &self.settings
    }

    /// Discovers the resources declared in `document` and signals readiness.
    ///
    /// Returns the number of resources found. Only the first call has an effect.
    pub fn index<D: Document>(&self, document: &D) -> usize {
        let resources = discover_links(document, &self.settings.link_type);
        self.index_resources(resources)
    }

    /// Like [`index`](Self::index), for hosts that know their resources up front.
    pub fn index_resources(&self, resources: Vec<ResourceId>) -> usize {
        let count = resources.len();
        let loader = ResourceLoader::new(resources, Arc::clone(&self.fetcher), &self.settings);

        if self.loader.set(loader).is_err() {
            tracing::warn!("Resources were already indexed; ignoring");
            return self.loader().map_or(0, |loader| loader.resources().len());
        }

        tracing::debug!(count, "Indexed resources");
        self.ready.send_replace(true);
        count
    }

    /// Completes once indexing has happened.
    pub async fn ready(&self) {
        let mut ready = self.ready.subscribe();
        if ready.wait_for(|indexed| *indexed).await.is_err() {
            tracing::debug!("Ready signal dropped");
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// The loader, once indexed.
    #[must_use]
    pub fn loader(&self) -> Option<&ResourceLoader<F>> {
        self.loader.get()
    }

    /// Loads every locale (in order) and merges them into one table.
    pub async fn build(
        &self,
        locales: impl Into<LocaleList>,
    ) -> Result<EffectiveTable, LocalizeError> {
        let locales = locales.into();
        let loader = self.loader().ok_or(LocalizeError::NotIndexed)?;

        for locale in locales.as_slice() {
            loader.load(locale).await?;
        }

        let tables = loader.tables(locales.as_slice()).await;
        Ok(merge(locales.as_slice(), &tables))
    }

    /// Resolves `locales` and rewrites every marked element of `document`.
    pub async fn localize<D: Document>(
        &self,
        locales: impl Into<LocaleList>,
        document: &mut D,
    ) -> Result<ApplyReport, LocalizeError> {
        let table = self.build(locales).await?;
        let root = document.root();
        Ok(self.applier.apply(&table, document, root))
    }

    /// Applies an already built table to `root`, or to the whole document.
    pub fn translate_element<D: Document>(
        &self,
        table: &EffectiveTable,
        document: &mut D,
        root: Option<D::Node>,
    ) -> ApplyReport {
        self.applier.translate_element(table, document, root)
    }
}

impl<F> std::fmt::Debug for Localizer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("settings", &self.settings)
            .field("loader", &self.loader.get())
            .field("ready", &*self.ready.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use googletest::prelude::*;

    use super::*;
    use crate::document::MemoryDocument;
    use crate::resource::MemoryFetcher;
    use crate::types::Locale;

    fn localizer() -> Localizer<MemoryFetcher> {
        let fetcher = MemoryFetcher::new()
            .with_resource("app.json", r#"{"en": {"hello": "Hello"}, "fr": {"hello": "Bonjour"}}"#);
        Localizer::new(fetcher, LocalizerSettings::default())
    }

    #[tokio::test]
    async fn build_before_index_fails() {
        let localizer = localizer();

        let result = localizer.build("en").await;

        assert!(matches!(result, Err(LocalizeError::NotIndexed)));
    }

    #[tokio::test]
    async fn ready_fires_once_indexing_completes() {
        let localizer = Arc::new(localizer());
        assert!(!localizer.is_ready());

        let waiter = {
            let localizer = Arc::clone(&localizer);
            tokio::spawn(async move { localizer.ready().await })
        };
        localizer.index_resources(vec![ResourceId::from("app.json")]);

        tokio::time::timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
        assert!(localizer.is_ready());
    }

    #[tokio::test]
    async fn second_index_is_ignored() {
        let localizer = localizer();

        assert_eq!(localizer.index_resources(vec![ResourceId::from("app.json")]), 1);
        assert_eq!(localizer.index_resources(vec![]), 1);
        assert_eq!(localizer.loader().unwrap().resources(), &[ResourceId::from("app.json")]);
    }

    #[googletest::test]
    #[tokio::test]
    async fn build_merges_in_priority_order() {
        let localizer = localizer();
        localizer.index_resources(vec![ResourceId::from("app.json")]);

        let table = localizer.build(["fr", "en"]).await.unwrap();

        expect_that!(table.get("hello"), some(eq("Bonjour")));
        let loader = localizer.loader().unwrap();
        expect_that!(loader.table(&Locale::from("en")).await.is_some(), eq(true));
    }

    #[tokio::test]
    async fn index_reads_links_from_the_document() {
        let localizer = localizer();
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        doc.element_with(root, "link", &[("type", "application/l10n+json"), ("href", "app.json")]);
        let p = doc.element_with(root, "p", &[("data-l10n-id", "hello")]);

        assert_eq!(localizer.index(&doc), 1);
        let report = localizer.localize("fr", &mut doc).await.unwrap();

        assert_eq!(doc.text_content(p), "Bonjour");
        assert_eq!(report.translated, 1);
    }
}
