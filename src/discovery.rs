//! Resource discovery.
//!
//! Pages declare resources with `<link type="application/l10n+json" href="...">`.
//! Hosts without markup can scan a directory instead.
use std::path::Path;

use globset::Glob;
use ignore::WalkBuilder;
use thiserror::Error;

use crate::document::Document;
use crate::types::ResourceId;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Invalid resource pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// `href`s of the links whose `type` is `link_type`, in document order.
#[must_use]
pub fn discover_links<D: Document>(document: &D, link_type: &str) -> Vec<ResourceId> {
    document
        .links()
        .into_iter()
        .filter(|link| link.link_type == link_type && !link.href.is_empty())
        .map(|link| ResourceId::from(link.href))
        .collect()
}

/// Resource files under `root` matching `pattern`, as paths relative to `root`, sorted.
///
/// Honors `.gitignore` the same way the source walkers do.
pub fn scan_directory(root: &Path, pattern: &str) -> Result<Vec<ResourceId>, DiscoveryError> {
    let matcher = Glob::new(pattern)
        .map_err(|source| DiscoveryError::InvalidPattern { pattern: pattern.to_string(), source })?
        .compile_matcher();

    let mut found = Vec::new();
    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let Ok(relative_path) = entry.path().strip_prefix(root) else {
            continue;
        };
        if !matcher.is_match(relative_path) {
            continue;
        }

        found.push(ResourceId::from(relative_path.to_string_lossy().replace('\\', "/")));
    }

    found.sort();
    tracing::debug!(root = %root.display(), count = found.len(), "Scanned resources");
    Ok(found)
}
