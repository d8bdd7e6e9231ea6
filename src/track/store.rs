//! Per-(version, category) symbol set resolution
//!
//! The store mediates between the page fetcher, the symbol extractor, and
//! the filesystem cache. A key always derives the same set, so duplicate
//! concurrent fetches are safe; a fetch that yields nothing degrades to an
//! empty set rather than an error, and empty sets are never persisted so a
//! later run gets another chance at the network.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::{ARCHIVE_BASE_URL, FETCH_CONCURRENCY, GROUP_PAGE_LIMIT, LATEST_BASE_URL};
use crate::track::cache::SymbolCache;
use crate::track::extract::{extract_group_links, extract_symbols};
use crate::track::fetcher::PageFetcher;
use crate::track::types::ApiCategory;
use crate::track::versions::VersionRegistry;

/// Trait for resolving the symbol set of one (version, category) key
///
/// The boundary search engine depends on this seam instead of the concrete
/// store so its walk logic can be tested against canned sets.
#[async_trait::async_trait]
pub trait SymbolSource: Send + Sync {
    async fn symbols(&self, version: &str, category: ApiCategory) -> BTreeSet<String>;
}

pub struct SymbolStore {
    fetcher: Arc<dyn PageFetcher>,
    cache: SymbolCache,
    registry: Arc<VersionRegistry>,
    use_cache: bool,
    archive_base: String,
    latest_base: String,
    concurrency: usize,
}

impl SymbolStore {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        cache: SymbolCache,
        registry: Arc<VersionRegistry>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            registry,
            use_cache: true,
            archive_base: ARCHIVE_BASE_URL.to_string(),
            latest_base: LATEST_BASE_URL.to_string(),
            concurrency: FETCH_CONCURRENCY,
        }
    }

    /// Override the documentation base URLs
    pub fn with_bases(mut self, archive_base: &str, latest_base: &str) -> Self {
        self.archive_base = archive_base.to_string();
        self.latest_base = latest_base.to_string();
        self
    }

    /// Toggle cache reads and writes (both are skipped when disabled)
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    /// Resolve the symbol set for a key, consulting the cache first.
    ///
    /// Only non-empty cached sets short-circuit the fetch, and only
    /// non-empty fetched sets are persisted: an empty set is a valid
    /// outcome for the caller, but caching it would pin a transient
    /// network failure forever.
    pub async fn symbols(&self, version: &str, category: ApiCategory) -> BTreeSet<String> {
        if self.use_cache {
            match self.cache.load(category, version) {
                Ok(Some(symbols)) if !symbols.is_empty() => return symbols,
                Ok(_) => {}
                Err(e) => warn!(
                    "Ignoring unreadable cache entry for {}/{}: {}",
                    category.as_str(),
                    version,
                    e
                ),
            }
        }

        let symbols = self.fetch_symbols(version, category).await;

        if self.use_cache && !symbols.is_empty() {
            if let Err(e) = self.cache.store(category, version, &symbols) {
                warn!(
                    "Failed to persist symbols for {}/{}: {}",
                    category.as_str(),
                    version,
                    e
                );
            }
        }

        symbols
    }

    /// Symbol sets for every version in a range, unioned across the
    /// requested categories, fetched with bounded concurrency.
    pub async fn symbols_for_range(
        &self,
        versions: &[String],
        categories: &[ApiCategory],
    ) -> HashMap<String, BTreeSet<String>> {
        let total = versions.len();

        stream::iter(versions.iter().cloned().enumerate())
            .map(|(index, version)| async move {
                let mut symbols = BTreeSet::new();
                for &category in categories {
                    symbols.extend(self.symbols(&version, category).await);
                }
                info!(
                    "[{}/{}] CUDA {}: {} symbols",
                    index + 1,
                    total,
                    version,
                    symbols.len()
                );
                (version, symbols)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await
    }

    async fn fetch_symbols(&self, version: &str, category: ApiCategory) -> BTreeSet<String> {
        let mut symbols = BTreeSet::new();

        for url in self.candidate_urls(version, category) {
            let html = self.fetcher.fetch(&url).await;
            if html.is_empty() {
                debug!("No content at {}", url);
                continue;
            }

            symbols.extend(extract_symbols(&html));

            // Module group pages carry the bulk of the per-function entries
            let base = url.rsplit_once('/').map(|(base, _)| base).unwrap_or(&url);
            for link in extract_group_links(&html)
                .into_iter()
                .take(GROUP_PAGE_LIMIT)
            {
                let group_url = if link.starts_with("http") {
                    link
                } else {
                    format!("{}/{}", base, link)
                };
                let group_html = self.fetcher.fetch(&group_url).await;
                if !group_html.is_empty() {
                    symbols.extend(extract_symbols(&group_html));
                }
            }

            if !symbols.is_empty() {
                break;
            }
        }

        // Deprecated entries are listed on the legacy high-level page only
        let legacy_url = format!(
            "{}/{}/{}/group__CUDART__HIGHLEVEL.html",
            self.archive_base,
            version,
            category.doc_slug()
        );
        let legacy_html = self.fetcher.fetch(&legacy_url).await;
        if !legacy_html.is_empty() {
            symbols.extend(extract_symbols(&legacy_html));
        }

        symbols
    }

    /// Candidate index URLs for a key, in the order they are tried.
    /// The newest known release may not be archived yet, so it gets the
    /// main documentation tree as a last candidate.
    fn candidate_urls(&self, version: &str, category: ApiCategory) -> Vec<String> {
        let slug = category.doc_slug();
        let mut urls = vec![
            format!("{}/{}/{}/index.html", self.archive_base, version, slug),
            format!("{}/{}/{}/{}/index.html", self.archive_base, version, slug, slug),
        ];

        if self.registry.is_latest(version) {
            urls.push(format!("{}/{}/index.html", self.latest_base, slug));
        }

        urls
    }
}

#[async_trait::async_trait]
impl SymbolSource for SymbolStore {
    async fn symbols(&self, version: &str, category: ApiCategory) -> BTreeSet<String> {
        SymbolStore::symbols(self, version, category).await
    }
}
