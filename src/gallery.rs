//! Gallery state engine: catalog, filtered/organized views and selection.

use crate::config::Config;
use crate::source::MediaSource;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

mod cache;
mod catalog;
mod filters;
mod model;
mod navigation;
mod views;

use cache::DerivationCache;

pub use cache::DEFAULT_TTL;
pub use catalog::CatalogStore;
pub use model::{Collection, MediaDescriptor, MediaMetadata};
pub use navigation::Direction;

/// A derived, shareable list of media files
pub type View = Arc<Vec<MediaDescriptor>>;

/// Collection order of the unfiltered view
pub const DEFAULT_PRECEDENCE: &[&str] = &[
    "machine garden",
    "bob is ded",
    "burgers",
    "genesis",
    "fun guys",
];

/// Order applied to the raw listing at ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Keep the order the source delivered
    #[default]
    Source,
    /// Most recently modified first
    Newest,
}

impl SortMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::Source => "Source",
            SortMode::Newest => "Newest",
        }
    }
}

/// Active collection scope.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Collection path, or `None` for every collection
    pub active: Option<String>,
}

/// Current selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub current: Option<MediaDescriptor>,
}

/// Engine context, owned by whoever drives the UI.
///
/// Every mutation takes `&mut self`, so ingest, filter changes and
/// selection changes are serialized by construction.
pub struct Gallery {
    pub catalog: CatalogStore,
    pub filters: FilterState,
    pub selection: SelectionState,
    precedence: Vec<String>,
    cache: DerivationCache<View>,
    cache_generation: u64,
}

impl Gallery {
    pub fn new(
        collections: Vec<Collection>,
        precedence: Vec<String>,
        sort_mode: SortMode,
        cache_ttl: Duration,
    ) -> Self {
        let catalog = CatalogStore::new(collections, sort_mode);
        let cache_generation = catalog.generation();
        let cache = DerivationCache::new(cache_ttl);
        debug!(
            collections = catalog.collections().len(),
            sort = sort_mode.display_name(),
            ttl_secs = cache.ttl().as_secs(),
            "gallery created"
        );

        Self {
            catalog,
            filters: FilterState::default(),
            selection: SelectionState::default(),
            precedence,
            cache,
            cache_generation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.collections.clone(),
            config.gallery.precedence.clone(),
            config.gallery.sort,
            config.gallery.cache_ttl(),
        )
    }

    /// Replace the listing. Views derived from the previous one are dropped.
    pub fn ingest(&mut self, files: Vec<MediaDescriptor>) {
        self.catalog.ingest(files);
        self.sync_cache();
    }

    /// Fetch from `source` and ingest.
    ///
    /// On failure the current listing is kept untouched.
    pub async fn refresh(&mut self, source: &MediaSource) -> Result<usize> {
        let files = source.fetch().await?;
        let count = files.len();
        self.ingest(files);
        info!(count, source = %source, "media listing loaded");
        Ok(count)
    }

    pub fn precedence(&self) -> &[String] {
        &self.precedence
    }

    pub fn collections(&self) -> &[Collection] {
        self.catalog.collections()
    }
}
