use super::model::{Collection, MediaDescriptor};
use super::{SortMode, View};
use std::sync::Arc;
use tracing::debug;

/// Raw media listing plus the statically configured collections.
///
/// The listing is replaced wholesale on every ingest; nothing is added or
/// removed incrementally.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    files: View,
    collections: Vec<Collection>,
    sort_mode: SortMode,
    generation: u64,
}

impl CatalogStore {
    pub fn new(collections: Vec<Collection>, sort_mode: SortMode) -> Self {
        Self {
            files: Arc::new(Vec::new()),
            collections,
            sort_mode,
            generation: 0,
        }
    }

    /// Replace the raw listing and refresh every collection's member paths.
    pub fn ingest(&mut self, mut files: Vec<MediaDescriptor>) {
        if self.sort_mode == SortMode::Newest {
            // Stable, so equal timestamps keep their source order
            files.sort_by(|a, b| b.modified_time.cmp(&a.modified_time));
        }

        for collection in &mut self.collections {
            collection.images = files
                .iter()
                .filter(|file| collection.contains(&file.path))
                .map(|file| file.path.clone())
                .collect();
        }

        self.files = Arc::new(files);
        self.generation = self.generation.wrapping_add(1);

        debug!(
            files = self.files.len(),
            generation = self.generation,
            "catalog ingested"
        );
    }

    /// The raw listing, shared so derivations can hand it out unchanged
    pub fn files(&self) -> &View {
        &self.files
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Bumped on every ingest; derived views older than this are stale
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up a collection by its path
    pub fn collection(&self, path: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.path == path)
    }

    /// The first configured collection a descriptor belongs to
    pub fn collection_of(&self, file: &MediaDescriptor) -> Option<&Collection> {
        self.collections.iter().find(|c| c.contains(&file.path))
    }

    pub fn find(&self, path: &str) -> Option<&MediaDescriptor> {
        self.files.iter().find(|file| file.path == path)
    }
}
