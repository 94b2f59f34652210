use super::cache::{filtered_key, organized_key};
use super::model::collection_prefix;
use super::{Gallery, View};
use std::sync::Arc;
use tracing::debug;

/// Files under the active collection, in listing order.
///
/// With no filter the listing itself is returned, not a copy.
pub fn filtered(filter: Option<&str>, files: &View) -> View {
    let Some(tab) = filter else {
        return Arc::clone(files);
    };

    let prefix = collection_prefix(tab);
    Arc::new(
        files
            .iter()
            .filter(|file| file.path.starts_with(&prefix))
            .cloned()
            .collect(),
    )
}

/// Files grouped by collection in `precedence` order.
///
/// An active filter already scopes to one collection, so the filtered view
/// is returned as-is. Without a filter, files outside every precedence entry
/// are dropped.
pub fn organized(
    filter: Option<&str>,
    files: &View,
    filtered_view: &View,
    precedence: &[String],
) -> View {
    if filter.is_some() {
        return Arc::clone(filtered_view);
    }

    let mut ordered = Vec::with_capacity(files.len());
    for collection_path in precedence {
        let prefix = collection_prefix(collection_path);
        ordered.extend(
            files
                .iter()
                .filter(|file| file.path.starts_with(&prefix))
                .cloned(),
        );
    }
    Arc::new(ordered)
}

impl Gallery {
    /// The filtered view for the active filter, memoized per filter.
    pub fn filtered_view(&mut self) -> View {
        self.sync_cache();

        let filter = self.filters.active.as_deref();
        let files = self.catalog.files();
        self.cache
            .get_or_insert_with(&filtered_key(filter), || filtered(filter, files))
    }

    /// The organized view for the active filter, memoized per filter.
    pub fn organized_view(&mut self) -> View {
        let filtered_view = self.filtered_view();

        let filter = self.filters.active.as_deref();
        let files = self.catalog.files();
        let precedence = &self.precedence;
        self.cache.get_or_insert_with(&organized_key(filter), || {
            organized(filter, files, &filtered_view, precedence)
        })
    }

    /// Drop memoized views computed against an older catalog.
    pub(super) fn sync_cache(&mut self) {
        let generation = self.catalog.generation();
        if self.cache_generation != generation {
            if !self.cache.is_empty() {
                debug!(dropped = self.cache.len(), generation, "dropping stale views");
            }
            self.cache.clear();
            self.cache_generation = generation;
        }
    }
}
