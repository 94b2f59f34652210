use super::model::Collection;
use super::Gallery;
use tracing::debug;

impl Gallery {
    /// Scope views to one collection path, or to everything with `None`.
    ///
    /// A path matching no collection is accepted and yields empty views.
    /// Cached views for other filters stay valid.
    pub fn set_filter(&mut self, filter: Option<&str>) {
        let filter = filter.map(str::trim).filter(|f| !f.is_empty());
        if self.filters.active.as_deref() == filter {
            return;
        }

        debug!(from = ?self.filters.active, to = ?filter, "filter changed");
        self.filters.active = filter.map(str::to_string);
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(None);
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.filters.active.as_deref()
    }

    /// The configured collection behind the active filter
    pub fn active_collection(&self) -> Option<&Collection> {
        self.active_filter()
            .and_then(|path| self.catalog.collection(path))
    }

    /// Step the filter through "all" and every collection in display order.
    pub fn cycle_filter(&mut self) {
        let collections = self.catalog.collections();
        if collections.is_empty() {
            self.clear_filter();
            return;
        }

        let next = match self.active_filter() {
            None => Some(collections[0].path.clone()),
            Some(current) => collections
                .iter()
                .position(|c| c.path == current)
                .and_then(|pos| collections.get(pos + 1))
                .map(|c| c.path.clone()),
        };

        self.set_filter(next.as_deref());
    }

    /// Label for the active filter tab
    pub fn filter_label(&self) -> String {
        match (self.active_filter(), self.active_collection()) {
            (None, _) => "ALL".to_string(),
            (Some(_), Some(collection)) => collection.name.clone(),
            (Some(path), None) => path.to_string(),
        }
    }
}
