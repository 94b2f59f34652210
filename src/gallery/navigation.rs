use super::model::MediaDescriptor;
use super::Gallery;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Paging direction through the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prev" | "p" | "previous" | "left" => Ok(Direction::Prev),
            "next" | "n" | "right" => Ok(Direction::Next),
            other => Err(format!("unknown direction '{}' (expected prev or next)", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Prev => write!(f, "prev"),
            Direction::Next => write!(f, "next"),
        }
    }
}

/// Index reached by one step from `index` in a view of `len` items.
///
/// `None` as the starting index means the selection is not in the view:
/// `Next` then lands on the first item and `Prev` on the last.
pub fn step(index: Option<usize>, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }

    Some(match (direction, index) {
        (Direction::Next, Some(i)) => (i + 1) % len,
        (Direction::Next, None) => 0,
        (Direction::Prev, Some(i)) => (i % len + len - 1) % len,
        (Direction::Prev, None) => len - 1,
    })
}

impl Gallery {
    /// Set or clear the selection.
    pub fn select(&mut self, file: Option<MediaDescriptor>) {
        self.selection.current = file;
    }

    /// Select the listed file with this path. Returns false if none matches.
    pub fn select_path(&mut self, path: &str) -> bool {
        match self.catalog.find(path).cloned() {
            Some(file) => {
                self.select(Some(file));
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&MediaDescriptor> {
        self.selection.current.as_ref()
    }

    /// Move the selection one step through the organized view, wrapping at
    /// both ends. An empty view leaves the selection unchanged.
    pub fn navigate(&mut self, direction: Direction) -> Option<&MediaDescriptor> {
        let view = self.organized_view();
        let index = self.selection_index(&view);

        if let Some(next) = step(index, view.len(), direction) {
            debug!(%direction, from = ?index, to = next, len = view.len(), "navigate");
            self.selection.current = Some(view[next].clone());
        }

        self.selected()
    }

    /// Zero-based position of the selection and the size of the current view
    pub fn position(&mut self) -> Option<(usize, usize)> {
        let view = self.organized_view();
        self.selection_index(&view).map(|i| (i, view.len()))
    }

    fn selection_index(&self, view: &[MediaDescriptor]) -> Option<usize> {
        let current = self.selection.current.as_ref()?;
        view.iter().position(|file| file.path == current.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::test_support::*;

    fn selected_path(gallery: &Gallery) -> Option<&str> {
        gallery.selected().map(|f| f.path.as_str())
    }

    #[test]
    fn step_wraps_both_ways() {
        for len in 1..6 {
            for i in 0..len {
                assert_eq!(step(Some(i), len, Direction::Next), Some((i + 1) % len));
                assert_eq!(step(Some(i), len, Direction::Prev), Some((i + len - 1) % len));
            }
        }
    }

    #[test]
    fn step_recovers_missing_index_to_an_edge() {
        assert_eq!(step(None, 4, Direction::Next), Some(0));
        assert_eq!(step(None, 4, Direction::Prev), Some(3));
        assert_eq!(step(None, 1, Direction::Prev), Some(0));
    }

    #[test]
    fn step_on_empty_view_is_none() {
        assert_eq!(step(None, 0, Direction::Next), None);
        assert_eq!(step(Some(2), 0, Direction::Prev), None);
    }

    #[test]
    fn direction_parses() {
        assert_eq!("next".parse::<Direction>(), Ok(Direction::Next));
        assert_eq!(" PREV ".parse::<Direction>(), Ok(Direction::Prev));
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn navigate_walks_the_organized_view() {
        let mut gallery = gallery();
        gallery.ingest(files(&["/a/1.png", "/c/1.png", "/b/1.png", "/x/1.png"]));
        assert!(gallery.select_path("/b/1.png"));

        gallery.navigate(Direction::Next);
        assert_eq!(selected_path(&gallery), Some("/a/1.png"));
        gallery.navigate(Direction::Next);
        assert_eq!(selected_path(&gallery), Some("/c/1.png"));
        gallery.navigate(Direction::Next);
        assert_eq!(selected_path(&gallery), Some("/b/1.png"));
        gallery.navigate(Direction::Prev);
        assert_eq!(selected_path(&gallery), Some("/c/1.png"));
    }

    #[test]
    fn stale_selection_recovers_after_filter_switch() {
        let mut gallery = gallery();
        gallery.ingest(files(&["/a/1.png", "/b/1.png", "/a/2.png"]));
        assert!(gallery.select_path("/b/1.png"));

        gallery.set_filter(Some("a"));
        assert_eq!(gallery.position(), None);
        gallery.navigate(Direction::Next);
        assert_eq!(selected_path(&gallery), Some("/a/1.png"));

        gallery.select_path("/b/1.png");
        gallery.navigate(Direction::Prev);
        assert_eq!(selected_path(&gallery), Some("/a/2.png"));
    }

    #[test]
    fn orphan_selection_recovers_in_unfiltered_view() {
        let mut gallery = gallery();
        gallery.ingest(files(&["/x/1.png", "/a/1.png"]));
        assert!(gallery.select_path("/x/1.png"));

        gallery.navigate(Direction::Next);
        assert_eq!(selected_path(&gallery), Some("/a/1.png"));
    }

    #[test]
    fn no_selection_starts_at_an_edge() {
        let mut gallery = gallery();
        gallery.ingest(files(&["/a/1.png", "/a/2.png"]));

        gallery.navigate(Direction::Prev);
        assert_eq!(selected_path(&gallery), Some("/a/2.png"));
    }

    #[test]
    fn navigate_on_empty_view_is_a_noop() {
        let mut gallery = gallery();
        gallery.ingest(Vec::new());
        assert!(gallery.navigate(Direction::Next).is_none());

        gallery.ingest(files(&["/b/1.png"]));
        gallery.select_path("/b/1.png");
        gallery.set_filter(Some("a"));
        gallery.navigate(Direction::Prev);
        assert_eq!(selected_path(&gallery), Some("/b/1.png"));
    }

    #[test]
    fn select_and_clear() {
        let mut gallery = gallery();
        gallery.ingest(files(&["/a/1.png"]));

        assert!(!gallery.select_path("/a/missing.png"));
        assert!(gallery.selected().is_none());

        gallery.select(Some(MediaDescriptor::new("/a/1.png")));
        assert_eq!(gallery.position(), Some((0, 1)));
        gallery.select(None);
        assert!(gallery.selected().is_none());
        assert_eq!(gallery.position(), None);
    }
}
