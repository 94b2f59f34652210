use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional descriptive metadata attached to a media file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
}

/// One catalogued media file.
///
/// `path` is slash-delimited and root-relative (`/burgers/01.gif`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    pub path: String,
    /// Epoch milliseconds, only used for the freshness sort at ingestion
    #[serde(default)]
    pub modified_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MediaMetadata>,
}

impl MediaDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            modified_time: 0,
            metadata: None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.title.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.description.as_deref())
    }

    /// File name without the collection prefix
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_path(&self.path)
    }
}

/// How a media file is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Gif,
    Video,
}

impl MediaKind {
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("mp4") | Some("webm") => MediaKind::Video,
            Some("gif") => MediaKind::Gif,
            _ => MediaKind::Image,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Gif => "gif",
            MediaKind::Video => "video",
        }
    }
}

/// A named, prefix-matched grouping of media files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Display label
    pub name: String,
    /// Directory name; members live under `/<path>/`
    pub path: String,
    pub thumbnail: String,
    /// Paths currently matching this collection, refreshed on ingest
    #[serde(default, skip_serializing)]
    pub images: Vec<String>,
}

impl Collection {
    pub fn new(name: &str, path: &str, thumbnail: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            thumbnail: thumbnail.to_string(),
            images: Vec::new(),
        }
    }

    pub fn contains(&self, media_path: &str) -> bool {
        in_collection(media_path, &self.path)
    }
}

/// `"/" + collection + "/"`, the prefix every member path starts with
pub fn collection_prefix(collection_path: &str) -> String {
    format!("/{}/", collection_path)
}

pub fn in_collection(media_path: &str, collection_path: &str) -> bool {
    media_path
        .strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(collection_path))
        .is_some_and(|rest| rest.starts_with('/'))
}
