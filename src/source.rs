//! Where the raw media listing comes from.
//!
//! Every adapter produces the whole listing at once; a failed fetch yields
//! an error and nothing partial.

use crate::gallery::{MediaDescriptor, MediaMetadata};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// `artwork_metadata.json` style document keyed by path
    MetadataFile(PathBuf),
    /// Media root; first-level directories are collections
    Directory(PathBuf),
    /// Endpoint answering with a JSON array of descriptors
    Http(String),
}

/// Metadata document: `{ version, lastUpdated, files: { path: { metadata } } }`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    last_updated: Option<String>,
    files: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct FileEntry {
    #[serde(default)]
    metadata: Option<MediaMetadata>,
}

impl MediaSource {
    /// Pick an adapter: http(s) URLs, existing directories, else a metadata file.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            return MediaSource::Http(location.to_string());
        }

        let path = crate::utils::expand_tilde(location);
        if path.is_dir() {
            MediaSource::Directory(path)
        } else {
            MediaSource::MetadataFile(path)
        }
    }

    pub async fn fetch(&self) -> Result<Vec<MediaDescriptor>> {
        match self {
            MediaSource::MetadataFile(path) => {
                let data = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read metadata file: {}", path.display()))?;
                parse_metadata_document(&data, chrono::Utc::now().timestamp_millis())
                    .with_context(|| format!("Failed to parse metadata file: {}", path.display()))
            }
            MediaSource::Directory(root) => scan_directory(root),
            MediaSource::Http(url) => fetch_listing(url).await,
        }
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaSource::MetadataFile(path) => write!(f, "{}", path.display()),
            MediaSource::Directory(path) => write!(f, "{}/", path.display()),
            MediaSource::Http(url) => write!(f, "{}", url),
        }
    }
}

/// Convert a metadata document, stamping every file with `now_ms`.
fn parse_metadata_document(data: &str, now_ms: i64) -> Result<Vec<MediaDescriptor>> {
    let document: MetadataDocument = serde_json::from_str(data)?;
    debug!(
        version = document.version.as_deref().unwrap_or("?"),
        last_updated = document.last_updated.as_deref().unwrap_or("?"),
        files = document.files.len(),
        "metadata document"
    );

    document
        .files
        .into_iter()
        .map(|(path, value)| {
            let entry: FileEntry = serde_json::from_value(value)
                .with_context(|| format!("Invalid entry for {}", path))?;
            Ok(MediaDescriptor {
                path,
                modified_time: now_ms,
                metadata: entry.metadata,
            })
        })
        .collect()
}

/// Walk `root` and list media files as root-relative `/dir/file` paths.
fn scan_directory(root: &Path) -> Result<Vec<MediaDescriptor>> {
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let mut files: Vec<MediaDescriptor> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && crate::utils::is_media_file(e.path()))
        .filter_map(|e| {
            let Some(path) = relative_media_path(root, e.path()) else {
                warn!(path = %e.path().display(), "skipping non-UTF-8 path");
                return None;
            };
            let modified_time = e
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_millis() as i64)
                .unwrap_or(0);

            Some(MediaDescriptor {
                path,
                modified_time,
                metadata: None,
            })
        })
        .collect();

    // Sort by path for consistent ordering
    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(root = %root.display(), files = files.len(), "directory scanned");

    Ok(files)
}

fn relative_media_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut out = String::new();
    for component in relative.components() {
        out.push('/');
        out.push_str(component.as_os_str().to_str()?);
    }
    Some(out)
}

async fn fetch_listing(url: &str) -> Result<Vec<MediaDescriptor>> {
    let client = reqwest::Client::builder()
        .user_agent(format!("glowgallery/{}", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to connect to {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Media listing request failed with status: {}", response.status());
    }

    response
        .json::<Vec<MediaDescriptor>>()
        .await
        .context("Failed to parse media listing")
}
