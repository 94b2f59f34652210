use anyhow::Result;

use crate::config::Config;
use crate::gallery::{Direction, Gallery, MediaDescriptor};
use crate::source::MediaSource;

/// Build the engine and load the listing.
///
/// A failed load is reported and leaves the gallery empty.
pub(crate) async fn load_gallery(config: &Config, source: Option<&MediaSource>) -> Gallery {
    let mut gallery = Gallery::from_config(config);

    match source {
        Some(source) => {
            if let Err(e) = gallery.refresh(source).await {
                tracing::warn!(source = %source, error = %e, "media listing unavailable");
                eprintln!("Warning: failed to load media listing: {:#}", e);
            }
        }
        None => {
            eprintln!("No media source configured.");
            eprintln!("Pass --source <file|dir|url> or set gallery.source in the config file.");
        }
    }

    gallery
}

pub(crate) fn describe(gallery: &Gallery, file: &MediaDescriptor) -> String {
    let collection = gallery
        .catalog
        .collection_of(file)
        .map(|c| c.name.as_str())
        .unwrap_or("-");

    match file.title() {
        Some(title) => format!("{} [{}] {} \"{}\"", file.path, file.kind().display_name(), collection, title),
        None => format!("{} [{}] {}", file.path, file.kind().display_name(), collection),
    }
}

pub async fn cmd_collections(config: &Config, source: Option<&MediaSource>) -> Result<()> {
    let gallery = load_gallery(config, source).await;

    println!("Collections:");
    for collection in gallery.collections() {
        println!(
            "  {} ({}): {} items",
            collection.name,
            collection.path,
            collection.images.len()
        );
    }

    let classified: usize = gallery.collections().iter().map(|c| c.images.len()).sum();
    let unclassified = gallery.catalog.len().saturating_sub(classified);
    if unclassified > 0 {
        println!("  ({} unclassified)", unclassified);
    }

    println!();
    println!("Sort: {}", gallery.catalog.sort_mode().display_name());
    println!("All tab order: {}", gallery.precedence().join(" > "));

    Ok(())
}

pub async fn cmd_list(
    config: &Config,
    source: Option<&MediaSource>,
    tab: Option<&str>,
    long: bool,
) -> Result<()> {
    let mut gallery = load_gallery(config, source).await;
    if gallery.catalog.is_empty() {
        tracing::debug!("listing is empty");
        return Ok(());
    }
    gallery.set_filter(tab);

    for file in gallery.organized_view().iter() {
        if long {
            println!("{}", describe(&gallery, file));
        } else {
            println!("{}", file.path);
        }
    }

    Ok(())
}

pub struct NavRequest {
    pub direction: Direction,
    pub tab: Option<String>,
    pub from: Option<String>,
    pub steps: usize,
}

pub async fn cmd_nav(
    config: &Config,
    source: Option<&MediaSource>,
    request: NavRequest,
) -> Result<()> {
    let mut gallery = load_gallery(config, source).await;

    // Select before filtering so the start may lie outside the tab
    if let Some(from) = request.from.as_deref() {
        if !gallery.select_path(from) {
            eprintln!("'{}' is not in the listing; starting from an edge", from);
        }
    }
    gallery.set_filter(request.tab.as_deref());

    for _ in 0..request.steps {
        gallery.navigate(request.direction);
    }

    match gallery.selected() {
        Some(file) => println!("{}", file.path),
        None => println!("(nothing selected)"),
    }

    Ok(())
}

pub fn cmd_config(config: &Config) -> Result<()> {
    println!("# {}", Config::config_path().display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
