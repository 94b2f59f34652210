use crate::gallery::Direction;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "glowgallery")]
#[command(version)]
#[command(about = "Art gallery catalog with collection tabs, paging and a persona chat")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Media listing: metadata JSON file, media directory or http(s) URL
    #[arg(short, long, global = true)]
    pub(crate) source: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List collections with their item counts
    Collections,
    /// Print the organized view, optionally scoped to one collection
    List {
        /// Collection path to filter by (e.g. "burgers")
        #[arg(short, long)]
        tab: Option<String>,
        /// Show kind, collection and title next to each path
        #[arg(short, long)]
        long: bool,
    },
    /// Page from a file through the current view and print where it lands
    Nav {
        /// Direction to page in (prev or next)
        #[arg(short, long, default_value = "next")]
        direction: Direction,
        /// Collection path to filter by
        #[arg(short, long)]
        tab: Option<String>,
        /// Path of the starting selection
        #[arg(short, long)]
        from: Option<String>,
        /// Number of steps
        #[arg(short = 'n', long, default_value = "1")]
        steps: usize,
    },
    /// Browse the gallery interactively
    Browse {
        /// Collection path to start in
        #[arg(short, long)]
        tab: Option<String>,
    },
    /// Chat with the gallery persona
    Chat {
        /// Send a single message and print the reply
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Show the configuration file path and contents
    Config,
}
