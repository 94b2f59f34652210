use anyhow::Result;
use clap::Parser;

use super::{Cli, Commands};
use crate::cli_cmds::*;
use crate::config::Config;
use crate::source::MediaSource;

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    let source = cli
        .source
        .or_else(|| config.gallery.source.clone())
        .map(|location| MediaSource::parse(&location));

    match cli.command {
        Some(Commands::Collections) => {
            cmd_collections(&config, source.as_ref()).await?;
        }
        Some(Commands::List { tab, long }) => {
            cmd_list(&config, source.as_ref(), tab.as_deref(), long).await?;
        }
        Some(Commands::Nav {
            direction,
            tab,
            from,
            steps,
        }) => {
            let request = NavRequest {
                direction,
                tab,
                from,
                steps,
            };
            cmd_nav(&config, source.as_ref(), request).await?;
        }
        Some(Commands::Browse { tab }) => {
            cmd_browse(&config, source.as_ref(), tab.as_deref()).await?;
        }
        Some(Commands::Chat { message }) => {
            cmd_chat(&config, message.as_deref()).await?;
        }
        Some(Commands::Config) => {
            cmd_config(&config)?;
        }
        None => {
            cmd_browse(&config, source.as_ref(), None).await?;
        }
    }

    Ok(())
}
