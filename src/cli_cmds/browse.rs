use anyhow::Result;
use dialoguer::Input;

use super::core::{describe, load_gallery};
use crate::config::Config;
use crate::gallery::{Direction, Gallery};
use crate::source::MediaSource;

/// One line of browse input
#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand<'a> {
    Step(Direction),
    /// Cycle tabs, or jump to the named collection
    Tab(Option<&'a str>),
    All,
    Open(&'a str),
    Close,
    List,
    Help,
    Quit,
    Unknown(String),
}

fn parse_browse_command(input: &str) -> Option<BrowseCommand<'_>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let (name, arg) = match input.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (input, None),
    };

    let command = match name.to_lowercase().as_str() {
        "n" | "next" | "l" => BrowseCommand::Step(Direction::Next),
        "p" | "prev" | "h" => BrowseCommand::Step(Direction::Prev),
        "t" | "tab" => BrowseCommand::Tab(arg),
        "a" | "all" => BrowseCommand::All,
        "o" | "open" => match arg {
            Some(path) => BrowseCommand::Open(path),
            None => BrowseCommand::Unknown("open needs a path".to_string()),
        },
        "c" | "close" => BrowseCommand::Close,
        "ls" | "list" => BrowseCommand::List,
        "?" | "help" => BrowseCommand::Help,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        other => BrowseCommand::Unknown(other.to_string()),
    };
    Some(command)
}

const HELP: &str = "n/next  p/prev  t/tab [collection]  a/all  o/open <path>  c/close  ls/list  q/quit";

fn status_line(gallery: &mut Gallery) -> String {
    let tab = gallery.filter_label();
    let len = gallery.organized_view().len();

    match (gallery.position(), gallery.selected()) {
        (Some((idx, len)), Some(file)) => {
            let mut line = format!("[{}] {}/{}  {}", tab, idx + 1, len, describe(gallery, file));
            if let Some(description) = file.description() {
                line.push_str("\n    ");
                line.push_str(description);
            }
            line
        }
        (None, Some(file)) => format!("[{}] -/{}  {} (not in this tab)", tab, len, file.file_name()),
        (_, None) => format!("[{}] {} items, nothing selected", tab, len),
    }
}

pub async fn cmd_browse(config: &Config, source: Option<&MediaSource>, tab: Option<&str>) -> Result<()> {
    let mut gallery = load_gallery(config, source).await;
    gallery.set_filter(tab);

    println!("{}", HELP);
    println!("{}", status_line(&mut gallery));

    loop {
        let line: String = Input::new()
            .with_prompt("gallery")
            .allow_empty(true)
            .interact_text()?;

        let Some(command) = parse_browse_command(&line) else {
            continue;
        };

        match command {
            BrowseCommand::Step(direction) => {
                gallery.navigate(direction);
            }
            BrowseCommand::Tab(None) => gallery.cycle_filter(),
            BrowseCommand::Tab(Some(path)) => gallery.set_filter(Some(path)),
            BrowseCommand::All => gallery.clear_filter(),
            BrowseCommand::Open(path) => {
                if !gallery.select_path(path) {
                    println!("Not in the listing: {}", path);
                }
            }
            BrowseCommand::Close => gallery.select(None),
            BrowseCommand::List => {
                for file in gallery.organized_view().iter() {
                    println!("  {}", describe(&gallery, file));
                }
            }
            BrowseCommand::Help => println!("{}", HELP),
            BrowseCommand::Quit => break,
            BrowseCommand::Unknown(what) => println!("Unknown command: {} (? for help)", what),
        }

        println!("{}", status_line(&mut gallery));
    }

    Ok(())
}
