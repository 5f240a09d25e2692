//! Parsing of interactive input lines.

use crate::state::{Category, FilterKind};
use std::str::FromStr;

/// One user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to a browsing view
    Category(Category),
    /// Load the next page
    More,
    Search(String),
    Filter(FilterKind, String),
    /// Open the card with this on-screen number
    Open(usize),
    /// Close button of the overlay
    Close,
    /// Selection outside the overlay content
    Outside,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help` for a list)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
Commands:
  top | airing | upcoming | movie   switch view
  more                              load the next page
  search <text>   (or /<text>)      search by title
  type <value>                      type filter (all, tv, movie, ova, special, ona, music)
  genre <value>                     genre filter (only `all` with ranking views)
  sort <value>                      sort order (only `score` with ranking views)
  open <n>                          show details for card n
  close | outside                   close the details overlay
  help                              show this list
  quit                              exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.strip_prefix('/') {
            Some(text) => ("/", text.trim()),
            None => match line.split_once(char::is_whitespace) {
                Some((word, rest)) => (word, rest.trim()),
                None => (line, ""),
            },
        };

        let filter = |kind: FilterKind, usage: &'static str| {
            if rest.is_empty() {
                Err(CommandError::Usage(usage))
            } else {
                Ok(Command::Filter(kind, rest.to_ascii_lowercase()))
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "top" => Ok(Command::Category(Category::Top)),
            "airing" => Ok(Command::Category(Category::Airing)),
            "upcoming" => Ok(Command::Category(Category::Upcoming)),
            "movie" | "movies" => Ok(Command::Category(Category::Movie)),
            "more" | "m" | "next" => Ok(Command::More),
            "search" | "/" => {
                if rest.is_empty() {
                    Err(CommandError::Usage("search <text>"))
                } else {
                    Ok(Command::Search(rest.to_string()))
                }
            }
            "type" => filter(FilterKind::Type, "type <value>"),
            "genre" => filter(FilterKind::Genre, "genre <value>"),
            "sort" => filter(FilterKind::Sort, "sort <value>"),
            "open" | "o" => rest
                .parse()
                .map(Command::Open)
                .map_err(|_| CommandError::Usage("open <n>")),
            "close" | "x" => Ok(Command::Close),
            "outside" => Ok(Command::Outside),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}
