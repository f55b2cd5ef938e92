use crate::catalogue::ShowId;
use crate::derive::SortMode;
use crate::error::CommandError;
use crate::genre::{GenreId, parse_genre_filter};
use crate::state::ViewEvent;

/// One parsed prompt line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Sort(SortMode),
    Genre(Option<GenreId>),
    Open(ShowId),
    Close,
    List,
    Genres,
    Help,
    Quit,
}

impl Command {
    /// The state transition this command triggers, if it is a control event
    pub fn to_event(&self) -> Option<ViewEvent> {
        match self {
            Command::Search(term) => Some(ViewEvent::SearchChanged(term.clone())),
            Command::Sort(mode) => Some(ViewEvent::SortChanged(*mode)),
            Command::Genre(genre) => Some(ViewEvent::GenreChanged(*genre)),
            Command::Close => Some(ViewEvent::ModalClosed),
            Command::Open(_) | Command::List | Command::Genres | Command::Help | Command::Quit => {
                None
            }
        }
    }
}

pub const HELP: &str = "\
Commands:
  search [text]      filter by title (no text clears the search)
  sort <mode>        A-Z, Z-A, Newest or Oldest
  genre <id|name>    filter by genre ('all' clears the filter)
  open <id>          show a podcast's seasons and episodes
  close              close the open podcast
  list               show the current results again
  genres             list the known genres
  help               show this help
  quit               leave";

/// Parse one line typed at the prompt
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "search" | "s" | "/" => Ok(Command::Search(rest.to_string())),
        "sort" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "sort",
                    usage: "sort <A-Z|Z-A|Newest|Oldest>",
                });
            }
            Ok(Command::Sort(SortMode::from_label(rest)))
        }
        "genre" | "g" => parse_genre_filter(rest).map(Command::Genre),
        "open" | "o" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "open",
                    usage: "open <id>",
                });
            }
            Ok(Command::Open(ShowId::new(rest)))
        }
        "close" | "c" => Ok(Command::Close),
        "" | "list" | "ls" | "l" => Ok(Command::List),
        "genres" => Ok(Command::Genres),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(word.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_keeps_inner_spaces() {
        assert_eq!(
            parse_command("search  true crime  "),
            Ok(Command::Search("true crime".to_string()))
        );
        assert_eq!(parse_command("search"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn sort_is_lenient_about_labels() {
        assert_eq!(parse_command("sort Z-A"), Ok(Command::Sort(SortMode::TitleDescending)));
        assert_eq!(parse_command("sort newest"), Ok(Command::Sort(SortMode::NewestFirst)));
        assert_eq!(parse_command("sort popular"), Ok(Command::Sort(SortMode::Unsorted)));
        assert!(matches!(
            parse_command("sort"),
            Err(CommandError::MissingArgument { command: "sort", .. })
        ));
    }

    #[test]
    fn genre_accepts_ids_names_and_all() {
        assert_eq!(parse_command("genre 3"), Ok(Command::Genre(Some(GenreId(3)))));
        assert_eq!(parse_command("genre news"), Ok(Command::Genre(Some(GenreId(8)))));
        assert_eq!(parse_command("genre all"), Ok(Command::Genre(None)));
        assert_eq!(
            parse_command("genre polka"),
            Err(CommandError::InvalidGenre("polka".to_string()))
        );
    }

    #[test]
    fn open_requires_an_id() {
        assert_eq!(parse_command("open 10716"), Ok(Command::Open(ShowId::new("10716"))));
        assert!(parse_command("open").is_err());
    }

    #[test]
    fn bare_enter_lists_results() {
        assert_eq!(parse_command(""), Ok(Command::List));
        assert_eq!(parse_command("   "), Ok(Command::List));
    }

    #[test]
    fn unknown_words_are_rejected() {
        assert_eq!(
            parse_command("dance now"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn control_commands_map_to_events() {
        assert_eq!(
            Command::Search("abc".to_string()).to_event(),
            Some(ViewEvent::SearchChanged("abc".to_string()))
        );
        assert_eq!(
            Command::Genre(None).to_event(),
            Some(ViewEvent::GenreChanged(None))
        );
        assert_eq!(Command::Close.to_event(), Some(ViewEvent::ModalClosed));
        assert_eq!(Command::Help.to_event(), None);
        assert_eq!(Command::Open(ShowId::new("1")).to_event(), None);
    }
}
