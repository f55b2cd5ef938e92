use std::path::PathBuf;
use thiserror::Error;

/// The only text a user ever sees for a failed fetch, whatever the cause
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch podcasts. Please try again later.";

/// Errors that can occur when fetching or parsing the catalogue or a show detail
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch {url}: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read catalogue file {path}: {source}")]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse response from {source_name}: {source}")]
    ParseFailed {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Detail base URL cannot take path segments: {0}")]
    InvalidDetailBase(String),

    #[error("Show details are only available for remote catalogues")]
    DetailUnavailable,
}

impl FetchError {
    /// All fetch failures collapse to one user-facing message
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILURE_MESSAGE
    }
}

/// Errors produced while parsing a line typed at the prompt
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    Unknown(String),

    #[error("'{command}' needs an argument: {usage}")]
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },

    #[error("Unknown genre '{0}'. Type 'genres' to list them")]
    InvalidGenre(String),

    #[error("Unknown sort mode '{0}'. Use one of: A-Z, Z-A, Newest, Oldest")]
    InvalidSortMode(String),
}
