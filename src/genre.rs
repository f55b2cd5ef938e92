use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// Numeric genre identifier as used by the catalogue API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(pub u32);

/// Genre ids known to the catalogue API and their display names
pub const GENRES: &[(GenreId, &str)] = &[
    (GenreId(1), "Personal Growth"),
    (GenreId(2), "Investigative Journalism"),
    (GenreId(3), "History"),
    (GenreId(4), "Comedy"),
    (GenreId(5), "Entertainment"),
    (GenreId(6), "Business"),
    (GenreId(7), "Fiction"),
    (GenreId(8), "News"),
    (GenreId(9), "Kids and Family"),
];

impl GenreId {
    /// Display name for a known genre
    pub fn name(self) -> Option<&'static str> {
        GENRES
            .iter()
            .find(|(id, _)| *id == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for GenreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Genre {}", self.0),
        }
    }
}

impl FromStr for GenreId {
    type Err = CommandError;

    /// Accepts a numeric id or a case-insensitive genre name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u32>() {
            return Ok(GenreId(id));
        }

        GENRES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map(|(id, _)| *id)
            .ok_or_else(|| CommandError::InvalidGenre(s.to_string()))
    }
}

/// Parse the argument of a genre change; "all", "none" and "" clear the filter
pub fn parse_genre_filter(s: &str) -> Result<Option<GenreId>, CommandError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "all" | "none" | "any" => Ok(None),
        _ => s.parse().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_have_names() {
        assert_eq!(GenreId(3).name(), Some("History"));
        assert_eq!(GenreId(9).name(), Some("Kids and Family"));
        assert_eq!(GenreId(42).name(), None);
    }

    #[test]
    fn display_falls_back_to_number() {
        assert_eq!(GenreId(4).to_string(), "Comedy");
        assert_eq!(GenreId(42).to_string(), "Genre 42");
    }

    #[test]
    fn parses_ids_and_names() {
        assert_eq!("7".parse::<GenreId>(), Ok(GenreId(7)));
        assert_eq!("comedy".parse::<GenreId>(), Ok(GenreId(4)));
        assert_eq!(" Kids and Family ".parse::<GenreId>(), Ok(GenreId(9)));
        assert_eq!(
            "polka".parse::<GenreId>(),
            Err(CommandError::InvalidGenre("polka".to_string()))
        );
    }

    #[test]
    fn filter_keywords_clear_the_filter() {
        assert_eq!(parse_genre_filter("all"), Ok(None));
        assert_eq!(parse_genre_filter("None"), Ok(None));
        assert_eq!(parse_genre_filter(""), Ok(None));
        assert_eq!(parse_genre_filter("2"), Ok(Some(GenreId(2))));
    }
}
