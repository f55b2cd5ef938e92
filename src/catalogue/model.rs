// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::genre::GenreId;

/// Stable show identifier. The API sends strings, but numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawShowId", into = "String")]
pub struct ShowId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawShowId {
    Text(String),
    Number(u64),
}

impl From<RawShowId> for ShowId {
    fn from(raw: RawShowId) -> Self {
        match raw {
            RawShowId::Text(s) => ShowId(s),
            RawShowId::Number(n) => ShowId(n.to_string()),
        }
    }
}

impl From<ShowId> for String {
    fn from(id: ShowId) -> Self {
        id.0
    }
}

impl ShowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One show in the catalogue listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowRecord {
    pub id: ShowId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Number of seasons, as reported by the listing
    #[serde(default)]
    pub seasons: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreId>,
    /// Last-updated timestamp exactly as received
    #[serde(default)]
    pub updated: String,
}

impl ShowRecord {
    /// Parsed `updated` timestamp, `None` if it is not a recognizable instant
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated)
    }

    pub fn has_genre(&self, genre: GenreId) -> bool {
        self.genres.contains(&genre)
    }
}

/// Parse the timestamp forms the catalogue uses
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC) and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive_formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    for format in naive_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
