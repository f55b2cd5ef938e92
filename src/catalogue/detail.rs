// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Deserialize;
use url::Url;

use crate::error::FetchError;
use crate::http::HttpClient;

use super::fetch::{fetch_bytes, parse_json};
use super::model::{ShowId, parse_timestamp};

/// Base URL that show ids are appended to for detail lookups
pub const DEFAULT_DETAIL_URL: &str = "https://podcast-api.netlify.app/id/";

/// Full detail of one show, including its seasons and episodes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowDetail {
    pub id: ShowId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Genre names; the detail endpoint sends names rather than ids
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

/// One season of a show
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Season {
    pub season: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// One episode within a season
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Episode {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub episode: u32,
    /// Audio file URL
    #[serde(default)]
    pub file: Option<String>,
}

impl ShowDetail {
    pub fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_timestamp(&self.updated)
    }

    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

/// Build the detail URL for a show id under the given base
///
/// The id is appended as a single percent-encoded path segment, so it can
/// never change the host, leave the base path or add a query.
pub fn detail_url(base: &Url, id: &ShowId) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidDetailBase(base.to_string()))?
        .pop_if_empty()
        .push(id.as_str());
    Ok(url)
}

/// Fetch and parse the detail record of one show
pub async fn fetch_show_detail<C: HttpClient>(
    client: &C,
    base: &Url,
    id: &ShowId,
) -> Result<ShowDetail, FetchError> {
    let url = detail_url(base, id)?;
    let bytes = fetch_bytes(client, url.as_str()).await?;
    parse_json(&bytes, url.as_str())
}
