// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::FetchError;
use crate::http::HttpClient;

use super::model::ShowRecord;

/// Where the catalogue listing is served from
pub const DEFAULT_CATALOGUE_URL: &str = "https://podcast-api.netlify.app";

/// Fetch raw response bytes from a URL, treating any non-2xx status as a failure
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes, FetchError> {
    let response = client
        .get(url)
        .await
        .map_err(|e| FetchError::RequestFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    Ok(response.body)
}

/// Read raw catalogue bytes from a local file
pub fn read_catalogue_file(path: &Path) -> Result<Vec<u8>, FetchError> {
    std::fs::read(path).map_err(|e| FetchError::FileReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn parse_json<T: DeserializeOwned>(
    bytes: &[u8],
    source_name: &str,
) -> Result<T, FetchError> {
    serde_json::from_slice(bytes).map_err(|e| FetchError::ParseFailed {
        source_name: source_name.to_string(),
        source: e,
    })
}

/// Parse a catalogue listing (a JSON array of shows)
pub fn parse_catalogue(bytes: &[u8], source_name: &str) -> Result<Vec<ShowRecord>, FetchError> {
    parse_json(bytes, source_name)
}

/// Fetch and parse the catalogue listing from a URL
pub async fn fetch_catalogue<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Vec<ShowRecord>, FetchError> {
    Url::parse(url)?;
    let bytes = fetch_bytes(client, url).await?;
    parse_catalogue(&bytes, url)
}

/// Parse a catalogue listing from a local JSON file
pub fn parse_catalogue_file(path: &Path) -> Result<Vec<ShowRecord>, FetchError> {
    let bytes = read_catalogue_file(path)?;
    parse_catalogue(&bytes, &path.display().to_string())
}

/// Determine if a string is a URL or a file path
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use async_trait::async_trait;
    use tempfile::NamedTempFile;

    use crate::http::HttpResponse;

    struct MockHttpClient {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, reqwest::Error> {
            Ok(HttpResponse {
                status: self.status,
                body: Bytes::from_static(self.body.as_bytes()),
            })
        }
    }

    const LISTING: &str = r#"[{"id":"1","title":"Zebra Cast","genres":[1],"updated":"2023-01-01"}]"#;

    #[test]
    fn is_url_detects_http() {
        assert!(is_url("http://example.com/"));
        assert!(is_url("https://podcast-api.netlify.app"));
    }

    #[test]
    fn is_url_rejects_file_paths() {
        assert!(!is_url("/path/to/shows.json"));
        assert!(!is_url("./shows.json"));
        assert!(!is_url("shows.json"));
    }

    #[tokio::test]
    async fn fetch_catalogue_parses_success_body() {
        let client = MockHttpClient {
            status: 200,
            body: LISTING,
        };

        let shows = fetch_catalogue(&client, DEFAULT_CATALOGUE_URL).await.unwrap();
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0].title, "Zebra Cast");
    }

    #[tokio::test]
    async fn fetch_catalogue_rejects_non_success_status() {
        let client = MockHttpClient {
            status: 500,
            body: LISTING,
        };

        let err = fetch_catalogue(&client, DEFAULT_CATALOGUE_URL)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn fetch_catalogue_rejects_malformed_body() {
        let client = MockHttpClient {
            status: 200,
            body: r#"{"not": "a list"}"#,
        };

        let err = fetch_catalogue(&client, DEFAULT_CATALOGUE_URL)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::ParseFailed { .. }));
    }

    #[tokio::test]
    async fn fetch_catalogue_rejects_invalid_url() {
        let client = MockHttpClient {
            status: 200,
            body: LISTING,
        };

        let err = fetch_catalogue(&client, "https://").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn parse_catalogue_file_reads_listing() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LISTING.as_bytes()).unwrap();

        let shows = parse_catalogue_file(file.path()).unwrap();
        assert_eq!(shows[0].id.as_str(), "1");
    }

    #[test]
    fn parse_catalogue_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_catalogue_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, FetchError::FileReadFailed { .. }));
    }
}
