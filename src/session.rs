// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use url::Url;

use crate::catalogue::{
    DEFAULT_CATALOGUE_URL, DEFAULT_DETAIL_URL, ShowDetail, ShowId, ShowRecord, fetch_catalogue,
    fetch_show_detail, is_url, parse_catalogue_file,
};
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::state::{ViewEvent, ViewState};

/// Where a session gets its data from
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Catalogue URL or path to a local JSON listing
    pub catalogue_source: String,
    /// Base URL that show ids are appended to for detail lookups
    pub detail_base_url: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            catalogue_source: DEFAULT_CATALOGUE_URL.to_string(),
            detail_base_url: DEFAULT_DETAIL_URL.to_string(),
        }
    }
}

/// Fetch the catalogue listing from a URL or read it from a local file
pub async fn load_catalogue<C: HttpClient>(
    client: &C,
    source: &str,
    reporter: &SharedProgressReporter,
) -> Result<Vec<ShowRecord>, FetchError> {
    reporter.report(ProgressEvent::FetchingCatalogue {
        source: source.to_string(),
    });

    let result = if is_url(source) {
        fetch_catalogue(client, source).await
    } else {
        parse_catalogue_file(Path::new(source))
    };

    match &result {
        Ok(shows) => reporter.report(ProgressEvent::CatalogueLoaded {
            show_count: shows.len(),
        }),
        Err(e) => reporter.report(ProgressEvent::CatalogueFailed {
            error: e.to_string(),
        }),
    }

    result
}

/// Start a session: create the view state and settle it with the one catalogue fetch
///
/// Never fails; a fetch failure is recorded in the returned state.
pub async fn start_session<C: HttpClient>(
    client: &C,
    options: &SessionOptions,
    reporter: &SharedProgressReporter,
) -> ViewState {
    let mut state = ViewState::new();

    match load_catalogue(client, &options.catalogue_source, reporter).await {
        Ok(shows) => {
            state.apply(ViewEvent::CatalogueLoaded(shows));
        }
        Err(e) => {
            tracing::error!(
                source = %options.catalogue_source,
                error = %e,
                "catalogue fetch failed"
            );
            state.apply(ViewEvent::CatalogueFailed);
        }
    }

    state
}

/// Select a show and fetch the detail its modal displays
pub async fn open_show<C: HttpClient>(
    client: &C,
    options: &SessionOptions,
    state: &mut ViewState,
    id: ShowId,
    reporter: &SharedProgressReporter,
) -> Result<ShowDetail, FetchError> {
    state.apply(ViewEvent::ShowSelected(id.clone()));

    reporter.report(ProgressEvent::FetchingDetail {
        show_id: id.to_string(),
    });

    let result = fetch_detail(client, options, &id).await;

    match &result {
        Ok(detail) => reporter.report(ProgressEvent::DetailLoaded {
            show_title: detail.title.clone(),
            season_count: detail.seasons.len(),
            episode_count: detail.episode_count(),
        }),
        Err(e) => {
            tracing::error!(show = %id, error = %e, "show detail fetch failed");
            reporter.report(ProgressEvent::DetailFailed {
                show_id: id.to_string(),
                error: e.to_string(),
            });
        }
    }

    result
}

async fn fetch_detail<C: HttpClient>(
    client: &C,
    options: &SessionOptions,
    id: &ShowId,
) -> Result<ShowDetail, FetchError> {
    if !is_url(&options.catalogue_source) {
        return Err(FetchError::DetailUnavailable);
    }

    let base = Url::parse(&options.detail_base_url)?;
    fetch_show_detail(client, &base, id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use bytes::Bytes;
    use tempfile::NamedTempFile;

    use crate::error::FETCH_FAILURE_MESSAGE;
    use crate::http::HttpResponse;
    use crate::progress::{NoopReporter, ProgressReporter};

    const LISTING: &str = r#"[
        {"id": "z", "title": "Zebra Cast", "genres": [1], "updated": "2023-01-01"},
        {"id": "a", "title": "Alpha Talk", "genres": [2], "updated": "2024-06-01"}
    ]"#;

    const DETAIL: &str = r#"{
        "id": "a",
        "title": "Alpha Talk",
        "seasons": [{"season": 1, "title": "One", "episodes": [{"title": "Pilot", "episode": 1}]}]
    }"#;

    struct MockHttpClient {
        status: u16,
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
            let body = if url.contains("/id/") { DETAIL } else { LISTING };
            Ok(HttpResponse {
                status: self.status,
                body: Bytes::from_static(body.as_bytes()),
            })
        }
    }

    /// Fails every request at the transport level
    struct UnreachableClient;

    #[async_trait]
    impl HttpClient for UnreachableClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, reqwest::Error> {
            // A request that cannot even be built yields a genuine reqwest::Error
            Err(reqwest::Client::new().get("not a url").build().unwrap_err())
        }
    }

    #[derive(Default)]
    struct CollectingReporter {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl ProgressReporter for CollectingReporter {
        fn report(&self, event: ProgressEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[tokio::test]
    async fn start_session_loads_catalogue() {
        let client = MockHttpClient { status: 200 };

        let options = SessionOptions::default();
        let state = start_session(&client, &options, &NoopReporter::shared()).await;

        assert!(!state.is_loading());
        assert_eq!(state.error(), None);
        assert_eq!(state.shows().len(), 2);
    }

    #[tokio::test]
    async fn non_success_status_fails_the_session() {
        let client = MockHttpClient { status: 503 };

        let options = SessionOptions::default();
        let state = start_session(&client, &options, &NoopReporter::shared()).await;

        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(FETCH_FAILURE_MESSAGE));
        assert!(state.shows().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_fails_the_session() {
        let state = start_session(
            &UnreachableClient,
            &SessionOptions::default(),
            &NoopReporter::shared(),
        )
        .await;

        assert_eq!(state.error(), Some(FETCH_FAILURE_MESSAGE));
        assert!(state.shows().is_empty());
    }

    #[tokio::test]
    async fn local_file_source_skips_the_network() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LISTING.as_bytes()).unwrap();

        let options = SessionOptions {
            catalogue_source: file.path().display().to_string(),
            ..Default::default()
        };

        let state = start_session(&UnreachableClient, &options, &NoopReporter::shared()).await;

        assert_eq!(state.error(), None);
        assert_eq!(state.shows().len(), 2);
    }

    #[tokio::test]
    async fn load_catalogue_reports_progress() {
        let client = MockHttpClient { status: 200 };
        let collector = Arc::new(CollectingReporter::default());
        let reporter: SharedProgressReporter = collector.clone();

        load_catalogue(&client, DEFAULT_CATALOGUE_URL, &reporter)
            .await
            .unwrap();

        let events = collector.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ProgressEvent::FetchingCatalogue { .. }));
        assert!(matches!(
            events[1],
            ProgressEvent::CatalogueLoaded { show_count: 2 }
        ));
    }

    #[tokio::test]
    async fn open_show_selects_and_fetches_detail() {
        let client = MockHttpClient { status: 200 };
        let options = SessionOptions::default();
        let reporter = NoopReporter::shared();
        let mut state = start_session(&client, &options, &reporter).await;

        let detail = open_show(&client, &options, &mut state, ShowId::new("a"), &reporter)
            .await
            .unwrap();

        assert_eq!(detail.title, "Alpha Talk");
        assert_eq!(detail.episode_count(), 1);
        assert_eq!(state.selected_show_id(), Some(&ShowId::new("a")));
    }

    #[tokio::test]
    async fn detail_is_unavailable_for_file_sources() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LISTING.as_bytes()).unwrap();

        let options = SessionOptions {
            catalogue_source: file.path().display().to_string(),
            ..Default::default()
        };
        let reporter = NoopReporter::shared();
        let mut state = start_session(&UnreachableClient, &options, &reporter).await;

        let err = open_show(&UnreachableClient, &options, &mut state, ShowId::new("a"), &reporter)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::DetailUnavailable));
        assert_eq!(state.selected_show_id(), Some(&ShowId::new("a")));
    }
}
