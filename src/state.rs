use std::cell::OnceCell;

use crate::catalogue::{ShowId, ShowRecord};
use crate::derive::{SortMode, derive_indices};
use crate::error::FETCH_FAILURE_MESSAGE;
use crate::genre::GenreId;

/// Progress of the one catalogue fetch made per session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Loaded,
    /// Holds the user-facing message
    Failed(String),
}

/// Discrete state transitions; the only way a [`ViewState`] changes
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    SearchChanged(String),
    SortChanged(SortMode),
    GenreChanged(Option<GenreId>),
    ShowSelected(ShowId),
    ModalClosed,
    CatalogueLoaded(Vec<ShowRecord>),
    CatalogueFailed,
}

/// What the main area shows; exactly one applies at a time
#[derive(Debug, PartialEq)]
pub enum Content<'a> {
    Loading,
    Error(&'a str),
    NoResults,
    Grid(Vec<&'a ShowRecord>),
}

/// User-controlled display parameters plus fetch status
///
/// Owned by the event loop and handed out by reference. The derived list is
/// cached and only recomputed after an event that changes one of its inputs.
#[derive(Debug)]
pub struct ViewState {
    shows: Vec<ShowRecord>,
    search_term: String,
    sort_mode: SortMode,
    genre_filter: Option<GenreId>,
    selected_show: Option<ShowId>,
    status: FetchStatus,
    visible: OnceCell<Vec<usize>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            shows: Vec::new(),
            search_term: String::new(),
            sort_mode: SortMode::default(),
            genre_filter: None,
            selected_show: None,
            status: FetchStatus::Loading,
            visible: OnceCell::new(),
        }
    }

    /// Apply one event, returning whether anything changed
    pub fn apply(&mut self, event: ViewEvent) -> bool {
        match event {
            ViewEvent::SearchChanged(term) => {
                if self.search_term == term {
                    return false;
                }
                self.search_term = term;
                self.invalidate();
            }
            ViewEvent::SortChanged(mode) => {
                if self.sort_mode == mode {
                    return false;
                }
                self.sort_mode = mode;
                self.invalidate();
            }
            ViewEvent::GenreChanged(genre) => {
                if self.genre_filter == genre {
                    return false;
                }
                self.genre_filter = genre;
                self.invalidate();
            }
            ViewEvent::ShowSelected(id) => {
                if self.selected_show.as_ref() == Some(&id) {
                    return false;
                }
                self.selected_show = Some(id);
            }
            ViewEvent::ModalClosed => {
                if self.selected_show.take().is_none() {
                    return false;
                }
            }
            ViewEvent::CatalogueLoaded(shows) => {
                if !self.is_loading() {
                    tracing::warn!("catalogue already settled, ignoring late result");
                    return false;
                }
                tracing::info!(count = shows.len(), "catalogue loaded");
                self.shows = shows;
                self.status = FetchStatus::Loaded;
                self.invalidate();
            }
            ViewEvent::CatalogueFailed => {
                if !self.is_loading() {
                    tracing::warn!("catalogue already settled, ignoring late failure");
                    return false;
                }
                self.status = FetchStatus::Failed(FETCH_FAILURE_MESSAGE.to_string());
                self.invalidate();
            }
        }
        true
    }

    fn invalidate(&mut self) {
        self.visible = OnceCell::new();
    }

    pub fn shows(&self) -> &[ShowRecord] {
        &self.shows
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn genre_filter(&self) -> Option<GenreId> {
        self.genre_filter
    }

    pub fn selected_show_id(&self) -> Option<&ShowId> {
        self.selected_show.as_ref()
    }

    /// The listing entry of the selected show, if it is in the catalogue
    pub fn selected_show(&self) -> Option<&ShowRecord> {
        let id = self.selected_show.as_ref()?;
        self.find_show(id)
    }

    pub fn find_show(&self, id: &ShowId) -> Option<&ShowRecord> {
        self.shows.iter().find(|show| &show.id == id)
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The filtered, ordered shows for the current parameters
    pub fn visible(&self) -> Vec<&ShowRecord> {
        self.visible
            .get_or_init(|| {
                derive_indices(
                    &self.shows,
                    &self.search_term,
                    self.sort_mode,
                    self.genre_filter,
                )
            })
            .iter()
            .map(|&index| &self.shows[index])
            .collect()
    }

    /// Pick the one thing the main area should display
    pub fn content(&self) -> Content<'_> {
        if self.is_loading() {
            return Content::Loading;
        }
        if let Some(message) = self.error() {
            return Content::Error(message);
        }

        let visible = self.visible();
        if visible.is_empty() {
            Content::NoResults
        } else {
            Content::Grid(visible)
        }
    }
}
