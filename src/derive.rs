use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};

use crate::catalogue::ShowRecord;
use crate::error::CommandError;
use crate::genre::GenreId;

/// How the displayed shows are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    #[default]
    TitleAscending,
    TitleDescending,
    NewestFirst,
    OldestFirst,
    /// Keep the filtered order; what an unrecognized label resolves to
    Unsorted,
}

impl SortMode {
    /// Short label shown in the controls line
    pub fn label(self) -> &'static str {
        match self {
            SortMode::TitleAscending => "A-Z",
            SortMode::TitleDescending => "Z-A",
            SortMode::NewestFirst => "Newest",
            SortMode::OldestFirst => "Oldest",
            SortMode::Unsorted => "Unsorted",
        }
    }

    /// Resolve a label leniently; anything unknown means no reordering
    pub fn from_label(label: &str) -> SortMode {
        label.parse().unwrap_or_else(|_| {
            tracing::warn!(label, "unrecognized sort mode, keeping filtered order");
            SortMode::Unsorted
        })
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortMode {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a-z" | "az" | "title" => Ok(SortMode::TitleAscending),
            "z-a" | "za" => Ok(SortMode::TitleDescending),
            "newest" | "new" => Ok(SortMode::NewestFirst),
            "oldest" | "old" => Ok(SortMode::OldestFirst),
            _ => Err(CommandError::InvalidSortMode(s.trim().to_string())),
        }
    }
}

/// A record decorated with its pre-parsed sort inputs
struct SortKey<'a> {
    title: &'a str,
    updated: Option<DateTime<Utc>>,
}

type Comparator = fn(&SortKey<'_>, &SortKey<'_>) -> Ordering;

const COMPARATORS: &[(SortMode, Comparator)] = &[
    (SortMode::TitleAscending, title_ascending),
    (SortMode::TitleDescending, title_descending),
    (SortMode::NewestFirst, newest_first),
    (SortMode::OldestFirst, oldest_first),
];

fn title_ascending(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    compare_titles(a.title, b.title)
}

fn title_descending(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    compare_titles(b.title, a.title)
}

fn newest_first(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    compare_instants(a.updated, b.updated, true)
}

fn oldest_first(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    compare_instants(a.updated, b.updated, false)
}

fn comparator_for(mode: SortMode) -> Option<Comparator> {
    COMPARATORS
        .iter()
        .find(|(m, _)| *m == mode)
        .map(|(_, cmp)| *cmp)
}

thread_local! {
    static TITLE_COLLATOR: Option<CollatorBorrowed<'static>> = new_title_collator();
}

fn new_title_collator() -> Option<CollatorBorrowed<'static>> {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Tertiary);

    match Collator::try_new(Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!(error = %e, "no collation data, titles sort by code point");
            None
        }
    }
}

/// Compare two titles with the root locale collation at tertiary strength
///
/// Accented letters sort with their base letter and lowercase precedes
/// uppercase. Titles that collate equal compare `Equal`, so a stable sort
/// keeps their input order.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TITLE_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

/// Invalid instants sort after every valid one, whichever the direction
fn compare_instants(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    newest_first: bool,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if newest_first => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn title_matches(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}

/// Positions into `shows` of the records to display, in display order
pub fn derive_indices(
    shows: &[ShowRecord],
    search_term: &str,
    sort_mode: SortMode,
    genre_filter: Option<GenreId>,
) -> Vec<usize> {
    let needle = search_term.to_lowercase();

    let mut selected: Vec<(usize, SortKey<'_>)> = shows
        .iter()
        .enumerate()
        .filter(|(_, show)| genre_filter.is_none_or(|genre| show.has_genre(genre)))
        .filter(|(_, show)| needle.is_empty() || title_matches(&show.title, &needle))
        .map(|(index, show)| {
            let key = SortKey {
                title: &show.title,
                updated: show.updated_at(),
            };
            (index, key)
        })
        .collect();

    if let Some(compare) = comparator_for(sort_mode) {
        selected.sort_by(|(_, a), (_, b)| compare(a, b));
    }

    tracing::debug!(
        total = shows.len(),
        shown = selected.len(),
        sort = sort_mode.label(),
        "derived visible shows"
    );

    selected.into_iter().map(|(index, _)| index).collect()
}

/// Filter and sort the catalogue for display
///
/// Never mutates `shows`; the result borrows from it.
pub fn derive<'a>(
    shows: &'a [ShowRecord],
    search_term: &str,
    sort_mode: SortMode,
    genre_filter: Option<GenreId>,
) -> Vec<&'a ShowRecord> {
    derive_indices(shows, search_term, sort_mode, genre_filter)
        .into_iter()
        .map(|index| &shows[index])
        .collect()
}
