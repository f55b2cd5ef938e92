use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::catalogue::{ShowDetail, ShowRecord};
use crate::format::{format_updated_ago, truncate_title};
use crate::genre::{GENRES, GenreId};
use crate::state::{Content, ViewState};

pub const NO_RESULTS_MESSAGE: &str = "No podcasts found. Try adjusting your filters.";
pub const LOADING_MESSAGE: &str = "Loading podcasts...";

const TITLE_WIDTH: usize = 60;

/// One line describing the active search, sort and genre
pub fn render_controls(state: &ViewState) -> String {
    let search = if state.search_term().is_empty() {
        "-".dimmed().to_string()
    } else {
        format!("\"{}\"", state.search_term()).cyan().to_string()
    };

    let genre = match state.genre_filter() {
        Some(genre) => genre.to_string().cyan().to_string(),
        None => "All".dimmed().to_string(),
    };

    format!(
        "Search: {}  Sort: {}  Genre: {}  ({} of {} shows)",
        search,
        state.sort_mode().label().cyan(),
        genre,
        state.visible().len(),
        state.shows().len()
    )
}

fn genre_names(genres: &[GenreId]) -> String {
    genres
        .iter()
        .map(GenreId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// A two-line card for one show
pub fn render_card(show: &ShowRecord, now: DateTime<Utc>) -> String {
    let mut details = Vec::new();
    if !show.genres.is_empty() {
        details.push(genre_names(&show.genres));
    }
    details.push(plural(show.seasons as usize, "season", "seasons"));
    details.push(format_updated_ago(show.updated_at(), now));

    format!(
        "{} {}\n    {}",
        truncate_title(&show.title, TITLE_WIDTH).bold(),
        format!("[{}]", show.id).dimmed(),
        details.join(" · ").dimmed()
    )
}

/// The main area: spinner text, error, empty notice or the card grid
pub fn render_content(content: &Content<'_>, now: DateTime<Utc>) -> String {
    match content {
        Content::Loading => LOADING_MESSAGE.dimmed().to_string(),
        Content::Error(message) => message.red().bold().to_string(),
        Content::NoResults => NO_RESULTS_MESSAGE.yellow().to_string(),
        Content::Grid(shows) => shows
            .iter()
            .map(|show| render_card(show, now))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Controls line followed by the main area
pub fn render_view(state: &ViewState, now: DateTime<Utc>) -> String {
    format!(
        "{}\n\n{}",
        render_controls(state),
        render_content(&state.content(), now)
    )
}

/// The modal for an opened show: description, then seasons with their episodes
pub fn render_detail(detail: &ShowDetail, now: DateTime<Utc>) -> String {
    let mut out = Vec::new();

    out.push(detail.title.bold().magenta().to_string());

    let mut meta = Vec::new();
    if !detail.genres.is_empty() {
        meta.push(detail.genres.join(", "));
    }
    meta.push(plural(detail.seasons.len(), "season", "seasons"));
    meta.push(format_updated_ago(detail.updated_at(), now));
    out.push(meta.join(" · ").dimmed().to_string());

    if !detail.description.is_empty() {
        out.push(String::new());
        out.push(detail.description.clone());
    }

    for season in &detail.seasons {
        out.push(String::new());
        let heading = if season.title.is_empty() {
            format!("Season {}", season.season)
        } else {
            format!("Season {}: {}", season.season, season.title)
        };
        out.push(format!(
            "{} {}",
            heading.bold(),
            format!("({})", plural(season.episodes.len(), "episode", "episodes")).dimmed()
        ));

        for episode in &season.episodes {
            out.push(format!("  {:>3}. {}", episode.episode, episode.title));
        }
    }

    out.join("\n")
}

/// Modal text when the detail could not be fetched
pub fn render_detail_failure(message: &str) -> String {
    message.red().bold().to_string()
}

/// Table of genre ids and names
pub fn render_genres() -> String {
    GENRES
        .iter()
        .map(|(id, name)| format!("  {:>2}  {}", id.0, name))
        .collect::<Vec<_>>()
        .join("\n")
}
