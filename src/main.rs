use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use podbrowse::catalogue::{DEFAULT_CATALOGUE_URL, DEFAULT_DETAIL_URL};
use podbrowse::command::HELP;
use podbrowse::render::{render_detail, render_detail_failure, render_genres, render_view};
use podbrowse::{
    Command, GenreId, NoopReporter, ProgressEvent, ProgressReporter, ReqwestClient,
    SessionOptions, SharedProgressReporter, ShowId, SortMode, ViewEvent, ViewState,
    open_show, parse_command, start_session,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");

/// Browse, search, filter and sort a podcast catalogue
#[derive(Parser, Debug)]
#[command(name = "podbrowse")]
#[command(about = "Browse, search, filter and sort a podcast catalogue")]
#[command(version)]
struct Args {
    /// Catalogue URL or path to a local JSON listing
    #[arg(long, default_value = DEFAULT_CATALOGUE_URL)]
    source: String,

    /// Base URL that show ids are appended to for detail lookups
    #[arg(long, default_value = DEFAULT_DETAIL_URL)]
    detail_url: String,

    /// Initial title search
    #[arg(short, long)]
    search: Option<String>,

    /// Initial sort order: A-Z, Z-A, Newest or Oldest
    #[arg(long)]
    sort: Option<SortMode>,

    /// Initial genre filter, by id or name
    #[arg(short, long)]
    genre: Option<GenreId>,

    /// Open this show's details at startup
    #[arg(long, conflicts_with = "json")]
    show: Option<String>,

    /// Print the results once and exit instead of starting the prompt
    #[arg(long)]
    once: bool,

    /// With --once, print the results as JSON
    #[arg(long, requires = "once")]
    json: bool,

    /// Quiet mode - no spinner
    #[arg(short, long)]
    quiet: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Progress reporter showing a spinner while a request is in flight
struct SpinnerReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerReporter {
    fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn start(&self, message: String) {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner().template("{spinner:.green} {wide_msg}");
        if let Ok(style) = style {
            bar.set_style(style);
        }
        bar.set_message(message);
        bar.enable_steady_tick(std::time::Duration::from_millis(100));

        if let Some(previous) = self.bar.lock().unwrap().replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn finish(&self, message: Option<String>) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            match message {
                Some(message) => bar.abandon_with_message(message),
                None => bar.finish_and_clear(),
            }
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingCatalogue { source } => {
                self.start(format!("{SEARCH}Fetching catalogue: {}", source.cyan()));
            }
            ProgressEvent::CatalogueLoaded { .. } => self.finish(None),
            ProgressEvent::CatalogueFailed { error } => {
                self.finish(Some(format!("{FAILURE}{}", error.red())));
            }
            ProgressEvent::FetchingDetail { show_id } => {
                self.start(format!("{HEADPHONES}Fetching show {}", show_id.cyan()));
            }
            ProgressEvent::DetailLoaded { .. } => self.finish(None),
            ProgressEvent::DetailFailed { error, .. } => {
                self.finish(Some(format!("{FAILURE}{}", error.red())));
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "podbrowse=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Everything the event loop needs besides the state itself
struct Browser {
    client: ReqwestClient,
    options: SessionOptions,
    reporter: SharedProgressReporter,
}

impl Browser {
    fn print_view(&self, state: &ViewState) {
        println!("\n{}\n", render_view(state, Utc::now()));
    }

    async fn open(&self, state: &mut ViewState, id: ShowId) {
        match open_show(&self.client, &self.options, state, id, &self.reporter).await {
            Ok(detail) => println!("\n{}\n", render_detail(&detail, Utc::now())),
            Err(e) => println!("\n{}\n", render_detail_failure(e.user_message())),
        }
    }

    /// Handle one command; returns false when the user wants to leave
    async fn handle(&self, state: &mut ViewState, command: Command) -> bool {
        if let Some(event) = command.to_event() {
            let closes_modal = event == ViewEvent::ModalClosed;
            if state.apply(event) && !closes_modal {
                self.print_view(state);
            }
            return true;
        }

        match command {
            Command::Open(id) => self.open(state, id).await,
            Command::List => self.print_view(state),
            Command::Genres => println!("{}", render_genres()),
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
            Command::Search(_) | Command::Sort(_) | Command::Genre(_) | Command::Close => {}
        }
        true
    }

    async fn run_prompt(&self, state: &mut ViewState) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let prompt = match state.selected_show_id() {
                Some(id) => format!("[{id}]> "),
                None => "> ".to_string(),
            };
            print!("{}", prompt.bold());
            std::io::stdout().flush().context("Failed to write prompt")?;

            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                break;
            };

            match parse_command(&line) {
                Ok(command) => {
                    if !self.handle(state, command).await {
                        break;
                    }
                }
                Err(e) => println!("{}", e.to_string().yellow()),
            }
        }

        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let reporter: SharedProgressReporter = if args.quiet || args.json {
        NoopReporter::shared()
    } else {
        Arc::new(SpinnerReporter::new())
    };

    let browser = Browser {
        client: ReqwestClient::new(),
        options: SessionOptions {
            catalogue_source: args.source.clone(),
            detail_base_url: args.detail_url.clone(),
        },
        reporter,
    };

    if !args.json {
        println!(
            "\n{}{} {}",
            MICROPHONE,
            "podbrowse".bold().magenta(),
            "- Podcast Catalogue".dimmed()
        );
    }

    let mut state = start_session(&browser.client, &browser.options, &browser.reporter).await;

    if let Some(term) = args.search {
        state.apply(ViewEvent::SearchChanged(term));
    }
    if let Some(mode) = args.sort {
        state.apply(ViewEvent::SortChanged(mode));
    }
    if args.genre.is_some() {
        state.apply(ViewEvent::GenreChanged(args.genre));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&state.visible())
            .context("Failed to serialize results")?;
        println!("{json}");
    } else {
        browser.print_view(&state);
    }

    // A failed fetch is terminal for the session
    if state.error().is_some() {
        std::process::exit(1);
    }

    if let Some(id) = args.show {
        browser.open(&mut state, ShowId::new(id)).await;
    }
    if args.once {
        return Ok(());
    }

    println!("{}", "Type 'help' for commands.".dimmed());
    browser.run_prompt(&mut state).await
}
