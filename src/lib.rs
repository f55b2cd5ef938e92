pub mod catalogue;
pub mod command;
pub mod derive;
pub mod error;
pub mod format;
pub mod genre;
pub mod http;
pub mod progress;
pub mod render;
pub mod session;
pub mod state;

// Re-export main types for convenience
pub use catalogue::{ShowDetail, ShowId, ShowRecord, fetch_catalogue, fetch_show_detail, is_url};
pub use command::{Command, parse_command};
pub use derive::{SortMode, derive, derive_indices};
pub use error::{CommandError, FETCH_FAILURE_MESSAGE, FetchError};
pub use genre::GenreId;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use session::{SessionOptions, load_catalogue, open_show, start_session};
pub use state::{Content, FetchStatus, ViewEvent, ViewState};
