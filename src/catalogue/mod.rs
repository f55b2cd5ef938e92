mod detail;
mod fetch;
mod model;

pub use detail::{DEFAULT_DETAIL_URL, Episode, Season, ShowDetail, detail_url, fetch_show_detail};
pub use fetch::{
    DEFAULT_CATALOGUE_URL, fetch_catalogue, is_url, parse_catalogue, parse_catalogue_file,
};
pub use model::{ShowId, ShowRecord, parse_timestamp};
