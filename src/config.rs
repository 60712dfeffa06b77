use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.booking.com/searchresults.en-us.html";

/// Settings for one scrape run, fixed before the pipeline starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Search results endpoint the query string is appended to
    pub base_url: String,
    pub page_load_timeout: Duration,
    /// How long each card's price gets to render
    pub price_wait: Duration,
    /// Pause after navigation so client-side rendering can finish
    pub settle: Duration,
    pub headless: bool,
    pub output_dir: PathBuf,
    pub debug_dir: Option<PathBuf>,
    pub write_json: bool,
}
