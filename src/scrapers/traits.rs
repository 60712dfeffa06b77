use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::models::{ExtractionReport, SearchQuery};

/// A fully rendered results page that can be queried for listing cards
pub trait RenderedPage {
    type Card<'p>: CardElement
    where
        Self: 'p;

    /// Every element matching `selector`, in document order
    fn cards<'p>(&'p self, selector: &str) -> Result<Vec<Self::Card<'p>>, ScrapeError>;
}

/// Handle to one listing card inside a rendered page
pub trait CardElement {
    /// Text of the first descendant matching `selector`.
    ///
    /// With `wait` set the lookup keeps polling until the element shows up or
    /// the wait elapses. `None` means the element was not there.
    fn text_of(&self, selector: &str, wait: Option<Duration>) -> Option<String>;
}

/// Common trait for hotel result sources
#[async_trait]
pub trait ScraperTrait: Send + Sync {
    /// Load the results page for `query` and extract every listing on it
    async fn scrape(&self, query: &SearchQuery) -> Result<ExtractionReport, ScrapeError>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}
