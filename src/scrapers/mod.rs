pub mod browser;
pub mod extractor;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod snapshot;
pub mod traits;
pub mod types;

pub use browser::BookingBrowserScraper;
pub use snapshot::HtmlFileScraper;
pub use traits::ScraperTrait;
