//! Live Booking.com scraping through headless Chrome.
//!
//! Launching Chrome, navigation and the session teardown in `Drop` need a real
//! browser and are not covered by unit tests; the card query logic is, through
//! the `ElementQuery` seam.

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::{ExtractionReport, SearchQuery};
use crate::scrapers::extractor::ListingExtractor;
use crate::scrapers::traits::{CardElement, RenderedPage, ScraperTrait};
use crate::scrapers::types::{collapse_whitespace, search_url, CardFields};

/// Headroom on top of the page-load timeout before Chrome is considered idle
const IDLE_MARGIN: Duration = Duration::from_secs(60);

/// Browser-based scraper for Booking.com search results using headless Chrome
pub struct BookingBrowserScraper {
    config: ScrapeConfig,
}

impl BookingBrowserScraper {
    pub fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ScraperTrait for BookingBrowserScraper {
    async fn scrape(&self, query: &SearchQuery) -> Result<ExtractionReport, ScrapeError> {
        let url = search_url(&self.config.base_url, query);
        let config = self.config.clone();

        // headless_chrome blocks, keep it off the runtime threads
        tokio::task::spawn_blocking(move || scrape_page(&config, &url)).await?
    }

    fn source_name(&self) -> &'static str {
        "Booking.com"
    }
}

/// One full scrape: launch, load, extract. The session is dropped, and Chrome
/// shut down, on every return path.
fn scrape_page(config: &ScrapeConfig, url: &str) -> Result<ExtractionReport, ScrapeError> {
    let session = BrowserSession::launch(config)?;
    session.load(url, config.page_load_timeout, config.settle)?;

    if let Some(dir) = &config.debug_dir {
        session.capture_debug(dir);
    }

    let page = ChromePage { tab: &session.tab };
    ListingExtractor::new(CardFields::new(config.price_wait)).extract(&page)
}

/// A Chrome process with the single tab used for one scrape
struct BrowserSession {
    // Dropping the browser kills the Chrome process
    _browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    fn launch(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        info!(
            "Launching {} Chrome...",
            if config.headless { "headless" } else { "windowed" }
        );

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((1366, 900)))
            .idle_browser_timeout(config.page_load_timeout + IDLE_MARGIN)
            .build()
            .map_err(|err| ScrapeError::Launch(err.to_string()))?;

        let browser = Browser::new(options).map_err(|err| ScrapeError::Launch(format!("{err:#}")))?;
        let tab = browser
            .new_tab()
            .map_err(|err| ScrapeError::Launch(format!("{err:#}")))?;

        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    fn load(&self, url: &str, timeout: Duration, settle: Duration) -> Result<(), ScrapeError> {
        info!("Opening search results page...");
        debug!("Navigating to {}", url);

        self.tab.set_default_timeout(timeout);
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|err| ScrapeError::PageLoad {
                url: url.to_string(),
                reason: format!("{err:#}"),
            })?;

        if !settle.is_zero() {
            debug!("Letting the page settle for {:?}", settle);
            thread::sleep(settle);
        }

        Ok(())
    }

    /// Save the rendered HTML and a screenshot. Failures are only logged.
    fn capture_debug(&self, dir: &Path) {
        if let Err(err) = self.try_capture_debug(dir) {
            warn!("Could not capture debug artifacts: {:#}", err);
        }
    }

    fn try_capture_debug(&self, dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        info!("Capturing page HTML for debugging...");
        let html = self.tab.evaluate("document.documentElement.outerHTML", false)?;
        if let Some(html) = html.value.as_ref().and_then(|value| value.as_str()) {
            let path = dir.join("results_page.html");
            std::fs::write(&path, html)?;
            info!("Saved page HTML to {} ({} bytes)", path.display(), html.len());
        }

        info!("Capturing screenshot...");
        let png = self.tab.capture_screenshot(
            Page::CaptureScreenshotFormatOption::Png,
            None,
            None,
            true,
        )?;
        let path = dir.join("results_page.png");
        std::fs::write(&path, png)?;
        info!("Saved screenshot to {}", path.display());

        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(err) = self.tab.close(true) {
            debug!("Closing tab failed: {:#}", err);
        }
        info!("Browser session closed");
    }
}

/// The live DOM of a loaded tab
struct ChromePage<'t> {
    tab: &'t Tab,
}

/// The two element queries card enumeration needs
trait ElementQuery {
    type Element;

    fn count_matches(&self, selector: &str) -> Result<usize, ScrapeError>;

    fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, ScrapeError>;
}

/// Count first: `find_elements` treats an empty match as an error, while a
/// page without cards is a valid, empty result.
fn query_cards<Q: ElementQuery>(page: &Q, selector: &str) -> Result<Vec<Q::Element>, ScrapeError> {
    let count = page.count_matches(selector)?;
    if count == 0 {
        debug!("No elements match {}", selector);
        return Ok(Vec::new());
    }

    let elements = page.find_all(selector)?;
    if elements.len() != count {
        debug!("Counted {} matches for {} but fetched {}", count, selector, elements.len());
    }
    Ok(elements)
}

/// `querySelectorAll(..).length` as returned by the DevTools protocol
fn match_count(value: Option<serde_json::Value>) -> usize {
    value.and_then(|value| value.as_u64()).unwrap_or(0) as usize
}

impl<'t> ElementQuery for ChromePage<'t> {
    type Element = Element<'t>;

    fn count_matches(&self, selector: &str) -> Result<usize, ScrapeError> {
        let literal = serde_json::to_string(selector).map_err(|err| ScrapeError::Query(err.to_string()))?;
        let result = self
            .tab
            .evaluate(&format!("document.querySelectorAll({literal}).length"), false)
            .map_err(|err| ScrapeError::Query(format!("{err:#}")))?;

        Ok(match_count(result.value))
    }

    fn find_all(&self, selector: &str) -> Result<Vec<Element<'t>>, ScrapeError> {
        self.tab
            .find_elements(selector)
            .map_err(|err| ScrapeError::Query(format!("{err:#}")))
    }
}

impl<'t> RenderedPage for ChromePage<'t> {
    type Card<'p> = Element<'t> where Self: 'p;

    fn cards<'p>(&'p self, selector: &str) -> Result<Vec<Element<'t>>, ScrapeError> {
        query_cards(self, selector)
    }
}

impl CardElement for Element<'_> {
    fn text_of(&self, selector: &str, wait: Option<Duration>) -> Option<String> {
        let element = match wait {
            Some(timeout) => self.wait_for_element_with_custom_timeout(selector, timeout),
            None => self.find_element(selector),
        };

        match element.and_then(|element| element.get_inner_text()) {
            Ok(text) => Some(collapse_whitespace(&text)),
            Err(err) => {
                debug!("No text for {}: {:#}", selector, err);
                None
            }
        }
    }
}
