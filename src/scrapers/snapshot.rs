use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::error::ScrapeError;
use crate::models::{ExtractionReport, SearchQuery};
use crate::scrapers::extractor::ListingExtractor;
use crate::scrapers::traits::{CardElement, RenderedPage, ScraperTrait};
use crate::scrapers::types::{collapse_whitespace, CardFields};

/// A results page captured as static HTML
pub struct SnapshotPage {
    document: Html,
}

impl SnapshotPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

impl RenderedPage for SnapshotPage {
    type Card<'p> = SnapshotCard<'p>;

    fn cards<'p>(&'p self, selector: &str) -> Result<Vec<SnapshotCard<'p>>, ScrapeError> {
        let selector =
            Selector::parse(selector).map_err(|_| ScrapeError::InvalidSelector(selector.to_string()))?;

        Ok(self
            .document
            .select(&selector)
            .map(|element| SnapshotCard { element })
            .collect())
    }
}

pub struct SnapshotCard<'p> {
    element: ElementRef<'p>,
}

impl CardElement for SnapshotCard<'_> {
    // A snapshot never changes, so there is nothing to wait for.
    fn text_of(&self, selector: &str, _wait: Option<Duration>) -> Option<String> {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(err) => {
                debug!("Bad field selector {}: {:?}", selector, err);
                return None;
            }
        };

        self.element.select(&selector).next().map(inner_text)
    }
}

/// Text of `element` the way a browser's `innerText` reads it: text nodes
/// concatenated as-is, then whitespace runs collapsed and the ends trimmed
fn inner_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Extracts listings from a results page saved to disk instead of a live browser
pub struct HtmlFileScraper {
    path: PathBuf,
    extractor: ListingExtractor,
}

impl HtmlFileScraper {
    pub fn new(path: PathBuf, price_wait: Duration) -> Self {
        Self {
            path,
            extractor: ListingExtractor::new(CardFields::new(price_wait)),
        }
    }
}

#[async_trait]
impl ScraperTrait for HtmlFileScraper {
    async fn scrape(&self, query: &SearchQuery) -> Result<ExtractionReport, ScrapeError> {
        info!(
            "Reading saved results page {} for {}",
            self.path.display(),
            query.city()
        );

        let html = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ScrapeError::Snapshot {
                path: self.path.clone(),
                source,
            })?;
        debug!("Loaded {} bytes of HTML", html.len());

        let page = SnapshotPage::parse(&html);
        self.extractor.extract(&page)
    }

    fn source_name(&self) -> &'static str {
        "saved page"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawSearchInput;
    use crate::scrapers::fixtures::{card, results_page, CardFixture};
    use crate::scrapers::types::{AVG_REVIEW_SELECTOR, CARD_SELECTOR, REVIEWS_COUNT_SELECTOR, SCORE_SELECTOR};
    use crate::validation::{tests::clock_at, validate};

    fn single_card_page() -> SnapshotPage {
        SnapshotPage::parse(&results_page(&[card(CardFixture::complete(
            "Hotel Lutetia",
            "US$412",
            "8.9",
            "Fabulous",
            "1,234 reviews",
        ))]))
    }

    #[test]
    fn review_selectors_pick_the_nested_divs() {
        let page = single_card_page();
        let cards = page.cards(CARD_SELECTOR).unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].text_of(SCORE_SELECTOR, None).as_deref(), Some("8.9"));
        assert_eq!(cards[0].text_of(AVG_REVIEW_SELECTOR, None).as_deref(), Some("Fabulous"));
        assert_eq!(
            cards[0].text_of(REVIEWS_COUNT_SELECTOR, None).as_deref(),
            Some("1,234 reviews")
        );
    }

    #[test]
    fn lookups_stay_inside_their_card() {
        let page = SnapshotPage::parse(&results_page(&[
            card(CardFixture::complete("A", "", "9.0", "Superb", "10 reviews").without_price()),
            card(CardFixture::complete("B", "US$200", "8.0", "Very good", "20 reviews")),
        ]));
        let cards = page.cards(CARD_SELECTOR).unwrap();

        assert_eq!(cards[0].text_of(r#"span[data-testid="price-and-discounted-price"]"#, None), None);
        assert_eq!(
            cards[1].text_of(r#"span[data-testid="price-and-discounted-price"]"#, None).as_deref(),
            Some("US$200")
        );
    }

    #[test]
    fn split_text_nodes_are_not_padded() {
        let page = SnapshotPage::parse(
            r#"<div data-testid="property-card"><span data-testid="price-and-discounted-price">US$<!-- -->1,020</span></div>
               <div data-testid="property-card"><span data-testid="price-and-discounted-price">US$<span>95</span></span></div>"#,
        );
        let cards = page.cards(CARD_SELECTOR).unwrap();
        let price = r#"span[data-testid="price-and-discounted-price"]"#;

        assert_eq!(cards[0].text_of(price, None).as_deref(), Some("US$1,020"));
        assert_eq!(cards[1].text_of(price, None).as_deref(), Some("US$95"));
    }

    #[test]
    fn whitespace_runs_collapse_to_single_spaces() {
        let page = SnapshotPage::parse(
            r#"<div data-testid="property-card"><div data-testid="title">  Grand <b>Hotel</b>
                 Paris </div></div>"#,
        );
        let cards = page.cards(CARD_SELECTOR).unwrap();

        assert_eq!(
            cards[0].text_of(r#"div[data-testid="title"]"#, None).as_deref(),
            Some("Grand Hotel Paris")
        );
    }

    #[test]
    fn invalid_card_selector_is_an_error() {
        let page = single_card_page();
        assert!(matches!(page.cards("div[[["), Err(ScrapeError::InvalidSelector(_))));
    }

    #[tokio::test]
    async fn file_scraper_extracts_saved_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results_page.html");
        std::fs::write(
            &path,
            results_page(&[
                card(CardFixture::complete("A", "US$100", "9.0", "Superb", "10 reviews")),
                card(CardFixture::complete("B", "US$200", "8.0", "Very good", "20 reviews")),
            ]),
        )
        .unwrap();

        let raw = RawSearchInput {
            city: "Paris".to_string(),
            checkin: "2026-11-01".to_string(),
            checkout: "2026-11-03".to_string(),
            adults: "1".to_string(),
            children: "0".to_string(),
        };
        let query = validate(&raw, &clock_at("2026-10-19", (10, 0, 0))).unwrap();

        let scraper = HtmlFileScraper::new(path, Duration::from_secs(5));
        let report = scraper.scrape(&query).await.unwrap();

        assert_eq!(report.cards_found, 2);
        assert_eq!(report.records[1].hotel, "B");
    }

    #[tokio::test]
    async fn missing_snapshot_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let scraper = HtmlFileScraper::new(dir.path().join("nope.html"), Duration::from_secs(5));
        let raw = RawSearchInput {
            city: "Paris".to_string(),
            checkin: "2026-11-01".to_string(),
            checkout: "2026-11-03".to_string(),
            adults: "1".to_string(),
            children: "0".to_string(),
        };
        let query = validate(&raw, &clock_at("2026-10-19", (10, 0, 0))).unwrap();

        let err = scraper.scrape(&query).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Snapshot { .. }));
    }
}
