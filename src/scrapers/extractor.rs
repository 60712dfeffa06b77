use tracing::{debug, info, warn};

use crate::error::{FieldError, ScrapeError};
use crate::models::{ExtractionReport, HotelRecord, SkippedCard};
use crate::scrapers::traits::{CardElement, RenderedPage};
use crate::scrapers::types::{CardFields, FieldSpec, FieldValue, CARD_SELECTOR};

/// Pulls hotel records out of the property cards of a rendered results page
pub struct ListingExtractor {
    card_selector: &'static str,
    fields: CardFields,
}

impl ListingExtractor {
    pub fn new(fields: CardFields) -> Self {
        Self {
            card_selector: CARD_SELECTOR,
            fields,
        }
    }

    /// Extract every card on `page`, in document order.
    ///
    /// Cards are independent: a card missing a required field is logged and
    /// listed in [`ExtractionReport::skipped`], the rest are still extracted.
    pub fn extract<P: RenderedPage>(&self, page: &P) -> Result<ExtractionReport, ScrapeError> {
        let cards = page.cards(self.card_selector)?;
        info!("Found {} property cards", cards.len());

        let mut report = ExtractionReport {
            cards_found: cards.len(),
            ..Default::default()
        };

        for (index, card) in cards.iter().enumerate() {
            match self.extract_card(card, &mut report.fallback_fields) {
                Ok(record) => {
                    debug!("Card {}: {}", index, record.hotel);
                    report.records.push(record);
                }
                Err(error) => {
                    warn!("Skipping card {}: {}", index, error);
                    report.skipped.push(SkippedCard { index, error });
                }
            }
        }

        info!(
            "Extracted {} hotels ({} skipped, {} fields defaulted)",
            report.records.len(),
            report.skipped.len(),
            report.fallback_fields
        );

        Ok(report)
    }

    fn extract_card<C: CardElement>(&self, card: &C, fallbacks: &mut usize) -> Result<HotelRecord, FieldError> {
        let hotel = self.fields.hotel.read(card)?.into_value();

        let mut field = |spec: &FieldSpec| -> Result<String, FieldError> {
            match spec.read(card)? {
                FieldValue::Found(value) => Ok(value),
                FieldValue::Fallback { value, cause } => {
                    warn!("Error extracting {} for hotel '{}': {}", spec.name, hotel, cause);
                    *fallbacks += 1;
                    Ok(value)
                }
            }
        };

        let price = field(&self.fields.price)?;
        let score = field(&self.fields.score)?;
        let avg_review = field(&self.fields.avg_review)?;
        let reviews_count = field(&self.fields.reviews_count)?;

        Ok(HotelRecord {
            hotel,
            price,
            score,
            avg_review,
            reviews_count,
        })
    }
}
