use std::time::Duration;

use crate::error::FieldError;
use crate::models::{SearchQuery, NOT_AVAILABLE};
use crate::scrapers::traits::CardElement;

pub const CARD_SELECTOR: &str = r#"div[data-testid="property-card"]"#;
pub const TITLE_SELECTOR: &str = r#"div[data-testid="title"]"#;
pub const PRICE_SELECTOR: &str = r#"span[data-testid="price-and-discounted-price"]"#;
pub const SCORE_SELECTOR: &str = r#"div[data-testid="review-score"] > div:nth-of-type(1)"#;
pub const AVG_REVIEW_SELECTOR: &str =
    r#"div[data-testid="review-score"] > div:nth-of-type(2) > div:nth-of-type(1)"#;
pub const REVIEWS_COUNT_SELECTOR: &str =
    r#"div[data-testid="review-score"] > div:nth-of-type(2) > div:nth-of-type(2)"#;

/// How to read one field out of a listing card
#[derive(Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub selector: &'static str,
    /// Poll this long for the element before giving up
    pub wait: Option<Duration>,
    /// Value substituted when the element is absent; `None` makes the field required
    pub fallback: Option<&'static str>,
    pub normalize: fn(&str) -> String,
}

/// Text read for a field, or the fallback that replaced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Found(String),
    Fallback { value: String, cause: FieldError },
}

impl FieldValue {
    pub fn into_value(self) -> String {
        match self {
            FieldValue::Found(value) | FieldValue::Fallback { value, .. } => value,
        }
    }
}

impl FieldSpec {
    pub fn required(name: &'static str, selector: &'static str) -> Self {
        Self {
            name,
            selector,
            wait: None,
            fallback: None,
            normalize: trimmed,
        }
    }

    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = Some(wait);
        self
    }

    pub fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_normalizer(mut self, normalize: fn(&str) -> String) -> Self {
        self.normalize = normalize;
        self
    }

    /// Read this field from `card`.
    ///
    /// Empty text counts as absent. An absent field resolves to the fallback
    /// when one is set and to an error otherwise.
    pub fn read<C: CardElement + ?Sized>(&self, card: &C) -> Result<FieldValue, FieldError> {
        let value = card
            .text_of(self.selector, self.wait)
            .map(|text| (self.normalize)(&text))
            .filter(|text| !text.is_empty());

        match (value, self.fallback) {
            (Some(value), _) => Ok(FieldValue::Found(value)),
            (None, Some(fallback)) => Ok(FieldValue::Fallback {
                value: fallback.to_string(),
                cause: self.absence(),
            }),
            (None, None) => Err(self.absence()),
        }
    }

    fn absence(&self) -> FieldError {
        match self.wait {
            Some(waited) => FieldError::Timeout {
                field: self.name,
                waited,
            },
            None => FieldError::Missing { field: self.name },
        }
    }
}

/// Field layout of a results-page card
#[derive(Clone)]
pub struct CardFields {
    pub hotel: FieldSpec,
    pub price: FieldSpec,
    pub score: FieldSpec,
    pub avg_review: FieldSpec,
    pub reviews_count: FieldSpec,
}

impl CardFields {
    /// Booking.com card layout. Prices render late, so only they get a wait.
    pub fn new(price_wait: Duration) -> Self {
        Self {
            hotel: FieldSpec::required("hotel", TITLE_SELECTOR),
            price: FieldSpec::required("price", PRICE_SELECTOR)
                .with_wait(price_wait)
                .with_fallback(NOT_AVAILABLE),
            score: FieldSpec::required("score", SCORE_SELECTOR),
            avg_review: FieldSpec::required("avg review", AVG_REVIEW_SELECTOR),
            reviews_count: FieldSpec::required("reviews count", REVIEWS_COUNT_SELECTOR)
                .with_normalizer(first_token),
        }
    }
}

pub fn trimmed(raw: &str) -> String {
    raw.trim().to_string()
}

/// Whitespace runs become one space, ends are trimmed
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// "1,234 reviews" -> "1,234"
pub fn first_token(raw: &str) -> String {
    raw.split_whitespace().next().unwrap_or_default().to_string()
}

/// Search results URL for `query`. Values are interpolated as-is, without
/// percent-encoding.
pub fn search_url(base_url: &str, query: &SearchQuery) -> String {
    let city = query.city();
    format!(
        "{base_url}?checkin={checkin}&checkout={checkout}&selected_currency=USD\
         &ss={city}&ssne={city}&ssne_untouched={city}&lang=en-us&sb=1&src_elem=sb\
         &src=searchresults&dest_type=city&group_adults={adults}&no_rooms=1\
         &group_children={children}&sb_travel_purpose=leisure",
        checkin = query.checkin(),
        checkout = query.checkout(),
        adults = query.adults(),
        children = query.children(),
    )
}
