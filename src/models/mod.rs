use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Placeholder written when a field with a fallback never rendered
pub const NOT_AVAILABLE: &str = "N/A";

/// Search input exactly as a front-end collected it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSearchInput {
    pub city: String,
    pub checkin: String,
    pub checkout: String,
    pub adults: String,
    pub children: String,
}

/// Validated search parameters.
///
/// Only [`crate::validation::validate`] builds one, so holding a `SearchQuery`
/// means the dates and guest counts have already been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub(crate) city: String,
    pub(crate) checkin: NaiveDate,
    pub(crate) checkout: NaiveDate,
    pub(crate) adults: u8,
    pub(crate) children: u8,
}

impl SearchQuery {
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn checkin(&self) -> NaiveDate {
        self.checkin
    }

    pub fn checkout(&self) -> NaiveDate {
        self.checkout
    }

    pub fn adults(&self) -> u8 {
        self.adults
    }

    pub fn children(&self) -> u8 {
        self.children
    }

    /// Base name of the output files for this query, e.g. `Paris_hotels_data`.
    /// The city is used verbatim.
    pub fn output_stem(&self) -> String {
        format!("{}_hotels_data", self.city)
    }
}

/// One hotel card from the results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub hotel: String,
    pub price: String,
    pub score: String,
    #[serde(rename = "avg review")]
    pub avg_review: String,
    #[serde(rename = "reviews count")]
    pub reviews_count: String,
}

impl HotelRecord {
    /// Column order of the tabular output
    pub const COLUMNS: [&'static str; 5] = ["hotel", "price", "score", "avg review", "reviews count"];
}

/// Records in page order
pub type ResultSet = Vec<HotelRecord>;

/// A card dropped because a field without a fallback was missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCard {
    /// Position of the card on the page, zero based
    pub index: usize,
    pub error: FieldError,
}

/// Outcome of one extraction pass over a results page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub cards_found: usize,
    pub records: ResultSet,
    pub skipped: Vec<SkippedCard>,
    /// Fields filled with their fallback value, across all records
    pub fallback_fields: usize,
}
