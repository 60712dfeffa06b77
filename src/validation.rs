use std::ops::RangeInclusive;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{DateField, ValidationError};
use crate::models::{RawSearchInput, SearchQuery};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const ADULTS: RangeInclusive<u8> = 1..=2;
pub const CHILDREN: RangeInclusive<u8> = 0..=2;

/// Source of "now" for the not-in-the-past check
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Turn raw front-end input into a [`SearchQuery`].
///
/// Fields are checked in order check-in, check-out, adults, children and the
/// first failure is returned.
pub fn validate(input: &RawSearchInput, clock: &impl Clock) -> Result<SearchQuery, ValidationError> {
    let now = clock.now();

    let checkin = parse_date(&input.checkin, DateField::CheckIn, now)?;
    let checkout = parse_date(&input.checkout, DateField::CheckOut, now)?;
    let adults = parse_count(&input.adults, "adults", ADULTS)?;
    let children = parse_count(&input.children, "children", CHILDREN)?;

    Ok(SearchQuery {
        city: input.city.trim().to_string(),
        checkin,
        checkout,
        adults,
        children,
    })
}

fn parse_date(raw: &str, field: DateField, now: NaiveDateTime) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(field))?;

    // Compared at midnight: today is already in the past once the day has started.
    if date.and_time(NaiveTime::MIN) < now {
        return Err(ValidationError::InvalidDate(field));
    }

    Ok(date)
}

fn parse_count(raw: &str, field: &'static str, range: RangeInclusive<u8>) -> Result<u8, ValidationError> {
    let invalid = || ValidationError::InvalidCount {
        field,
        min: *range.start(),
        max: *range.end(),
    };

    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    raw.parse::<u8>()
        .ok()
        .filter(|n| range.contains(n))
        .ok_or_else(invalid)
}
