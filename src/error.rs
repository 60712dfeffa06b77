use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Which of the two stay dates failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    CheckIn,
    CheckOut,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::CheckIn => f.write_str("check-in"),
            DateField::CheckOut => f.write_str("check-out"),
        }
    }
}

/// Rejected user input. Never reaches the scraper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} date must be a valid YYYY-MM-DD date that is not in the past")]
    InvalidDate(DateField),

    #[error("number of {field} must be an integer between {min} and {max}")]
    InvalidCount {
        field: &'static str,
        min: u8,
        max: u8,
    },
}

/// A single field that could not be read from one listing card
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("`{field}` did not render within {waited:?}")]
    Timeout {
        field: &'static str,
        waited: Duration,
    },

    #[error("`{field}` is missing from the card")]
    Missing { field: &'static str },
}

/// Failures that end a whole scrape run
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to load {url}: {reason}")]
    PageLoad { url: String, reason: String },

    #[error("invalid selector `{0}`")]
    InvalidSelector(String),

    #[error("failed to query page: {0}")]
    Query(String),

    #[error("failed to read page snapshot {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scrape task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}
