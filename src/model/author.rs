//! # Author Record
//!
//! Authors are created on demand when the first book naming them is
//! stored, and removed when their last book is deleted.

use std::fmt;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Youngest age, in whole years, an author may have on record.
pub const MINIMUM_AUTHOR_AGE_YEARS: u32 = 4;

/// Shortest country name an author may carry.
pub const MIN_COUNTRY_LENGTH: usize = 4;

/// Longest country name an author may carry.
pub const MAX_COUNTRY_LENGTH: usize = 56;

/// Store-assigned author identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub Uuid);

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,

    /// Lookup key when a new book names this author
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    pub birth_date: NaiveDate,
}

impl Author {
    /// Projection used when a book listing resolves its author reference
    pub fn summary(&self) -> AuthorSummary {
        AuthorSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// An author that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthor {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    pub birth_date: NaiveDate,
}

impl NewAuthor {
    /// Record-level constraints checked right before the author is written.
    ///
    /// `today` is passed in so the age rule is a date-only comparison that
    /// tests can pin.
    pub fn check_schema(&self, today: NaiveDate) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("author name must not be empty".to_string());
        }

        if let Some(country) = &self.country {
            let len = country.chars().count();
            if !(MIN_COUNTRY_LENGTH..=MAX_COUNTRY_LENGTH).contains(&len) {
                return Err(format!(
                    "author country must be between {} and {} characters, got {}",
                    MIN_COUNTRY_LENGTH, MAX_COUNTRY_LENGTH, len
                ));
            }
        }

        let latest_birth_date = today
            .checked_sub_months(Months::new(MINIMUM_AUTHOR_AGE_YEARS * 12))
            .ok_or_else(|| "invalid reference date".to_string())?;
        if self.birth_date > latest_birth_date {
            return Err(format!(
                "invalid birth date {}: author must be at least {} years old",
                self.birth_date, MINIMUM_AUTHOR_AGE_YEARS
            ));
        }

        Ok(())
    }
}

/// Author reference as rendered inside a book listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: AuthorId,
    pub name: String,
}
