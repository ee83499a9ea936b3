//! Raw request payloads and their validated forms

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::model::author::{MAX_COUNTRY_LENGTH, MIN_COUNTRY_LENGTH};
use crate::model::{AuthorId, BookUpdate, NewAuthor, NewBook, MAX_ISBN_LENGTH};

use super::errors::{ValidationError, ValidationResult};
use super::rules::{
    calendar_date, is_set, length_of, non_empty_text, optional_text, positive_integer,
    positive_number,
};

/// Body of a book creation request, as received
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookPayload {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub author_name: Option<Value>,
    #[serde(default)]
    pub author_country: Option<Value>,
    #[serde(default)]
    pub author_birth_date: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub isbn: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
    #[serde(default)]
    pub number_of_pages: Option<Value>,
    #[serde(default)]
    pub publisher: Option<Value>,
}

/// Title and author of a book being created.
///
/// Checked first: the author has to be resolved before the remaining
/// fields are looked at.
#[derive(Debug, Clone, PartialEq)]
pub struct BookIdentity {
    pub title: String,
    pub author: NewAuthor,
}

/// Remaining fields of a book being created
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetails {
    pub price: f64,
    pub isbn: String,
    pub language: Option<String>,
    pub number_of_pages: u32,
    pub publisher: String,
}

impl BookDetails {
    /// Assemble the record to insert once the author is known
    pub fn into_new_book(self, title: String, author: AuthorId) -> NewBook {
        NewBook {
            title,
            author,
            price: self.price,
            isbn: self.isbn,
            language: self.language,
            number_of_pages: self.number_of_pages,
            publisher: self.publisher,
        }
    }
}

impl CreateBookPayload {
    /// Title, author name, author country and author birth date, in that order
    pub fn validate_identity(&self) -> ValidationResult<BookIdentity> {
        let title = non_empty_text(self.title.as_ref()).ok_or(ValidationError::MissingTitle)?;

        let author_name = non_empty_text(self.author_name.as_ref())
            .ok_or(ValidationError::MissingAuthorName)?;

        let country = self.validate_country()?;

        let birth_date: NaiveDate = calendar_date(self.author_birth_date.as_ref())
            .ok_or(ValidationError::InvalidAuthorBirthDate)?;

        Ok(BookIdentity {
            title: title.to_string(),
            author: NewAuthor {
                name: author_name.to_string(),
                country,
                birth_date,
            },
        })
    }

    fn validate_country(&self) -> ValidationResult<Option<String>> {
        if !is_set(self.author_country.as_ref()) {
            return Ok(None);
        }

        let country = self
            .author_country
            .as_ref()
            .and_then(Value::as_str)
            .ok_or(ValidationError::InvalidAuthorCountry)?;

        let len = country.chars().count();
        if !(MIN_COUNTRY_LENGTH..=MAX_COUNTRY_LENGTH).contains(&len) {
            return Err(ValidationError::InvalidAuthorCountry);
        }

        Ok(Some(country.to_string()))
    }

    /// ISBN to check for duplicates, when it is usable as a lookup key
    pub fn isbn_text(&self) -> Option<&str> {
        non_empty_text(self.isbn.as_ref())
    }

    /// Price, ISBN, page count and publisher, in that order.
    ///
    /// The ISBN length limit is checked before its presence, so an overlong
    /// non-text ISBN reports the length problem.
    pub fn validate_details(&self) -> ValidationResult<BookDetails> {
        let price = positive_number(self.price.as_ref()).ok_or(ValidationError::InvalidPrice)?;

        if length_of(self.isbn.as_ref()).is_some_and(|len| len > MAX_ISBN_LENGTH) {
            return Err(ValidationError::IsbnTooLong);
        }
        let isbn = non_empty_text(self.isbn.as_ref()).ok_or(ValidationError::MissingIsbn)?;

        let number_of_pages = positive_integer(self.number_of_pages.as_ref())
            .ok_or(ValidationError::InvalidNumberOfPages)?;

        let publisher =
            non_empty_text(self.publisher.as_ref()).ok_or(ValidationError::MissingPublisher)?;

        Ok(BookDetails {
            price,
            isbn: isbn.to_string(),
            language: optional_text(self.language.as_ref()),
            number_of_pages,
            publisher: publisher.to_string(),
        })
    }
}

/// Body of a book update request, as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookPayload {
    #[serde(default)]
    pub isbn: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
    #[serde(default)]
    pub publisher: Option<Value>,
}

impl UpdateBookPayload {
    /// ISBN of the book to update
    pub fn target_isbn(&self) -> ValidationResult<&str> {
        non_empty_text(self.isbn.as_ref()).ok_or(ValidationError::MissingTargetIsbn)
    }

    /// Replacement values for every mutable field.
    ///
    /// An omitted language becomes `None`, clearing the stored value.
    pub fn validate_update(&self) -> ValidationResult<BookUpdate> {
        let title = non_empty_text(self.title.as_ref())
            .ok_or(ValidationError::InvalidUpdatedTitle)?;

        let price =
            positive_number(self.price.as_ref()).ok_or(ValidationError::InvalidUpdatedPrice)?;

        let publisher = non_empty_text(self.publisher.as_ref())
            .ok_or(ValidationError::InvalidUpdatedPublisher)?;

        Ok(BookUpdate {
            title: title.to_string(),
            price,
            language: optional_text(self.language.as_ref()),
            publisher: publisher.to_string(),
        })
    }
}

/// The `isbn` query parameter of a lookup or delete.
///
/// Exactly one non-empty value must be given.
pub fn isbn_from_query(params: &[(String, String)]) -> ValidationResult<&str> {
    let mut values = params
        .iter()
        .filter(|(key, _)| key == "isbn")
        .map(|(_, value)| value.as_str());

    match (values.next(), values.next()) {
        (Some(isbn), None) if !isbn.is_empty() => Ok(isbn),
        _ => Err(ValidationError::MissingTargetIsbn),
    }
}
