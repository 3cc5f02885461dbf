//! Book records - the single entity of a reading collection.
//!
//! A [`Book`] carries catalog metadata (title, author, publisher, ...) together
//! with reading state: a [`ReadingStatus`], page progress, start/end dates and
//! an optional rating. Callers build new books from [`BookFormData`]; the
//! collection store assigns ids and derives dates through [`transition`].
//!
//! ## Example
//!
//! ```ignore
//! use book_tracker::{BookFormData, ReadingStatus};
//!
//! let data = BookFormData::new("Dune", "Frank Herbert")
//!     .with_page_count(412)
//!     .with_status(ReadingStatus::Reading);
//! let book = store.add(data)?;
//! ```

mod id;
mod seed;
pub mod transition;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use id::{IdGenerator, UuidGenerator};
pub use seed::sample_books;

/// Where a book sits on the reader's shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadingStatus {
    #[default]
    WantToRead,
    Reading,
    Completed,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [
        ReadingStatus::WantToRead,
        ReadingStatus::Reading,
        ReadingStatus::Completed,
    ];

    /// The camelCase name used in persisted data.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "wantToRead",
            ReadingStatus::Reading => "reading",
            ReadingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown reading status: {0:?} (expected wantToRead, reading or completed)")]
pub struct ParseStatusError(String);

impl FromStr for ReadingStatus {
    type Err = ParseStatusError;

    /// Accepts the persisted camelCase names as well as kebab/snake spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "wanttoread" | "want" => Ok(ReadingStatus::WantToRead),
            "reading" => Ok(ReadingStatus::Reading),
            "completed" | "done" | "read" => Ok(ReadingStatus::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// One book's full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Free-form publication date as entered by the reader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    /// URI of the cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub status: ReadingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// 1 to 5 stars; meaningful once the book is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl Book {
    /// Build a record from form data under the given id.
    ///
    /// No dates are derived here; see [`transition::reconcile`].
    pub fn from_form(id: impl Into<String>, data: BookFormData) -> Self {
        Book {
            id: id.into(),
            title: data.title,
            author: data.author,
            genre: data.genre,
            publisher: data.publisher,
            language: data.language,
            isbn: data.isbn,
            notes: data.notes,
            publication_date: data.publication_date,
            page_count: data.page_count,
            current_page: data.current_page,
            cover_image: data.cover_image,
            status: data.status.unwrap_or_default(),
            start_date: data.start_date,
            end_date: data.end_date,
            rating: data.rating,
        }
    }

    /// Page count, treating zero as "unknown".
    pub fn known_page_count(&self) -> Option<u32> {
        self.page_count.filter(|total| *total > 0)
    }

    /// Reading progress as a whole percentage (0-100).
    ///
    /// Completed books always report 100. Otherwise both the current page
    /// and a non-zero page count must be known.
    pub fn progress_percent(&self) -> Option<u8> {
        if self.status == ReadingStatus::Completed {
            return Some(100);
        }
        let total = self.known_page_count()?;
        let current = self.current_page?.min(total);
        Some((u64::from(current) * 100 / u64::from(total)) as u8)
    }

    pub fn is_completed(&self) -> bool {
        self.status == ReadingStatus::Completed
    }
}

/// Caller-supplied data for adding a book.
///
/// `id` is normally left empty so the store generates one. `status` defaults
/// to [`ReadingStatus::WantToRead`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookFormData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReadingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl BookFormData {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        BookFormData {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_status(mut self, status: ReadingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = Some(page_count);
        self
    }

    pub fn with_current_page(mut self, current_page: u32) -> Self {
        self.current_page = Some(current_page);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }
}
