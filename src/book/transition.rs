//! Status transition derivation.
//!
//! These rules are the only place reading dates and status are derived:
//!
//! - entering `reading` stamps `start_date` with today unless already set
//! - entering `completed` stamps `end_date` with today unless already set;
//!   an explicitly supplied end date always wins
//! - progress that reaches the page count promotes the book to `completed`,
//!   clamps `current_page` to the page count and records today as the
//!   finish date
//! - progress below the page count on a completed book reopens it as
//!   `reading` and clears the finish date
//!
//! All functions take "today" as an argument so they stay pure.

use chrono::NaiveDate;

use super::{Book, ReadingStatus};

/// Move `book` to `status`, stamping dates as the status requires.
pub fn apply_status(
    book: &mut Book,
    status: ReadingStatus,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) {
    match status {
        ReadingStatus::Reading => {
            book.start_date.get_or_insert(today);
        }
        ReadingStatus::Completed => match end_date {
            Some(explicit) => book.end_date = Some(explicit),
            None => {
                book.end_date.get_or_insert(today);
            }
        },
        ReadingStatus::WantToRead => {}
    }
    book.status = status;
}

/// Record that the reader is on `current_page`.
///
/// The book moves to `reading` (stamping `start_date` if unset), unless the
/// page reaches a known page count, in which case it is completed today.
/// A completed book that drops below the page count is being reread, so its
/// old `end_date` no longer applies.
pub fn apply_progress(book: &mut Book, current_page: u32, today: NaiveDate) {
    book.current_page = Some(current_page);
    if promote_if_finished(book, Some(today), today) {
        return;
    }
    if book.status == ReadingStatus::Completed {
        book.end_date = None;
    }
    if book.status != ReadingStatus::Reading {
        apply_status(book, ReadingStatus::Reading, None, today);
    }
}

/// Derive dates and status for a freshly built record.
///
/// Used when a book enters the collection with caller-chosen status and
/// progress; explicit dates on the record are kept.
pub fn reconcile(book: &mut Book, today: NaiveDate) {
    let explicit_end = book.end_date;
    apply_status(book, book.status, explicit_end, today);
    promote_if_finished(book, explicit_end, today);
}

/// Complete the book when its progress has reached the page count.
///
/// A book that is already completed keeps its `end_date`; otherwise the
/// finish date is `finished_on`, falling back to any existing date or today.
fn promote_if_finished(
    book: &mut Book,
    finished_on: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    let (Some(current), Some(total)) = (book.current_page, book.known_page_count()) else {
        return false;
    };
    if current < total {
        return false;
    }

    book.current_page = Some(total);
    book.start_date.get_or_insert(today);
    if book.status != ReadingStatus::Completed {
        apply_status(book, ReadingStatus::Completed, finished_on, today);
    }
    true
}
