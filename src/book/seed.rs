use chrono::NaiveDate;

use super::{Book, ReadingStatus};

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The built-in sample shelf used when no collection has been persisted yet.
pub fn sample_books() -> Vec<Book> {
    vec![
        Book {
            id: "sample-hobbit".into(),
            title: "The Hobbit".into(),
            author: "J.R.R. Tolkien".into(),
            genre: Some("Fantasy".into()),
            publisher: Some("George Allen & Unwin".into()),
            language: Some("English".into()),
            isbn: Some("9780547928227".into()),
            notes: Some("Reread before the trilogy.".into()),
            publication_date: Some("1937-09-21".into()),
            page_count: Some(310),
            current_page: Some(310),
            cover_image: None,
            status: ReadingStatus::Completed,
            start_date: date(2024, 1, 3),
            end_date: date(2024, 1, 20),
            rating: Some(5),
        },
        Book {
            id: "sample-name-of-the-wind".into(),
            title: "The Name of the Wind".into(),
            author: "Patrick Rothfuss".into(),
            genre: Some("Fantasy".into()),
            publisher: Some("DAW Books".into()),
            language: Some("English".into()),
            isbn: Some("9780756404741".into()),
            notes: None,
            publication_date: Some("2007-03-27".into()),
            page_count: Some(662),
            current_page: Some(214),
            cover_image: None,
            status: ReadingStatus::Reading,
            start_date: date(2024, 2, 11),
            end_date: None,
            rating: None,
        },
        Book {
            id: "sample-sapiens".into(),
            title: "Sapiens".into(),
            author: "Yuval Noah Harari".into(),
            genre: Some("History".into()),
            publisher: Some("Harper".into()),
            language: Some("English".into()),
            isbn: Some("9780062316097".into()),
            notes: None,
            publication_date: Some("2011".into()),
            page_count: Some(443),
            current_page: None,
            cover_image: None,
            status: ReadingStatus::WantToRead,
            start_date: None,
            end_date: None,
            rating: None,
        },
        Book {
            id: "sample-pride-and-prejudice".into(),
            title: "Pride and Prejudice".into(),
            author: "Jane Austen".into(),
            genre: Some("Classic".into()),
            publisher: None,
            language: Some("English".into()),
            isbn: None,
            notes: None,
            publication_date: Some("1813-01-28".into()),
            page_count: None,
            current_page: None,
            cover_image: None,
            status: ReadingStatus::WantToRead,
            start_date: None,
            end_date: None,
            rating: None,
        },
    ]
}
