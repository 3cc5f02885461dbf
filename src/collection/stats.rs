use crate::book::{Book, ReadingStatus};

/// Summary figures over a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingStats {
    pub total: usize,
    pub want_to_read: usize,
    pub reading: usize,
    pub completed: usize,
    /// Full page counts of completed books plus current pages of books in progress.
    pub pages_read: u64,
    /// Mean rating over rated, completed books.
    pub average_rating: Option<f32>,
}

impl ReadingStats {
    pub fn from_books<'a>(books: impl IntoIterator<Item = &'a Book>) -> Self {
        let mut stats = ReadingStats::default();
        let mut rating_sum = 0u32;
        let mut rated = 0u32;

        for book in books {
            stats.total += 1;
            match book.status {
                ReadingStatus::WantToRead => stats.want_to_read += 1,
                ReadingStatus::Reading => {
                    stats.reading += 1;
                    stats.pages_read += u64::from(book.current_page.unwrap_or(0));
                }
                ReadingStatus::Completed => {
                    stats.completed += 1;
                    let pages = book.known_page_count().or(book.current_page).unwrap_or(0);
                    stats.pages_read += u64::from(pages);
                    if let Some(rating) = book.rating {
                        rating_sum += u32::from(rating);
                        rated += 1;
                    }
                }
            }
        }

        if rated > 0 {
            stats.average_rating = Some(rating_sum as f32 / rated as f32);
        }
        stats
    }

    pub fn count(&self, status: ReadingStatus) -> usize {
        match status {
            ReadingStatus::WantToRead => self.want_to_read,
            ReadingStatus::Reading => self.reading,
            ReadingStatus::Completed => self.completed,
        }
    }
}
