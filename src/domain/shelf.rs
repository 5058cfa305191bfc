use serde::{Deserialize, Serialize};

use super::Book;

/// One page of the paginated book catalog.
///
/// Carries the members of the current page plus the pagination context the
/// collection strategies need (current page, page size, total count across
/// all pages).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub current_page: u64,
    pub page_size: u64,
    pub total_items: u64,
}

impl BookPage {
    pub fn new(books: Vec<Book>, current_page: u64, page_size: u64, total_items: u64) -> Self {
        Self {
            books,
            current_page,
            page_size,
            total_items,
        }
    }
}
