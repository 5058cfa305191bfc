//! Engine capabilities for the paginated [`BookPage`] collection type.
//!
//! Collections don't go through a named extractor: the collection
//! strategies read pagination state and membership straight from the
//! instance via [`Representable::as_paginated`].

use std::any::Any;
use std::sync::Arc;

use crate::domain::BookPage;
use crate::framework::extract::{PageInfo, Paginated, Representable};
use crate::framework::metadata::{
    Metadata, PaginationPlacement, RouteCollectionMetadata, TypeKey,
};

/// Type key `BookPage` instances resolve under.
pub const BOOK_PAGE_TYPE: TypeKey = TypeKey::from_static("book-page");

impl Representable for BookPage {
    fn type_key(&self) -> TypeKey {
        BOOK_PAGE_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_paginated(&self) -> Option<&dyn Paginated> {
        Some(self)
    }
}

impl Paginated for BookPage {
    fn page_info(&self) -> PageInfo {
        PageInfo::new(self.current_page, self.page_size, self.total_items)
    }

    fn members(&self) -> Vec<&dyn Representable> {
        self.books
            .iter()
            .map(|book| book as &dyn Representable)
            .collect()
    }
}

/// Route-collection metadata for [`BookPage`]: route `books`, members
/// embedded under the `book` relation, page carried as a query argument.
pub fn page_metadata() -> Arc<dyn Metadata> {
    Arc::new(RouteCollectionMetadata::new(
        BOOK_PAGE_TYPE,
        "book",
        "books",
        "page",
        PaginationPlacement::Query,
    ))
}
