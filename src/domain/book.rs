use serde::{Deserialize, Serialize};

/// A book in the catalog.
///
/// # Engine Note
/// `Book` is registered with route-resource metadata; its nested
/// [`Author`] has its own metadata entry, so book generation embeds the
/// author as a sub-resource instead of flattening it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub year: u32,
    pub author: Author,
}

impl Book {
    pub fn new(id: u64, title: impl Into<String>, year: u32, author: Author) -> Self {
        Self {
            id,
            title: title.into(),
            year,
            author,
        }
    }
}

/// The author of a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
}

impl Author {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
