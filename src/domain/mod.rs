//! Demo domain value types used by the wired
//! [`LibrarySystem`](crate::lifecycle::LibrarySystem) and the integration
//! tests.
//!
//! These are plain data structs; their engine capabilities
//! ([`Representable`](crate::framework::Representable) implementations and
//! extractors) live in [`crate::book_resource`] and
//! [`crate::shelf_resource`].

mod book;
mod shelf;

pub use book::{Author, Book};
pub use shelf::BookPage;
