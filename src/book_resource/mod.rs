//! Engine capabilities for the [`Book`] and [`Author`] domain types.
//!
//! This module mirrors the pattern every representable type follows:
//! a [`Representable`] implementation naming the type, an [`Extractor`]
//! producing its flat property mapping, and a canned metadata constructor
//! the wiring layer registers.

use std::any::Any;
use std::sync::Arc;

use serde_json::json;

use crate::domain::{Author, Book};
use crate::framework::error::ExtractionError;
use crate::framework::extract::{ExtractedValue, Extractor, PropertyMap, Representable};
use crate::framework::metadata::{Metadata, RouteResourceMetadata, TypeKey};

/// Type key `Book` instances resolve under.
pub const BOOK_TYPE: TypeKey = TypeKey::from_static("book");

/// Type key `Author` instances resolve under.
pub const AUTHOR_TYPE: TypeKey = TypeKey::from_static("author");

impl Representable for Book {
    fn type_key(&self) -> TypeKey {
        BOOK_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Representable for Author {
    fn type_key(&self) -> TypeKey {
        AUTHOR_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Extractor registered under the name `"book"`.
///
/// Marks the author as an [`ExtractedValue::Object`], so the instance
/// strategy embeds it recursively instead of flattening it into the data.
#[derive(Debug, Default)]
pub struct BookExtractor;

impl Extractor for BookExtractor {
    fn extract(&self, instance: &dyn Representable) -> Result<PropertyMap, ExtractionError> {
        let book = instance
            .as_any()
            .downcast_ref::<Book>()
            .ok_or_else(|| ExtractionError::UnsupportedType(instance.type_key()))?;
        Ok(vec![
            ("id".to_owned(), ExtractedValue::Scalar(json!(book.id))),
            ("title".to_owned(), ExtractedValue::Scalar(json!(book.title))),
            ("year".to_owned(), ExtractedValue::Scalar(json!(book.year))),
            (
                "author".to_owned(),
                ExtractedValue::Object(Box::new(book.author.clone())),
            ),
        ])
    }
}

/// Extractor registered under the name `"author"`.
#[derive(Debug, Default)]
pub struct AuthorExtractor;

impl Extractor for AuthorExtractor {
    fn extract(&self, instance: &dyn Representable) -> Result<PropertyMap, ExtractionError> {
        let author = instance
            .as_any()
            .downcast_ref::<Author>()
            .ok_or_else(|| ExtractionError::UnsupportedType(instance.type_key()))?;
        Ok(vec![
            ("id".to_owned(), ExtractedValue::Scalar(json!(author.id))),
            ("name".to_owned(), ExtractedValue::Scalar(json!(author.name))),
        ])
    }
}

/// Route-resource metadata for [`Book`]: route `book`, identifier `id`.
pub fn book_metadata() -> Arc<dyn Metadata> {
    Arc::new(RouteResourceMetadata::new(BOOK_TYPE, "book", "book", "id"))
}

/// Route-resource metadata for [`Author`]: route `author`, identifier `id`.
pub fn author_metadata() -> Arc<dyn Metadata> {
    Arc::new(RouteResourceMetadata::new(
        AUTHOR_TYPE,
        "author",
        "author",
        "id",
    ))
}
