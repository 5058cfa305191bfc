//! # Wiring & Configuration
//!
//! Engines don't exist in a vacuum. This layer assembles one:
//!
//! - **Role**: Acts as the configuration-time container that builds the
//!   metadata map, registers extractors and routes, and hands out a ready
//!   [`ResourceGenerator`].
//! - **Key items**: [`LibrarySystem`], [`config::load_from_json`],
//!   [`routes::RouteTable`], [`tracing::setup_tracing`].
//!
//! All mutation happens here, before generation traffic begins; the
//! generator the wiring produces is shared read-only afterwards.

pub mod config;
pub mod routes;
pub mod tracing;

use std::sync::Arc;

use crate::book_resource::{self, AuthorExtractor, BookExtractor};
use crate::framework::error::GeneratorError;
use crate::framework::extract::{ExtractorRegistry, Representable};
use crate::framework::generator::ResourceGenerator;
use crate::framework::link::RequestContext;
use crate::framework::metadata::MetadataMap;
use crate::framework::resource::HalResource;
use crate::shelf_resource;
use self::routes::RouteTable;

/// The wired demo system: book/author/book-page metadata, their
/// extractors, and a route table, assembled into one generator.
///
/// # Example
///
/// ```
/// use hal_engine::domain::{Author, Book};
/// use hal_engine::framework::RequestContext;
/// use hal_engine::lifecycle::LibrarySystem;
///
/// let system = LibrarySystem::new();
/// let book = Book::new(42, "Dune", 1965, Author::new(7, "Frank Herbert"));
/// let resource = system.generate(&book, &RequestContext::new()).unwrap();
/// assert_eq!(resource.self_link().unwrap().href(), "/book/42");
/// ```
pub struct LibrarySystem {
    generator: ResourceGenerator,
}

impl LibrarySystem {
    /// Builds the system: registers metadata for every demo type, the two
    /// extractors, and the demo routes, then constructs the generator.
    pub fn new() -> Self {
        let mut metadata = MetadataMap::new();
        metadata.add(book_resource::book_metadata());
        metadata.add(book_resource::author_metadata());
        metadata.add(shelf_resource::page_metadata());

        let mut extractors = ExtractorRegistry::new();
        extractors.register("book", Arc::new(BookExtractor));
        extractors.register("author", Arc::new(AuthorExtractor));

        let routes = RouteTable::new()
            .route("book", "/book/{id}")
            .route("author", "/author/{id}")
            .route("books", "/books");

        Self {
            generator: ResourceGenerator::new(metadata, extractors, Arc::new(routes)),
        }
    }

    /// Generates the resource representation for any registered instance.
    pub fn generate(
        &self,
        instance: &dyn Representable,
        ctx: &RequestContext,
    ) -> Result<HalResource, GeneratorError> {
        self.generator.from_object(instance, ctx)
    }

    /// The underlying generator, for tests that register extra strategies.
    pub fn generator_mut(&mut self) -> &mut ResourceGenerator {
        &mut self.generator
    }

    pub fn generator(&self) -> &ResourceGenerator {
        &self.generator
    }
}

impl Default for LibrarySystem {
    fn default() -> Self {
        Self::new()
    }
}
