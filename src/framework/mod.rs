//! # The Resource Generation Engine
//!
//! This is the core of the system. It turns domain objects into HAL
//! resources driven entirely by declarative metadata.
//!
//! - **Role**: Separates *representation rules* (metadata + strategies)
//!   from the *plumbing* (registries, dispatch, recursion).
//! - **Key items**: [`ResourceGenerator`], [`MetadataMap`],
//!   [`ResourceStrategy`], [`HalResource`].

pub mod builtin;
pub mod error;
pub mod extract;
pub mod generator;
pub mod link;
pub mod metadata;
pub mod mock;
pub mod resource;
pub mod strategy;

pub use builtin::{RouteCollectionStrategy, RouteResourceStrategy, UrlCollectionStrategy};
pub use error::{ExtractionError, GeneratorError, LinkGenerationError, MetadataError};
pub use extract::{
    ExtractedValue, Extractor, ExtractorRegistry, PageInfo, Paginated, PropertyMap, Representable,
};
pub use generator::ResourceGenerator;
pub use link::{LinkGenerator, Params, RequestContext};
pub use metadata::{
    Metadata, MetadataKind, MetadataMap, PaginationPlacement, RouteCollectionMetadata,
    RouteResourceMetadata, TypeKey, UrlCollectionMetadata,
};
pub use resource::{Embedded, HalResource, Link, LinkValue};
pub use strategy::ResourceStrategy;
