//! # Metadata & the MetadataMap
//!
//! Metadata is the declarative heart of the engine: one immutable value per
//! domain type describing how that type becomes a resource. The
//! [`MetadataMap`] resolves a runtime instance to its metadata, falling back
//! along the instance's declared ancestor chain.
//!
//! # Architecture Note
//! Why a trait instead of a closed enum? Dispatch is *open*: every metadata
//! value carries a stable [`MetadataKind`] discriminator, and the generator
//! maps discriminators to strategies. User code can define its own metadata
//! type + kind + strategy at configuration time without touching the three
//! built-ins. Strategies recover the concrete variant with
//! [`Metadata::as_any`] and treat a failed downcast as misregistration.

use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::framework::error::MetadataError;
use crate::framework::extract::Representable;
use crate::framework::link::Params;

/// Identifies a domain type inside the engine.
///
/// Registration and resolution compare keys, never Rust `TypeId`s, so a
/// single registered key can cover a whole family of types: any instance
/// listing that key among its [`ancestor_keys`](Representable::ancestor_keys)
/// resolves to the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    /// Creates a key from a static name (the common case for domain code).
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self(Cow::Owned(name.to_owned()))
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable discriminator for a metadata variant; the strategy table is keyed
/// by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetadataKind(pub &'static str);

impl MetadataKind {
    /// Route-based single resource ([`RouteResourceMetadata`]).
    pub const ROUTE_RESOURCE: Self = Self("route-resource");
    /// Route-based paginated collection ([`RouteCollectionMetadata`]).
    pub const ROUTE_COLLECTION: Self = Self("route-collection");
    /// Literal-URL paginated collection ([`UrlCollectionMetadata`]).
    pub const URL_COLLECTION: Self = Self("url-collection");
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Capability shared by all metadata variants: report the domain type the
/// metadata describes and the discriminator the generator dispatches on.
///
/// Every implementation is an immutable value constructed at configuration
/// time and shared read-only thereafter.
pub trait Metadata: fmt::Debug + Send + Sync {
    /// The domain type this metadata describes.
    fn represented_type(&self) -> TypeKey;

    /// The variant discriminator used for strategy dispatch.
    fn kind(&self) -> MetadataKind;

    /// Downcast hook for strategies that need the concrete variant.
    fn as_any(&self) -> &dyn Any;
}

/// Where a collection's "current page" indicator goes on generated links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationPlacement {
    /// Appended as a query-string argument (`/books?page=2`).
    Query,
    /// Substituted into the route's path template (`/books/page/2`).
    PathPlaceholder,
}

/// Metadata for a single resource addressed through a named route.
///
/// The identifier property is read from the extracted data, substituted for
/// `identifier_placeholder` in the route parameters, and (by default)
/// removed from the visible payload. Set
/// [`expose_identifier`](Self::expose_identifier) when the identifier should
/// stay in the data as well.
#[derive(Debug, Clone)]
pub struct RouteResourceMetadata {
    type_key: TypeKey,
    route: String,
    extractor: String,
    identifier_property: String,
    identifier_placeholder: String,
    route_params: Params,
    expose_identifier: bool,
}

impl RouteResourceMetadata {
    /// Creates metadata for `type_key`, served by `route`, extracted by the
    /// named extractor, identified by `identifier_property`. The route
    /// placeholder defaults to the property name.
    pub fn new(
        type_key: TypeKey,
        route: impl Into<String>,
        extractor: impl Into<String>,
        identifier_property: impl Into<String>,
    ) -> Self {
        let identifier_property = identifier_property.into();
        Self {
            type_key,
            route: route.into(),
            extractor: extractor.into(),
            identifier_placeholder: identifier_property.clone(),
            identifier_property,
            route_params: Params::new(),
            expose_identifier: false,
        }
    }

    /// Overrides the route placeholder the identifier is substituted for.
    pub fn with_identifier_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.identifier_placeholder = placeholder.into();
        self
    }

    /// Adds static route parameters merged into every generated link.
    pub fn with_route_params(mut self, params: Params) -> Self {
        self.route_params = params;
        self
    }

    /// Keeps the identifier property in the visible payload.
    pub fn expose_identifier(mut self) -> Self {
        self.expose_identifier = true;
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn extractor(&self) -> &str {
        &self.extractor
    }

    pub fn identifier_property(&self) -> &str {
        &self.identifier_property
    }

    pub fn identifier_placeholder(&self) -> &str {
        &self.identifier_placeholder
    }

    pub fn route_params(&self) -> &Params {
        &self.route_params
    }

    pub fn identifier_exposed(&self) -> bool {
        self.expose_identifier
    }
}

impl Metadata for RouteResourceMetadata {
    fn represented_type(&self) -> TypeKey {
        self.type_key.clone()
    }

    fn kind(&self) -> MetadataKind {
        MetadataKind::ROUTE_RESOURCE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Metadata for a paginated collection addressed through a named route.
#[derive(Debug, Clone)]
pub struct RouteCollectionMetadata {
    type_key: TypeKey,
    collection_rel: String,
    route: String,
    page_param: String,
    placement: PaginationPlacement,
    route_params: Params,
    query_args: Params,
}

impl RouteCollectionMetadata {
    pub fn new(
        type_key: TypeKey,
        collection_rel: impl Into<String>,
        route: impl Into<String>,
        page_param: impl Into<String>,
        placement: PaginationPlacement,
    ) -> Self {
        Self {
            type_key,
            collection_rel: collection_rel.into(),
            route: route.into(),
            page_param: page_param.into(),
            placement,
            route_params: Params::new(),
            query_args: Params::new(),
        }
    }

    /// Adds static route parameters merged into every page link.
    pub fn with_route_params(mut self, params: Params) -> Self {
        self.route_params = params;
        self
    }

    /// Adds static query-string arguments carried on every page link. On a
    /// key collision the pagination parameter wins.
    pub fn with_query_args(mut self, args: Params) -> Self {
        self.query_args = args;
        self
    }

    pub fn collection_rel(&self) -> &str {
        &self.collection_rel
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn page_param(&self) -> &str {
        &self.page_param
    }

    pub fn placement(&self) -> PaginationPlacement {
        self.placement
    }

    pub fn route_params(&self) -> &Params {
        &self.route_params
    }

    pub fn query_args(&self) -> &Params {
        &self.query_args
    }
}

impl Metadata for RouteCollectionMetadata {
    fn represented_type(&self) -> TypeKey {
        self.type_key.clone()
    }

    fn kind(&self) -> MetadataKind {
        MetadataKind::ROUTE_COLLECTION
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Metadata for a paginated collection addressed by a literal base URL,
/// bypassing route resolution entirely.
#[derive(Debug, Clone)]
pub struct UrlCollectionMetadata {
    type_key: TypeKey,
    collection_rel: String,
    base_url: String,
    page_param: String,
    placement: PaginationPlacement,
}

impl UrlCollectionMetadata {
    pub fn new(
        type_key: TypeKey,
        collection_rel: impl Into<String>,
        base_url: impl Into<String>,
        page_param: impl Into<String>,
        placement: PaginationPlacement,
    ) -> Self {
        Self {
            type_key,
            collection_rel: collection_rel.into(),
            base_url: base_url.into(),
            page_param: page_param.into(),
            placement,
        }
    }

    pub fn collection_rel(&self) -> &str {
        &self.collection_rel
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_param(&self) -> &str {
        &self.page_param
    }

    pub fn placement(&self) -> PaginationPlacement {
        self.placement
    }
}

impl Metadata for UrlCollectionMetadata {
    fn represented_type(&self) -> TypeKey {
        self.type_key.clone()
    }

    fn kind(&self) -> MetadataKind {
        MetadataKind::URL_COLLECTION
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registry mapping a [`TypeKey`] to its [`Metadata`].
///
/// Populated once at configuration time (`add` is `&mut self`), then shared
/// read-only with the generator. Resolution tries the exact runtime key
/// first, then the instance's declared ancestors most-derived first. That
/// fallback lets one entry for a base type cover every subtype that lists
/// it, with no per-subtype re-registration.
#[derive(Debug, Default)]
pub struct MetadataMap {
    entries: HashMap<TypeKey, Arc<dyn Metadata>>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers metadata keyed by its represented type. A later `add` for
    /// the same type overwrites the earlier entry.
    pub fn add(&mut self, metadata: Arc<dyn Metadata>) {
        let key = metadata.represented_type();
        debug!(type_key = %key, kind = %metadata.kind(), "metadata registered");
        self.entries.insert(key, metadata);
    }

    /// Exact-match lookup.
    pub fn get(&self, key: &TypeKey) -> Result<&Arc<dyn Metadata>, MetadataError> {
        self.entries
            .get(key)
            .ok_or_else(|| MetadataError::NotFound(key.clone()))
    }

    /// Resolves metadata for a runtime instance: exact type key first, then
    /// each declared ancestor in order.
    pub fn resolve_for(&self, instance: &dyn Representable) -> Result<Arc<dyn Metadata>, MetadataError> {
        let key = instance.type_key();
        if let Some(found) = self.entries.get(&key) {
            return Ok(Arc::clone(found));
        }
        for ancestor in instance.ancestor_keys() {
            if let Some(found) = self.entries.get(&ancestor) {
                debug!(type_key = %key, resolved_via = %ancestor, "metadata resolved via ancestor");
                return Ok(Arc::clone(found));
            }
        }
        Err(MetadataError::NotFound(key))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
