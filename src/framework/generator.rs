//! # The Resource Generator
//!
//! [`ResourceGenerator`] is the orchestrator: it owns the [`MetadataMap`],
//! the strategy dispatch table, and handles to the external collaborators
//! (extractor registry and link generator), and exposes the single entry
//! point [`from_object`](ResourceGenerator::from_object).
//!
//! # Architecture Note
//! The generator adds nothing to a resource itself. It resolves metadata,
//! picks the strategy for the metadata's kind, and returns whatever the
//! strategy built — unmodified. All representation logic lives in
//! strategies, which may re-enter `from_object` for nested instances. That
//! re-entrancy is the whole embedding mechanism.
//!
//! **Concurrency model**: registration (`add_strategy`,
//! `add_deferred_strategy`) takes `&mut self` and belongs to the
//! configuration phase. Once configuration is complete, `from_object` is
//! `&self`, synchronous, and safe to call from many threads at once —
//! every registry it touches is read-only by then. Callers must finish
//! registration before generation traffic begins; the engine enforces this
//! through the borrow checker rather than a runtime lock.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::framework::builtin::{
    RouteCollectionStrategy, RouteResourceStrategy, UrlCollectionStrategy,
};
use crate::framework::error::GeneratorError;
use crate::framework::extract::{ExtractorRegistry, Representable};
use crate::framework::link::{LinkGenerator, RequestContext};
use crate::framework::metadata::{MetadataKind, MetadataMap};
use crate::framework::resource::HalResource;
use crate::framework::strategy::ResourceStrategy;

/// A registered strategy: either a ready instance, or a deferred factory
/// resolved lazily on first dispatch.
enum StrategyEntry {
    Ready(Arc<dyn ResourceStrategy>),
    Deferred {
        cell: OnceLock<Arc<dyn ResourceStrategy>>,
        factory: Box<dyn Fn() -> Arc<dyn ResourceStrategy> + Send + Sync>,
    },
}

impl StrategyEntry {
    fn resolve(&self) -> Arc<dyn ResourceStrategy> {
        match self {
            Self::Ready(strategy) => Arc::clone(strategy),
            Self::Deferred { cell, factory } => Arc::clone(cell.get_or_init(|| factory())),
        }
    }
}

/// The resource generation engine.
///
/// Construct with a populated [`MetadataMap`], an [`ExtractorRegistry`],
/// and a [`LinkGenerator`]; the three built-in strategies are pre-registered
/// for their metadata kinds.
pub struct ResourceGenerator {
    metadata: MetadataMap,
    strategies: HashMap<MetadataKind, StrategyEntry>,
    extractors: ExtractorRegistry,
    links: Arc<dyn LinkGenerator>,
}

impl ResourceGenerator {
    pub fn new(
        metadata: MetadataMap,
        extractors: ExtractorRegistry,
        links: Arc<dyn LinkGenerator>,
    ) -> Self {
        let mut strategies = HashMap::new();
        strategies.insert(
            MetadataKind::ROUTE_RESOURCE,
            StrategyEntry::Ready(Arc::new(RouteResourceStrategy)),
        );
        strategies.insert(
            MetadataKind::ROUTE_COLLECTION,
            StrategyEntry::Ready(Arc::new(RouteCollectionStrategy)),
        );
        strategies.insert(
            MetadataKind::URL_COLLECTION,
            StrategyEntry::Ready(Arc::new(UrlCollectionStrategy)),
        );
        Self {
            metadata,
            strategies,
            extractors,
            links,
        }
    }

    /// Registers (or replaces) the strategy dispatched for a metadata kind.
    /// Subsequent `from_object` calls use the new strategy; resources
    /// already produced are unaffected.
    pub fn add_strategy(&mut self, kind: MetadataKind, strategy: Arc<dyn ResourceStrategy>) {
        debug!(%kind, "strategy registered");
        self.strategies.insert(kind, StrategyEntry::Ready(strategy));
    }

    /// Registers a strategy factory resolved lazily on first dispatch for
    /// the kind. Useful when constructing the strategy is expensive or must
    /// wait for late-bound configuration.
    pub fn add_deferred_strategy(
        &mut self,
        kind: MetadataKind,
        factory: impl Fn() -> Arc<dyn ResourceStrategy> + Send + Sync + 'static,
    ) {
        debug!(%kind, "deferred strategy registered");
        self.strategies.insert(
            kind,
            StrategyEntry::Deferred {
                cell: OnceLock::new(),
                factory: Box::new(factory),
            },
        );
    }

    /// Generates the resource representation for `instance`.
    ///
    /// Resolution order: metadata for the instance's type (exact key, then
    /// declared ancestors), then the strategy for the metadata's kind, then
    /// delegation. Any failure from the strategy or its collaborators
    /// propagates unmodified; no partial resource is ever returned.
    ///
    /// Strategies call back into this method for nested instances, so
    /// recursion depth is bounded only by the shape of the domain-object
    /// graph. Cyclic object graphs are the caller's responsibility to
    /// avoid.
    pub fn from_object(
        &self,
        instance: &dyn Representable,
        ctx: &RequestContext,
    ) -> Result<HalResource, GeneratorError> {
        let type_key = instance.type_key();
        let metadata = self.metadata.resolve_for(instance).map_err(|source| {
            warn!(%type_key, "no metadata resolvable for object");
            GeneratorError::UnknownObjectType {
                type_key: type_key.clone(),
                source,
            }
        })?;
        let kind = metadata.kind();
        debug!(%type_key, %kind, "generating resource");
        let strategy = self
            .strategies
            .get(&kind)
            .ok_or(GeneratorError::UnexpectedMetadataType(kind))?
            .resolve();
        strategy.create_resource(instance, metadata.as_ref(), self, ctx)
    }

    /// The metadata registry backing this generator.
    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    /// The extractor registry strategies read from.
    pub fn extractors(&self) -> &ExtractorRegistry {
        &self.extractors
    }

    /// The link generator strategies build route URIs with.
    pub fn link_generator(&self) -> &dyn LinkGenerator {
        self.links.as_ref()
    }
}
