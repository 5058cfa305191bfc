//! # The Strategy Seam
//!
//! A [`ResourceStrategy`] knows how to turn one (instance, metadata) pair
//! into a [`HalResource`]. The generator keeps a table of strategies keyed
//! by [`MetadataKind`](crate::framework::MetadataKind) and delegates every
//! generation call to exactly one of them.
//!
//! # Architecture Note
//! The strategy receives the generator itself as an argument. That is what
//! makes embedding recursive: a strategy that finds a nested domain object
//! in its extracted data simply calls
//! [`ResourceGenerator::from_object`](crate::framework::ResourceGenerator::from_object)
//! again, and the generator dispatches to whatever strategy the nested
//! object's metadata demands. The generator needs no knowledge of embedding
//! rules; strategies need no knowledge of each other.

use crate::framework::error::GeneratorError;
use crate::framework::extract::Representable;
use crate::framework::generator::ResourceGenerator;
use crate::framework::link::RequestContext;
use crate::framework::metadata::Metadata;
use crate::framework::resource::HalResource;

/// Polymorphic conversion rule for one metadata variant.
///
/// Implementations must fail with
/// [`GeneratorError::UnexpectedMetadataType`] when handed a metadata
/// variant they do not support; that guards against a misregistered
/// strategy table.
pub trait ResourceStrategy: Send + Sync {
    fn create_resource(
        &self,
        instance: &dyn Representable,
        metadata: &dyn Metadata,
        generator: &ResourceGenerator,
        ctx: &RequestContext,
    ) -> Result<HalResource, GeneratorError>;
}
