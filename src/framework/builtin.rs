//! # Built-in Strategies
//!
//! The three conversion rules shipped with the engine, one per built-in
//! metadata variant:
//!
//! - [`RouteResourceStrategy`] — a single instance addressed by route:
//!   extract, self-link, recursive embedding of nested objects.
//! - [`RouteCollectionStrategy`] — a paginated collection addressed by
//!   route: page-arithmetic links plus member embedding.
//! - [`UrlCollectionStrategy`] — the same pagination behavior against a
//!   literal base URL, bypassing route resolution.
//!
//! Each strategy downcasts the metadata it receives and fails with
//! [`GeneratorError::UnexpectedMetadataType`] on a mismatch.

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::framework::error::{ExtractionError, GeneratorError, LinkGenerationError};
use crate::framework::extract::{ExtractedValue, PageInfo, Paginated, Representable};
use crate::framework::generator::ResourceGenerator;
use crate::framework::link::RequestContext;
use crate::framework::metadata::{
    Metadata, PaginationPlacement, RouteCollectionMetadata, RouteResourceMetadata,
    UrlCollectionMetadata,
};
use crate::framework::resource::{HalResource, Link};
use crate::framework::strategy::ResourceStrategy;

/// Renders a scalar value as a link parameter. Strings stay bare; other
/// scalars use their JSON rendering.
fn scalar_to_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Adds the `self`/`first`/`prev`/`next`/`last` relations for a page,
/// building each URI through `link_for`. `prev` and `next` are suppressed
/// when they would point outside `1..=total_pages`.
fn add_page_links<F>(
    resource: &mut HalResource,
    page: PageInfo,
    mut link_for: F,
) -> Result<(), GeneratorError>
where
    F: FnMut(u64) -> Result<String, LinkGenerationError>,
{
    let total = page.total_pages();
    let current = page.current_page;

    resource.add_link(Link::new("self", link_for(current)?));
    resource.add_link(Link::new("first", link_for(1)?));
    if current > 1 && current - 1 <= total {
        resource.add_link(Link::new("prev", link_for(current - 1)?));
    }
    if current < total {
        resource.add_link(Link::new("next", link_for(current + 1)?));
    }
    resource.add_link(Link::new("last", link_for(total)?));
    Ok(())
}

/// Generates every member of the current page in order and embeds the
/// sequence under the collection relation.
fn embed_members(
    resource: &mut HalResource,
    rel: &str,
    collection: &dyn Paginated,
    generator: &ResourceGenerator,
    ctx: &RequestContext,
) -> Result<(), GeneratorError> {
    let members = collection.members();
    let mut embedded = Vec::with_capacity(members.len());
    for member in members {
        embedded.push(generator.from_object(member, ctx)?);
    }
    resource.embed_many(rel, embedded);
    Ok(())
}

/// Resolves the pagination accessor of a collection instance.
fn paginated(instance: &dyn Representable) -> Result<&dyn Paginated, GeneratorError> {
    instance
        .as_paginated()
        .ok_or_else(|| ExtractionError::NotPaginated(instance.type_key()).into())
}

// =============================================================================
// ROUTE-BASED SINGLE RESOURCE
// =============================================================================

/// Strategy for [`RouteResourceMetadata`].
#[derive(Debug, Default)]
pub struct RouteResourceStrategy;

impl ResourceStrategy for RouteResourceStrategy {
    fn create_resource(
        &self,
        instance: &dyn Representable,
        metadata: &dyn Metadata,
        generator: &ResourceGenerator,
        ctx: &RequestContext,
    ) -> Result<HalResource, GeneratorError> {
        let meta = metadata
            .as_any()
            .downcast_ref::<RouteResourceMetadata>()
            .ok_or(GeneratorError::UnexpectedMetadataType(metadata.kind()))?;

        let extractor = generator.extractors().get(meta.extractor())?;
        let extracted = extractor.extract(instance)?;

        // Identifier comes out of the extracted data; it has to be a scalar
        // to be substitutable into the route template.
        let identifier = extracted
            .iter()
            .find_map(|(name, value)| match value {
                ExtractedValue::Scalar(v) if name == meta.identifier_property() => {
                    Some(scalar_to_param(v))
                }
                _ => None,
            })
            .ok_or_else(|| {
                ExtractionError::MissingProperty(meta.identifier_property().to_owned())
            })?;

        let mut route_params = meta.route_params().clone();
        route_params.insert(meta.identifier_placeholder().to_owned(), identifier);

        let href = generator.link_generator().from_route(
            meta.route(),
            &route_params,
            &Default::default(),
            ctx,
        )?;
        debug!(route = meta.route(), %href, "self link generated");

        let mut resource = HalResource::new();
        resource.add_link(Link::new("self", href));

        for (name, value) in extracted {
            if name == meta.identifier_property() && !meta.identifier_exposed() {
                continue;
            }
            match value {
                ExtractedValue::Scalar(v) => resource.push_property(name, v),
                ExtractedValue::Object(nested) => {
                    let embedded = generator.from_object(nested.as_ref(), ctx)?;
                    resource.embed(name, embedded);
                }
                ExtractedValue::Sequence(items) => {
                    let mut embedded = Vec::with_capacity(items.len());
                    for item in items {
                        embedded.push(generator.from_object(item.as_ref(), ctx)?);
                    }
                    resource.embed_many(name, embedded);
                }
            }
        }

        Ok(resource)
    }
}

// =============================================================================
// ROUTE-BASED COLLECTION
// =============================================================================

/// Strategy for [`RouteCollectionMetadata`].
#[derive(Debug, Default)]
pub struct RouteCollectionStrategy;

impl ResourceStrategy for RouteCollectionStrategy {
    fn create_resource(
        &self,
        instance: &dyn Representable,
        metadata: &dyn Metadata,
        generator: &ResourceGenerator,
        ctx: &RequestContext,
    ) -> Result<HalResource, GeneratorError> {
        let meta = metadata
            .as_any()
            .downcast_ref::<RouteCollectionMetadata>()
            .ok_or(GeneratorError::UnexpectedMetadataType(metadata.kind()))?;

        let collection = paginated(instance)?;
        let page = collection.page_info();
        debug!(
            route = meta.route(),
            current = page.current_page,
            total_pages = page.total_pages(),
            "generating route collection"
        );

        let mut resource = HalResource::new();
        add_page_links(&mut resource, page, |n| {
            let mut route_params = meta.route_params().clone();
            let mut query = meta.query_args().clone();
            match meta.placement() {
                PaginationPlacement::Query => {
                    query.insert(meta.page_param().to_owned(), n.to_string());
                }
                PaginationPlacement::PathPlaceholder => {
                    route_params.insert(meta.page_param().to_owned(), n.to_string());
                }
            }
            generator
                .link_generator()
                .from_route(meta.route(), &route_params, &query, ctx)
        })?;

        embed_members(&mut resource, meta.collection_rel(), collection, generator, ctx)?;
        Ok(resource)
    }
}

// =============================================================================
// URL-BASED COLLECTION
// =============================================================================

/// Strategy for [`UrlCollectionMetadata`].
#[derive(Debug, Default)]
pub struct UrlCollectionStrategy;

impl UrlCollectionStrategy {
    /// Builds the URI for page `n` directly from the literal base URL.
    fn page_url(
        meta: &UrlCollectionMetadata,
        n: u64,
    ) -> Result<String, LinkGenerationError> {
        match meta.placement() {
            PaginationPlacement::Query => {
                let base =
                    Url::parse(meta.base_url()).map_err(|source| {
                        LinkGenerationError::InvalidBaseUrl {
                            url: meta.base_url().to_owned(),
                            source,
                        }
                    })?;
                // Re-encode the existing query minus any stale page value,
                // then append the page parameter.
                let kept: Vec<(String, String)> = base
                    .query_pairs()
                    .filter(|(k, _)| k != meta.page_param())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
                let mut url = base;
                {
                    let mut pairs = url.query_pairs_mut();
                    pairs.clear();
                    for (k, v) in &kept {
                        pairs.append_pair(k, v);
                    }
                    pairs.append_pair(meta.page_param(), &n.to_string());
                }
                Ok(url.to_string())
            }
            PaginationPlacement::PathPlaceholder => {
                let token = format!("{{{}}}", meta.page_param());
                if !meta.base_url().contains(&token) {
                    return Err(LinkGenerationError::MissingPlaceholder {
                        route: meta.base_url().to_owned(),
                        placeholder: meta.page_param().to_owned(),
                    });
                }
                Ok(meta.base_url().replace(&token, &n.to_string()))
            }
        }
    }
}

impl ResourceStrategy for UrlCollectionStrategy {
    fn create_resource(
        &self,
        instance: &dyn Representable,
        metadata: &dyn Metadata,
        generator: &ResourceGenerator,
        ctx: &RequestContext,
    ) -> Result<HalResource, GeneratorError> {
        let meta = metadata
            .as_any()
            .downcast_ref::<UrlCollectionMetadata>()
            .ok_or(GeneratorError::UnexpectedMetadataType(metadata.kind()))?;

        let collection = paginated(instance)?;
        let page = collection.page_info();
        debug!(
            base_url = meta.base_url(),
            current = page.current_page,
            total_pages = page.total_pages(),
            "generating url collection"
        );

        let mut resource = HalResource::new();
        add_page_links(&mut resource, page, |n| Self::page_url(meta, n))?;
        embed_members(&mut resource, meta.collection_rel(), collection, generator, ctx)?;
        Ok(resource)
    }
}
