//! # Mock Collaborators
//!
//! Test doubles for the engine's two external collaborators.
//!
//! # Testing Strategy
//! In unit tests we don't want a full route table or real per-type
//! extractors just to exercise a strategy. Instead:
//!
//! - [`RecordingLinkGenerator`] produces deterministic URIs from its inputs
//!   and records every call, so a test can assert exactly which routes and
//!   parameters a strategy asked for.
//! - [`FnExtractor`] wraps a closure, letting a test hand any instance a
//!   canned [`PropertyMap`] (including nested objects for embedding tests).

use std::sync::Mutex;

use crate::framework::error::{ExtractionError, LinkGenerationError};
use crate::framework::extract::{Extractor, PropertyMap, Representable};
use crate::framework::link::{LinkGenerator, Params, RequestContext};

/// One recorded [`LinkGenerator::from_route`] invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCall {
    pub route: String,
    pub route_params: Params,
    pub query: Params,
}

/// Link generator double: builds `/{route}/{param values}?{query}` and
/// records every call for later inspection.
#[derive(Debug, Default)]
pub struct RecordingLinkGenerator {
    calls: Mutex<Vec<LinkCall>>,
}

impl RecordingLinkGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<LinkCall> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }
}

impl LinkGenerator for RecordingLinkGenerator {
    fn from_route(
        &self,
        route: &str,
        route_params: &Params,
        query: &Params,
        ctx: &RequestContext,
    ) -> Result<String, LinkGenerationError> {
        self.calls.lock().expect("mock lock poisoned").push(LinkCall {
            route: route.to_owned(),
            route_params: route_params.clone(),
            query: query.clone(),
        });

        let mut uri = String::new();
        if let Some(base) = ctx.base_url() {
            uri.push_str(base);
        }
        uri.push('/');
        uri.push_str(route);
        for value in route_params.values() {
            uri.push('/');
            uri.push_str(value);
        }
        if !query.is_empty() {
            let encoded: Vec<String> =
                query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            uri.push('?');
            uri.push_str(&encoded.join("&"));
        }
        Ok(uri)
    }
}

/// Extractor double wrapping a closure.
pub struct FnExtractor<F>(F)
where
    F: Fn(&dyn Representable) -> Result<PropertyMap, ExtractionError> + Send + Sync;

impl<F> FnExtractor<F>
where
    F: Fn(&dyn Representable) -> Result<PropertyMap, ExtractionError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> std::fmt::Debug for FnExtractor<F>
where
    F: Fn(&dyn Representable) -> Result<PropertyMap, ExtractionError> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnExtractor").finish_non_exhaustive()
    }
}

impl<F> Extractor for FnExtractor<F>
where
    F: Fn(&dyn Representable) -> Result<PropertyMap, ExtractionError> + Send + Sync,
{
    fn extract(&self, instance: &dyn Representable) -> Result<PropertyMap, ExtractionError> {
        (self.0)(instance)
    }
}
