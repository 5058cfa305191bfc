//! # Link Generation Seam
//!
//! The engine never builds route URIs itself. It asks a [`LinkGenerator`] —
//! an external collaborator — to turn a route name plus parameters into an
//! absolute URI. A table-driven implementation ships in
//! [`crate::lifecycle::routes`]; tests use the recording double in
//! [`crate::framework::mock`].
//!
//! Implementations must be deterministic for identical inputs within a
//! single request context.

use std::collections::BTreeMap;

use crate::framework::error::LinkGenerationError;

/// Ordered, unique-keyed link parameters (route substitutions or
/// query-string arguments).
pub type Params = BTreeMap<String, String>;

/// Request-scoped inputs to link generation, passed through every
/// generation call. Carries the URI base the current request was served
/// under, if any.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    base_url: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL prepended to route-generated paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}

/// External capability resolving route information to a concrete URI.
pub trait LinkGenerator: Send + Sync {
    /// Builds a URI for `route`, substituting `route_params` into the
    /// route's template and appending `query` as a query string.
    fn from_route(
        &self,
        route: &str,
        route_params: &Params,
        query: &Params,
        ctx: &RequestContext,
    ) -> Result<String, LinkGenerationError>;
}
