//! # Route Table
//!
//! A table-driven [`LinkGenerator`]: route name to path template, with
//! `{placeholder}` substitution and query-string encoding.
//!
//! The engine only depends on the [`LinkGenerator`] trait; this
//! implementation is what an embedding application registers when it does
//! not bring its own router. Templates look like `/book/{id}` or
//! `/books/page/{page}`.

use std::collections::HashMap;

use crate::framework::error::LinkGenerationError;
use crate::framework::link::{LinkGenerator, Params, RequestContext};

/// Route name → path template registry.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route template; a later registration for the same name
    /// overwrites the earlier one. Templates are rooted: a missing leading
    /// `/` is added so base-URL joins stay well-formed.
    pub fn route(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        let mut template = template.into();
        if !template.starts_with('/') {
            template.insert(0, '/');
        }
        self.routes.insert(name.into(), template);
        self
    }

    fn expand(
        &self,
        route: &str,
        template: &str,
        params: &Params,
    ) -> Result<String, LinkGenerationError> {
        let mut path = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| LinkGenerationError::MalformedTemplate {
                    route: route.to_owned(),
                    template: template.to_owned(),
                })?;
            let name = &after[..end];
            let value =
                params
                    .get(name)
                    .ok_or_else(|| LinkGenerationError::MissingPlaceholder {
                        route: route.to_owned(),
                        placeholder: name.to_owned(),
                    })?;
            path.push_str(value);
            rest = &after[end + 1..];
        }
        path.push_str(rest);
        Ok(path)
    }
}

impl LinkGenerator for RouteTable {
    fn from_route(
        &self,
        route: &str,
        route_params: &Params,
        query: &Params,
        ctx: &RequestContext,
    ) -> Result<String, LinkGenerationError> {
        let template = self
            .routes
            .get(route)
            .ok_or_else(|| LinkGenerationError::UnknownRoute(route.to_owned()))?;

        let mut uri = self.expand(route, template, route_params)?;
        if !query.is_empty() {
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in query {
                serializer.append_pair(key, value);
            }
            uri.push('?');
            uri.push_str(&serializer.finish());
        }

        Ok(match ctx.base_url() {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), uri),
            None => uri,
        })
    }
}
