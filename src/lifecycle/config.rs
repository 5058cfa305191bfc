//! # Declarative Metadata Configuration
//!
//! Bulk-populates a [`MetadataMap`] from a list of tagged records, so an
//! embedding application can describe its representation rules in static
//! configuration instead of code.
//!
//! Each record carries a `type` discriminator naming the metadata variant
//! plus that variant's fields:
//!
//! ```json
//! [
//!   {
//!     "type": "route-resource",
//!     "class": "book",
//!     "route": "book",
//!     "extractor": "book",
//!     "identifier": "id"
//!   },
//!   {
//!     "type": "route-collection",
//!     "class": "book-page",
//!     "rel": "book",
//!     "route": "books",
//!     "page_param": "page",
//!     "placement": "query"
//!   }
//! ]
//! ```
//!
//! Malformed records are this loader's concern: they surface as
//! [`ConfigError`] before anything reaches the engine.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::framework::link::Params;
use crate::framework::metadata::{
    Metadata, MetadataMap, PaginationPlacement, RouteCollectionMetadata, RouteResourceMetadata,
    UrlCollectionMetadata,
};

/// One declarative metadata record, tagged by variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MetadataRecord {
    RouteResource {
        class: String,
        route: String,
        extractor: String,
        identifier: String,
        #[serde(default)]
        placeholder: Option<String>,
        #[serde(default)]
        route_params: Params,
        #[serde(default)]
        expose_identifier: bool,
    },
    RouteCollection {
        class: String,
        rel: String,
        route: String,
        page_param: String,
        placement: PaginationPlacement,
        #[serde(default)]
        route_params: Params,
        #[serde(default)]
        query_args: Params,
    },
    UrlCollection {
        class: String,
        rel: String,
        base_url: String,
        page_param: String,
        placement: PaginationPlacement,
    },
}

/// Errors raised while loading metadata configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed metadata record: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Builds one metadata instance from a well-formed record.
pub fn build_metadata(record: MetadataRecord) -> Arc<dyn Metadata> {
    match record {
        MetadataRecord::RouteResource {
            class,
            route,
            extractor,
            identifier,
            placeholder,
            route_params,
            expose_identifier,
        } => {
            let mut metadata = RouteResourceMetadata::new(class.into(), route, extractor, identifier)
                .with_route_params(route_params);
            if let Some(placeholder) = placeholder {
                metadata = metadata.with_identifier_placeholder(placeholder);
            }
            if expose_identifier {
                metadata = metadata.expose_identifier();
            }
            Arc::new(metadata)
        }
        MetadataRecord::RouteCollection {
            class,
            rel,
            route,
            page_param,
            placement,
            route_params,
            query_args,
        } => Arc::new(
            RouteCollectionMetadata::new(class.into(), rel, route, page_param, placement)
                .with_route_params(route_params)
                .with_query_args(query_args),
        ),
        MetadataRecord::UrlCollection {
            class,
            rel,
            base_url,
            page_param,
            placement,
        } => Arc::new(UrlCollectionMetadata::new(
            class.into(),
            rel,
            base_url,
            page_param,
            placement,
        )),
    }
}

/// Populates a fresh [`MetadataMap`] from records. Later records for the
/// same class overwrite earlier ones, matching [`MetadataMap::add`].
pub fn load_records(records: impl IntoIterator<Item = MetadataRecord>) -> MetadataMap {
    let mut map = MetadataMap::new();
    for record in records {
        map.add(build_metadata(record));
    }
    info!(entries = map.len(), "metadata map loaded");
    map
}

/// Parses a JSON array of records and populates a [`MetadataMap`].
pub fn load_from_json(json: &str) -> Result<MetadataMap, ConfigError> {
    let records: Vec<MetadataRecord> = serde_json::from_str(json)?;
    Ok(load_records(records))
}
