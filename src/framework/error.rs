//! # Engine Errors
//!
//! This module defines the error types used throughout the engine. By
//! centralizing error definitions, we ensure consistent error handling
//! across registries, strategies, and the generator.
//!
//! Propagation policy: the engine performs no local recovery. A failure in
//! metadata resolution, extraction, or link generation aborts generation of
//! the affected resource (and, transitively, of any ancestor resource whose
//! embedding triggered it) and surfaces unmodified to the caller of
//! [`ResourceGenerator::from_object`](crate::framework::ResourceGenerator::from_object).
//! Partial resources are never returned.

use crate::framework::metadata::{MetadataKind, TypeKey};

/// Errors raised by [`MetadataMap`](crate::framework::MetadataMap) lookups.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// No metadata is registered for the type or any of its declared
    /// ancestors.
    #[error("no metadata registered for type '{0}' or its ancestors")]
    NotFound(TypeKey),
}

/// Errors raised while extracting properties from an instance.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extractor '{0}' is not registered")]
    UnknownExtractor(String),
    /// The extractor was handed an instance of a type it cannot read.
    #[error("extractor cannot read instances of type '{0}'")]
    UnsupportedType(TypeKey),
    #[error("property '{0}' is missing from the extracted data")]
    MissingProperty(String),
    /// A collection strategy was given an instance that does not expose
    /// pagination state via `as_paginated`.
    #[error("type '{0}' does not expose pagination state")]
    NotPaginated(TypeKey),
    /// Opaque pass-through failure from a user-supplied extractor.
    #[error("extraction failed: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised while turning route or URL information into a URI.
#[derive(Debug, thiserror::Error)]
pub enum LinkGenerationError {
    #[error("unknown route '{0}'")]
    UnknownRoute(String),
    #[error("route '{route}' has no value for placeholder '{placeholder}'")]
    MissingPlaceholder { route: String, placeholder: String },
    #[error("route '{route}' has a malformed template '{template}'")]
    MalformedTemplate { route: String, template: String },
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Opaque pass-through failure from a user-supplied link generator.
    #[error("link generation failed: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors surfaced by [`ResourceGenerator::from_object`](crate::framework::ResourceGenerator::from_object).
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Metadata resolution failed at the top of a generation call. Carries
    /// the offending instance's type for diagnostics.
    #[error("cannot generate a resource for object of type '{type_key}'")]
    UnknownObjectType {
        type_key: TypeKey,
        #[source]
        source: MetadataError,
    },
    /// No strategy is registered for the metadata kind, or a strategy was
    /// invoked with a metadata variant it does not support.
    #[error("metadata kind '{0}' is not supported here")]
    UnexpectedMetadataType(MetadataKind),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    LinkGeneration(#[from] LinkGenerationError),
}
