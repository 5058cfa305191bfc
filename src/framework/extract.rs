//! # Representable Instances & Extraction
//!
//! This module defines the contract between the engine and the domain
//! objects it represents.
//!
//! # Architecture Note
//! The engine never inspects domain types through runtime reflection. A
//! domain type opts in by implementing [`Representable`]: it names itself
//! with a [`TypeKey`] and *declares* its ancestor chain as an explicit
//! ordered list, most derived first. Metadata resolution walks exactly that
//! list — deterministic and finite.
//!
//! Property extraction is an external capability: a named [`Extractor`]
//! turns an instance into a flat ordered mapping. Extractors mark each
//! value as either a scalar (stays in the payload) or a nested
//! object/sequence (embedded recursively by the instance strategy). Which
//! extractor applies is declared per metadata entry and resolved through
//! the [`ExtractorRegistry`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use serde_json::Value;

use crate::framework::error::ExtractionError;
use crate::framework::metadata::TypeKey;

/// Capability a domain object implements to be representable as a resource.
pub trait Representable: Debug + Send + Sync {
    /// The exact runtime type key, used for metadata resolution and
    /// diagnostics.
    fn type_key(&self) -> TypeKey;

    /// Declared ancestor chain, most derived first. Resolution falls back
    /// along this list when the exact key has no metadata. Defaults to none.
    fn ancestor_keys(&self) -> Vec<TypeKey> {
        Vec::new()
    }

    /// Downcast hook for extractors.
    fn as_any(&self) -> &dyn Any;

    /// Pagination/member accessor contract for collection instances.
    /// Instance types keep the default `None`.
    fn as_paginated(&self) -> Option<&dyn Paginated> {
        None
    }
}

/// Pagination state and ordered membership of a collection instance.
pub trait Paginated: Representable {
    /// Current page, page size, and total item count.
    fn page_info(&self) -> PageInfo;

    /// The members of the current page, in order.
    fn members(&self) -> Vec<&dyn Representable>;
}

/// Pagination context carried by a collection instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u64,
    pub page_size: u64,
    pub total_items: u64,
}

impl PageInfo {
    pub fn new(current_page: u64, page_size: u64, total_items: u64) -> Self {
        Self {
            current_page,
            page_size,
            total_items,
        }
    }

    /// `ceil(total_items / page_size)`, clamped to at least one page so an
    /// empty collection still has a valid first/last page.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 1;
        }
        self.total_items.div_ceil(self.page_size).max(1)
    }
}

/// One extracted value: a scalar payload value, or a nested object or
/// sequence destined for recursive embedding.
#[derive(Debug)]
pub enum ExtractedValue {
    Scalar(Value),
    Object(Box<dyn Representable>),
    Sequence(Vec<Box<dyn Representable>>),
}

/// Flat ordered mapping of property name to extracted value.
pub type PropertyMap = Vec<(String, ExtractedValue)>;

/// External capability converting an instance into a [`PropertyMap`].
///
/// Implementations typically downcast via [`Representable::as_any`] and
/// fail with [`ExtractionError::UnsupportedType`] when handed a foreign
/// instance.
pub trait Extractor: Debug + Send + Sync {
    fn extract(&self, instance: &dyn Representable) -> Result<PropertyMap, ExtractionError>;
}

/// Name-keyed registry of extractors.
///
/// Metadata entries reference extractors by name; exactly one extractor
/// resolves per route-resource entry. Registration is a configuration-time
/// concern; the registry is read-only while generation traffic runs.
#[derive(Default)]
pub struct ExtractorRegistry {
    by_name: HashMap<String, Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an extractor under a name; a later registration for the
    /// same name overwrites the earlier one.
    pub fn register(&mut self, name: impl Into<String>, extractor: Arc<dyn Extractor>) {
        self.by_name.insert(name.into(), extractor);
    }

    /// Looks up an extractor by name.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn Extractor>, ExtractionError> {
        self.by_name
            .get(name)
            .ok_or_else(|| ExtractionError::UnknownExtractor(name.to_owned()))
    }
}

impl Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("names", &self.by_name.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageInfo::new(1, 10, 25).total_pages(), 3);
        assert_eq!(PageInfo::new(1, 10, 30).total_pages(), 3);
        assert_eq!(PageInfo::new(1, 10, 31).total_pages(), 4);
    }

    #[test]
    fn total_pages_never_drops_below_one() {
        assert_eq!(PageInfo::new(1, 10, 0).total_pages(), 1);
        assert_eq!(PageInfo::new(1, 0, 50).total_pages(), 1);
    }

    #[test]
    fn unknown_extractor_lookup_fails() {
        let registry = ExtractorRegistry::new();
        let err = registry.get("missing").unwrap_err();
        assert!(matches!(err, ExtractionError::UnknownExtractor(name) if name == "missing"));
    }
}
