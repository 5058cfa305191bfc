//! # The HAL Resource Model
//!
//! This module defines the output unit of the engine: [`HalResource`], a
//! bundle of data properties, typed [`Link`]s, and embedded sub-resources.
//!
//! # Architecture Note
//! A `HalResource` is a plain value. It holds no back-reference to the
//! generator that produced it, so callers own it outright and can hand it
//! to whatever downstream renderer (JSON, XML, ...) they like. Rendering is
//! explicitly *not* this crate's job; the resource graph is the contract.
//!
//! Property, link, and embed order is preserved: relations and properties
//! come out in the order strategies inserted them.

use serde_json::Value;

/// A typed hyperlink: relation name, target URI, and an optional
/// "templated" marker for URI templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    rel: String,
    href: String,
    templated: bool,
}

impl Link {
    /// Creates a concrete (non-templated) link.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            templated: false,
        }
    }

    /// Marks the link as a URI template.
    pub fn templated(mut self) -> Self {
        self.templated = true;
        self
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn is_templated(&self) -> bool {
        self.templated
    }
}

/// The value stored under one link relation: a single link, or an ordered
/// list for multi-valued relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkValue {
    Single(Link),
    Many(Vec<Link>),
}

impl LinkValue {
    /// The first (or only) link under this relation.
    pub fn first(&self) -> Option<&Link> {
        match self {
            Self::Single(link) => Some(link),
            Self::Many(links) => links.first(),
        }
    }

    /// Number of links under this relation.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(links) => links.len(),
        }
    }

    /// Conventional companion to [`len`](Self::len). A relation entry only
    /// exists once [`HalResource::add_link`] has stored a link under it, so
    /// this is always `false` for values read back from a resource.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The value stored under one embed relation: a single resource, or an
/// ordered sequence (collections embed their members this way).
#[derive(Debug, Clone, PartialEq)]
pub enum Embedded {
    Single(Box<HalResource>),
    Many(Vec<HalResource>),
}

/// A generated hypermedia resource.
///
/// Built up by strategies via [`push_property`](Self::push_property),
/// [`add_link`](Self::add_link), [`embed`](Self::embed), and
/// [`embed_many`](Self::embed_many); read back by callers via the accessor
/// methods. Fresh per generation call, owned solely by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalResource {
    properties: Vec<(String, Value)>,
    links: Vec<(String, LinkValue)>,
    embedded: Vec<(String, Embedded)>,
}

impl HalResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a data property. A property re-pushed under the same name
    /// replaces the earlier value in place, keeping its original position.
    pub fn push_property(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(slot) = self.properties.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.properties.push((name, value));
        }
    }

    /// Adds a link under its relation. A second link for the same relation
    /// turns the entry into an ordered multi-valued relation.
    pub fn add_link(&mut self, link: Link) {
        let rel = link.rel().to_owned();
        match self.links.iter_mut().find(|(r, _)| *r == rel) {
            Some((_, slot)) => match slot {
                LinkValue::Single(first) => {
                    let first = first.clone();
                    *slot = LinkValue::Many(vec![first, link]);
                }
                LinkValue::Many(links) => links.push(link),
            },
            None => self.links.push((rel, LinkValue::Single(link))),
        }
    }

    /// Embeds a single sub-resource under a relation.
    pub fn embed(&mut self, rel: impl Into<String>, resource: HalResource) {
        self.embedded
            .push((rel.into(), Embedded::Single(Box::new(resource))));
    }

    /// Embeds an ordered sequence of sub-resources under a relation.
    pub fn embed_many(&mut self, rel: impl Into<String>, resources: Vec<HalResource>) {
        self.embedded.push((rel.into(), Embedded::Many(resources)));
    }

    /// Looks up a data property by name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Ordered data properties.
    pub fn properties(&self) -> &[(String, Value)] {
        &self.properties
    }

    /// Looks up the link value under a relation.
    pub fn link(&self, rel: &str) -> Option<&LinkValue> {
        self.links.iter().find(|(r, _)| r == rel).map(|(_, v)| v)
    }

    /// The `self` link, present on every generated instance resource.
    pub fn self_link(&self) -> Option<&Link> {
        self.link("self").and_then(LinkValue::first)
    }

    /// All link relations, in insertion order.
    pub fn links(&self) -> &[(String, LinkValue)] {
        &self.links
    }

    /// Looks up an embedded value under a relation.
    pub fn embedded(&self, rel: &str) -> Option<&Embedded> {
        self.embedded.iter().find(|(r, _)| r == rel).map(|(_, v)| v)
    }

    /// All embedded relations, in insertion order.
    pub fn embeds(&self) -> &[(String, Embedded)] {
        &self.embedded
    }
}
