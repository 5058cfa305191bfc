#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # HAL Engine
//!
//! > **Metadata-driven HAL resource generation for Rust.**
//!
//! This crate turns arbitrary domain objects into hypermedia (HAL) resource
//! representations — data properties, typed links, and embedded
//! sub-resources — driven entirely by declarative metadata instead of
//! per-type serialization code.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why metadata + strategies?
//!
//! The engine combines two ideas:
//! - **Declarative metadata**: one immutable value per domain type
//!   describing how it becomes a resource (route, extractor, identifier,
//!   pagination rules).
//! - **Open strategy dispatch**: each metadata variant carries a stable
//!   discriminator, and a registry maps discriminators to the strategy that
//!   implements its conversion rule.
//!
//! This combination provides:
//! - **One engine, any type**: register metadata, get representations.
//! - **Extensibility**: ship your own metadata variant + strategy without
//!   touching the built-ins.
//! - **Recursive embedding for free**: strategies call back into the
//!   generator for nested objects; the generator never learns embedding
//!   rules.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Ancestor-chain resolution
//! Metadata resolution tries the instance's exact type key, then its
//! *declared* ancestor chain, most derived first. One entry for a base
//! type covers every subtype that lists it — no per-subtype registration.
//!
//! ### 2. External collaborators
//! Property extraction and URI construction are capabilities the engine
//! consumes through traits ([`framework::Extractor`],
//! [`framework::LinkGenerator`]), never implements itself. A table-driven
//! link generator and a JSON metadata loader ship in [`lifecycle`].
//!
//! ### 3. Concurrency Model
//! Configuration mutates (`&mut self`), generation reads (`&self`). Once
//! wiring is done the generator is freely shareable across threads — every
//! registry it touches is immutable by then. No locks, no suspension
//! points, no I/O of its own.
//!
//! ### 4. Failure policy
//! No partial resources, no silent fallbacks. Any failure during
//! resolution, extraction, or link generation aborts the whole generation
//! call and surfaces unmodified to the caller.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The core: [`framework::ResourceGenerator`], [`framework::MetadataMap`],
//! the [`framework::ResourceStrategy`] seam, and the three built-in
//! strategies (route resource, route collection, URL collection).
//!
//! ### 2. The Wiring ([`lifecycle`])
//! Configuration-time assembly: the JSON metadata loader, the
//! [`lifecycle::routes::RouteTable`] link generator, tracing setup, and the
//! wired [`lifecycle::LibrarySystem`] demo.
//!
//! ### 3. The Demo Domain ([`domain`], [`book_resource`], [`shelf_resource`])
//! `Book`, `Author`, and the paginated `BookPage`, with their
//! `Representable`/`Extractor` implementations — a worked example of what
//! an embedding application writes per type.
//!
//! ## 🚀 Quick Start
//!
//! ```
//! use hal_engine::domain::{Author, Book, BookPage};
//! use hal_engine::framework::RequestContext;
//! use hal_engine::lifecycle::LibrarySystem;
//!
//! let system = LibrarySystem::new();
//! let ctx = RequestContext::new();
//!
//! // Single resource: self link + data + embedded author.
//! let book = Book::new(42, "Dune", 1965, Author::new(7, "Frank Herbert"));
//! let resource = system.generate(&book, &ctx).unwrap();
//! assert_eq!(resource.self_link().unwrap().href(), "/book/42");
//!
//! // Paginated collection: page links + embedded members.
//! let page = BookPage::new(vec![book], 1, 10, 1);
//! let resource = system.generate(&page, &ctx).unwrap();
//! assert_eq!(resource.self_link().unwrap().href(), "/books?page=1");
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod book_resource;
pub mod domain;
pub mod framework;
pub mod lifecycle;
pub mod shelf_resource;
