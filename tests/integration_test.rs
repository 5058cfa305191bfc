//! Full end-to-end tests over the wired demo system: route expansion,
//! recursive embedding, pagination links, and the JSON config loader.

use std::sync::Arc;

use serde_json::json;

use hal_engine::book_resource::{AuthorExtractor, BookExtractor};
use hal_engine::domain::{Author, Book, BookPage};
use hal_engine::framework::{
    Embedded, ExtractorRegistry, LinkValue, RequestContext, ResourceGenerator,
};
use hal_engine::lifecycle::config::load_from_json;
use hal_engine::lifecycle::routes::RouteTable;
use hal_engine::lifecycle::LibrarySystem;

fn dune() -> Book {
    Book::new(42, "Dune", 1965, Author::new(7, "Frank Herbert"))
}

fn shelf(count: usize, current_page: u64, page_size: u64, total_items: u64) -> BookPage {
    let books = (0..count)
        .map(|i| {
            Book::new(
                100 + i as u64,
                format!("Volume {i}"),
                1970 + i as u32,
                Author::new(7, "Frank Herbert"),
            )
        })
        .collect();
    BookPage::new(books, current_page, page_size, total_items)
}

fn single_href(resource: &hal_engine::framework::HalResource, rel: &str) -> String {
    match resource.link(rel) {
        Some(LinkValue::Single(link)) => link.href().to_owned(),
        other => panic!("expected one '{rel}' link, got {other:?}"),
    }
}

#[test]
fn book_resource_has_route_expanded_self_link_and_clean_payload() {
    let system = LibrarySystem::new();
    let resource = system.generate(&dune(), &RequestContext::new()).unwrap();

    assert_eq!(single_href(&resource, "self"), "/book/42");
    // `id` was consumed as the route parameter; the rest is payload.
    assert!(resource.property("id").is_none());
    assert_eq!(resource.property("title"), Some(&json!("Dune")));
    assert_eq!(resource.property("year"), Some(&json!(1965)));
    // The author is embedded, not flattened.
    assert!(resource.property("author").is_none());
}

#[test]
fn embedded_author_matches_direct_generation() {
    let system = LibrarySystem::new();
    let ctx = RequestContext::new();
    let book = dune();

    let book_resource = system.generate(&book, &ctx).unwrap();
    let Some(Embedded::Single(embedded_author)) = book_resource.embedded("author") else {
        panic!("author should be embedded as a single resource");
    };

    let direct = system.generate(&book.author, &ctx).unwrap();
    assert_eq!(**embedded_author, direct);
    assert_eq!(embedded_author.self_link().unwrap().href(), "/author/7");
}

#[test]
fn middle_page_collection_links_and_members() {
    // 25 items, 10 per page, on page 2: pages run 1..=3.
    let system = LibrarySystem::new();
    let resource = system
        .generate(&shelf(10, 2, 10, 25), &RequestContext::new())
        .unwrap();

    assert_eq!(single_href(&resource, "self"), "/books?page=2");
    assert_eq!(single_href(&resource, "first"), "/books?page=1");
    assert_eq!(single_href(&resource, "prev"), "/books?page=1");
    assert_eq!(single_href(&resource, "next"), "/books?page=3");
    assert_eq!(single_href(&resource, "last"), "/books?page=3");

    let Some(Embedded::Many(books)) = resource.embedded("book") else {
        panic!("members should embed under the collection relation");
    };
    assert_eq!(books.len(), 10);
    assert_eq!(books[0].self_link().unwrap().href(), "/book/100");
    assert_eq!(books[9].self_link().unwrap().href(), "/book/109");
}

#[test]
fn single_page_collection_collapses_to_self_first_last() {
    let system = LibrarySystem::new();
    let resource = system
        .generate(&shelf(3, 1, 10, 3), &RequestContext::new())
        .unwrap();

    assert_eq!(single_href(&resource, "self"), "/books?page=1");
    assert_eq!(single_href(&resource, "first"), "/books?page=1");
    assert_eq!(single_href(&resource, "last"), "/books?page=1");
    assert!(resource.link("prev").is_none());
    assert!(resource.link("next").is_none());
}

#[test]
fn empty_collection_still_pages() {
    let system = LibrarySystem::new();
    let resource = system
        .generate(&shelf(0, 1, 10, 0), &RequestContext::new())
        .unwrap();

    assert_eq!(single_href(&resource, "self"), "/books?page=1");
    assert_eq!(single_href(&resource, "last"), "/books?page=1");
    let Some(Embedded::Many(books)) = resource.embedded("book") else {
        panic!("an empty page still embeds an empty member sequence");
    };
    assert!(books.is_empty());
}

#[test]
fn request_context_base_url_prefixes_every_link() {
    let system = LibrarySystem::new();
    let ctx = RequestContext::new().with_base_url("https://api.example.test");

    let book = system.generate(&dune(), &ctx).unwrap();
    assert_eq!(single_href(&book, "self"), "https://api.example.test/book/42");

    let page = system.generate(&shelf(1, 1, 10, 1), &ctx).unwrap();
    assert_eq!(
        single_href(&page, "self"),
        "https://api.example.test/books?page=1"
    );
}

#[test]
fn json_configured_system_matches_code_configured_system() {
    let metadata = load_from_json(
        r#"[
            {"type": "route-resource", "class": "book", "route": "book",
             "extractor": "book", "identifier": "id"},
            {"type": "route-resource", "class": "author", "route": "author",
             "extractor": "author", "identifier": "id"},
            {"type": "route-collection", "class": "book-page", "rel": "book",
             "route": "books", "page_param": "page", "placement": "query"}
        ]"#,
    )
    .unwrap();

    let mut extractors = ExtractorRegistry::new();
    extractors.register("book", Arc::new(BookExtractor));
    extractors.register("author", Arc::new(AuthorExtractor));
    let routes = RouteTable::new()
        .route("book", "/book/{id}")
        .route("author", "/author/{id}")
        .route("books", "/books");
    let generator = ResourceGenerator::new(metadata, extractors, Arc::new(routes));

    let ctx = RequestContext::new();
    let from_config = generator.from_object(&dune(), &ctx).unwrap();
    let from_code = LibrarySystem::new().generate(&dune(), &ctx).unwrap();
    assert_eq!(from_config, from_code);
}
