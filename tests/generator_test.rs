//! Engine-level tests driven through mock collaborators: dispatch,
//! registration semantics, identifier handling, and failure paths.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use hal_engine::framework::mock::{FnExtractor, RecordingLinkGenerator};
use hal_engine::framework::{
    ExtractedValue, ExtractionError, ExtractorRegistry, GeneratorError, HalResource, Metadata,
    MetadataKind, MetadataMap, PaginationPlacement, Representable, RequestContext,
    ResourceGenerator, ResourceStrategy, RouteCollectionMetadata, RouteResourceMetadata, TypeKey,
};

#[derive(Debug, Clone)]
struct Widget {
    id: u64,
    label: String,
}

impl Representable for Widget {
    fn type_key(&self) -> TypeKey {
        TypeKey::from_static("widget")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Unregistered;

impl Representable for Unregistered {
    fn type_key(&self) -> TypeKey {
        TypeKey::from_static("unregistered")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn widget_extractor() -> Arc<dyn hal_engine::framework::Extractor> {
    Arc::new(FnExtractor::new(|instance: &dyn Representable| {
        let widget = instance
            .as_any()
            .downcast_ref::<Widget>()
            .ok_or_else(|| ExtractionError::UnsupportedType(instance.type_key()))?;
        Ok(vec![
            ("id".to_owned(), ExtractedValue::Scalar(json!(widget.id))),
            (
                "label".to_owned(),
                ExtractedValue::Scalar(json!(widget.label)),
            ),
        ])
    }))
}

fn widget_generator(metadata: MetadataMap) -> ResourceGenerator {
    let mut extractors = ExtractorRegistry::new();
    extractors.register("widget", widget_extractor());
    ResourceGenerator::new(metadata, extractors, Arc::new(RecordingLinkGenerator::new()))
}

fn widget_metadata() -> MetadataMap {
    let mut metadata = MetadataMap::new();
    metadata.add(Arc::new(RouteResourceMetadata::new(
        TypeKey::from_static("widget"),
        "widget",
        "widget",
        "id",
    )));
    metadata
}

#[test]
fn instance_resource_always_carries_exactly_one_self_link() {
    let generator = widget_generator(widget_metadata());
    let widget = Widget {
        id: 7,
        label: "gear".to_owned(),
    };

    let resource = generator
        .from_object(&widget, &RequestContext::new())
        .unwrap();

    assert_eq!(resource.link("self").unwrap().len(), 1);
    assert_eq!(resource.self_link().unwrap().href(), "/widget/7");
}

#[test]
fn identifier_consumed_for_routing_is_not_payload() {
    let generator = widget_generator(widget_metadata());
    let widget = Widget {
        id: 7,
        label: "gear".to_owned(),
    };

    let resource = generator
        .from_object(&widget, &RequestContext::new())
        .unwrap();

    assert!(resource.property("id").is_none());
    assert_eq!(resource.property("label"), Some(&json!("gear")));
}

#[test]
fn exposed_identifier_stays_in_payload() {
    let mut metadata = MetadataMap::new();
    metadata.add(Arc::new(
        RouteResourceMetadata::new(TypeKey::from_static("widget"), "widget", "widget", "id")
            .expose_identifier(),
    ));
    let generator = widget_generator(metadata);
    let widget = Widget {
        id: 7,
        label: "gear".to_owned(),
    };

    let resource = generator
        .from_object(&widget, &RequestContext::new())
        .unwrap();

    assert_eq!(resource.property("id"), Some(&json!(7)));
}

#[test]
fn unknown_object_type_reports_the_offending_type() {
    let generator = widget_generator(widget_metadata());

    let err = generator
        .from_object(&Unregistered, &RequestContext::new())
        .unwrap_err();

    assert!(matches!(
        err,
        GeneratorError::UnknownObjectType { type_key, .. } if type_key.as_str() == "unregistered"
    ));
}

#[test]
fn sequence_values_embed_as_ordered_resources() {
    #[derive(Debug)]
    struct Bundle {
        id: u64,
        widgets: Vec<Widget>,
    }

    impl Representable for Bundle {
        fn type_key(&self) -> TypeKey {
            TypeKey::from_static("bundle")
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    let mut metadata = widget_metadata();
    metadata.add(Arc::new(RouteResourceMetadata::new(
        TypeKey::from_static("bundle"),
        "bundle",
        "bundle",
        "id",
    )));

    let mut extractors = ExtractorRegistry::new();
    extractors.register("widget", widget_extractor());
    extractors.register(
        "bundle",
        Arc::new(FnExtractor::new(|instance: &dyn Representable| {
            let bundle = instance
                .as_any()
                .downcast_ref::<Bundle>()
                .ok_or_else(|| ExtractionError::UnsupportedType(instance.type_key()))?;
            Ok(vec![
                ("id".to_owned(), ExtractedValue::Scalar(json!(bundle.id))),
                (
                    "widgets".to_owned(),
                    ExtractedValue::Sequence(
                        bundle
                            .widgets
                            .iter()
                            .map(|w| Box::new(w.clone()) as Box<dyn Representable>)
                            .collect(),
                    ),
                ),
            ])
        })),
    );
    let generator =
        ResourceGenerator::new(metadata, extractors, Arc::new(RecordingLinkGenerator::new()));

    let bundle = Bundle {
        id: 1,
        widgets: vec![
            Widget {
                id: 7,
                label: "gear".to_owned(),
            },
            Widget {
                id: 8,
                label: "cog".to_owned(),
            },
        ],
    };
    let resource = generator
        .from_object(&bundle, &RequestContext::new())
        .unwrap();

    let Some(hal_engine::framework::Embedded::Many(widgets)) = resource.embedded("widgets") else {
        panic!("widgets should embed as an ordered sequence");
    };
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].self_link().unwrap().href(), "/widget/7");
    assert_eq!(widgets[1].self_link().unwrap().href(), "/widget/8");
}

#[test]
fn replacing_a_strategy_changes_subsequent_dispatch_only() {
    #[derive(Debug)]
    struct StubStrategy;

    impl ResourceStrategy for StubStrategy {
        fn create_resource(
            &self,
            _instance: &dyn Representable,
            _metadata: &dyn Metadata,
            _generator: &ResourceGenerator,
            _ctx: &RequestContext,
        ) -> Result<HalResource, GeneratorError> {
            let mut resource = HalResource::new();
            resource.push_property("stub", json!(true));
            Ok(resource)
        }
    }

    let mut generator = widget_generator(widget_metadata());
    let widget = Widget {
        id: 7,
        label: "gear".to_owned(),
    };

    let before = generator
        .from_object(&widget, &RequestContext::new())
        .unwrap();
    assert!(before.property("stub").is_none());

    generator.add_strategy(MetadataKind::ROUTE_RESOURCE, Arc::new(StubStrategy));
    let after = generator
        .from_object(&widget, &RequestContext::new())
        .unwrap();

    assert_eq!(after.property("stub"), Some(&json!(true)));
    // The resource produced before re-registration is untouched.
    assert!(before.property("stub").is_none());
    assert_eq!(before.self_link().unwrap().href(), "/widget/7");
}

#[test]
fn deferred_strategy_factory_runs_once_on_first_dispatch() {
    #[derive(Debug)]
    struct StubStrategy;

    impl ResourceStrategy for StubStrategy {
        fn create_resource(
            &self,
            _instance: &dyn Representable,
            _metadata: &dyn Metadata,
            _generator: &ResourceGenerator,
            _ctx: &RequestContext,
        ) -> Result<HalResource, GeneratorError> {
            Ok(HalResource::new())
        }
    }

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    let mut generator = widget_generator(widget_metadata());
    generator.add_deferred_strategy(MetadataKind::ROUTE_RESOURCE, || {
        BUILDS.fetch_add(1, Ordering::SeqCst);
        Arc::new(StubStrategy)
    });
    assert_eq!(BUILDS.load(Ordering::SeqCst), 0);

    let widget = Widget {
        id: 7,
        label: "gear".to_owned(),
    };
    generator
        .from_object(&widget, &RequestContext::new())
        .unwrap();
    generator
        .from_object(&widget, &RequestContext::new())
        .unwrap();

    assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
}

#[test]
fn metadata_kind_without_strategy_is_rejected() {
    #[derive(Debug)]
    struct CustomMetadata;

    impl Metadata for CustomMetadata {
        fn represented_type(&self) -> TypeKey {
            TypeKey::from_static("widget")
        }

        fn kind(&self) -> MetadataKind {
            MetadataKind("custom")
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    let mut metadata = MetadataMap::new();
    metadata.add(Arc::new(CustomMetadata));
    let generator = widget_generator(metadata);
    let widget = Widget {
        id: 7,
        label: "gear".to_owned(),
    };

    let err = generator
        .from_object(&widget, &RequestContext::new())
        .unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::UnexpectedMetadataType(kind) if kind == MetadataKind("custom")
    ));
}

#[test]
fn strategy_rejects_foreign_metadata_claiming_its_kind() {
    // Metadata whose discriminator says "route-resource" but whose concrete
    // type is not RouteResourceMetadata: the strategy's downcast guard
    // must catch the misregistration.
    #[derive(Debug)]
    struct ImpostorMetadata;

    impl Metadata for ImpostorMetadata {
        fn represented_type(&self) -> TypeKey {
            TypeKey::from_static("widget")
        }

        fn kind(&self) -> MetadataKind {
            MetadataKind::ROUTE_RESOURCE
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    let mut metadata = MetadataMap::new();
    metadata.add(Arc::new(ImpostorMetadata));
    let generator = widget_generator(metadata);
    let widget = Widget {
        id: 7,
        label: "gear".to_owned(),
    };

    let err = generator
        .from_object(&widget, &RequestContext::new())
        .unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::UnexpectedMetadataType(MetadataKind::ROUTE_RESOURCE)
    ));
}

#[test]
fn collection_metadata_on_non_paginated_instance_fails() {
    let mut metadata = MetadataMap::new();
    metadata.add(Arc::new(RouteCollectionMetadata::new(
        TypeKey::from_static("widget"),
        "widget",
        "widgets",
        "page",
        PaginationPlacement::Query,
    )));
    let generator = widget_generator(metadata);
    let widget = Widget {
        id: 7,
        label: "gear".to_owned(),
    };

    let err = generator
        .from_object(&widget, &RequestContext::new())
        .unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::Extraction(ExtractionError::NotPaginated(key)) if key.as_str() == "widget"
    ));
}

#[test]
fn extraction_failure_aborts_generation() {
    let mut extractors = ExtractorRegistry::new();
    extractors.register(
        "widget",
        Arc::new(FnExtractor::new(|_: &dyn Representable| {
            Err(ExtractionError::Other("backing store gone".into()))
        })),
    );
    let generator = ResourceGenerator::new(
        widget_metadata(),
        extractors,
        Arc::new(RecordingLinkGenerator::new()),
    );
    let widget = Widget {
        id: 7,
        label: "gear".to_owned(),
    };

    let err = generator
        .from_object(&widget, &RequestContext::new())
        .unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::Extraction(ExtractionError::Other(_))
    ));
}
