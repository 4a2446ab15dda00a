//! End-to-end tests for convention-computed resource metadata.

use std::rc::Rc;

use odata_lib::config::ConventionConfig;
use odata_lib::error::MetadataError;
use odata_lib::metadata::{
    ConventionalIdMetadataBuilder, ConventionalMetadataBuilder, IdForSerialization, MetadataBuilder,
    MetadataContext, MetadataSelector, ResourceMetadataBuilder, ResourceMetadataContext,
    SelectedProperties, TypeContext,
};
use odata_lib::model::metadata::{
    EdmModel, EntityType, NavigationProperty, NavigationSource, Operation, PrimitiveKind, PropertyType,
};
use odata_lib::model::types::StreamReference;
use odata_lib::model::{ODataValue, OperationKind, PropertyKind, Resource, ResourceOperation, ResourceSerializationInfo};
use odata_lib::uri::{LiteralFormatter, ODataPath};
use url::Url;

fn model() -> EdmModel {
    EdmModel::new("Sales", "Container")
        .entity_type(
            EntityType::new("Sales", "Customer")
                .key("Id", PrimitiveKind::Int32)
                .property("Name", PropertyType::Primitive(PrimitiveKind::String))
                .property("Version", PropertyType::Primitive(PrimitiveKind::Int64))
                .property("Comment", PropertyType::Primitive(PrimitiveKind::String))
                .property("Photo", PropertyType::Stream)
                .navigation(NavigationProperty::collection("Orders", "Sales.Order").contained())
                .navigation(NavigationProperty::single("Profile", "Sales.Profile").contained())
                .navigation(NavigationProperty::single("Manager", "Sales.Customer")),
        )
        .entity_type(
            EntityType::new("Sales", "VipCustomer")
                .derived_from("Sales.Customer")
                .navigation(NavigationProperty::collection("Perks", "Sales.Perk").contained()),
        )
        .entity_type(
            EntityType::new("Sales", "Order")
                .key("OrderId", PrimitiveKind::Int32)
                .property("Total", PropertyType::Primitive(PrimitiveKind::Decimal)),
        )
        .entity_type(EntityType::new("Sales", "Profile").key("Id", PrimitiveKind::Int32))
        .entity_type(EntityType::new("Sales", "Perk").key("Code", PrimitiveKind::String))
        .entity_type(
            EntityType::new("Sales", "Document")
                .key("Id", PrimitiveKind::Int32)
                .with_stream(),
        )
        .source(
            NavigationSource::entity_set("Customers", "Sales.Customer")
                .with_concurrency(["Version", "Comment"]),
        )
        .source(NavigationSource::singleton("Me", "Sales.Customer"))
        .source(NavigationSource::entity_set("Documents", "Sales.Document"))
        .operation(Operation::bound_action("Sales", "Approve", "Sales.Customer"))
        .operation(Operation::bound_function("Sales", "Rank", "Sales.VipCustomer"))
        .operation(
            Operation::bound_function("Sales", "Rank", "Sales.VipCustomer").parameter("year", "Edm.Int32"),
        )
}

fn service_with(config: ConventionConfig) -> MetadataContext {
    MetadataContext::new(Url::parse("http://host/").unwrap(), config)
        .unwrap()
        .with_model(model())
}

fn service() -> MetadataContext {
    service_with(ConventionConfig::default())
}

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn conventional<'a>(
    service: &'a MetadataContext,
    resource: &'a Resource,
    type_context: TypeContext,
) -> ConventionalMetadataBuilder<'a> {
    let context = ResourceMetadataContext::new(
        resource,
        type_context,
        service,
        SelectedProperties::EntireSubtree,
        true,
    )
    .unwrap();
    ConventionalMetadataBuilder::new(context)
}

fn in_source<'a>(service: &'a MetadataContext, resource: &'a Resource, source: &str) -> Rc<MetadataBuilder<'a>> {
    let type_context = service.type_context_for_source(source).unwrap();
    Rc::new(conventional(service, resource, type_context).into())
}

fn customer(id: i32) -> Resource {
    Resource::new("Sales.Customer")
        .set("Id", id)
        .set("Name", "Ann")
        .set("Version", 3i64)
        .set("Comment", ODataValue::Null)
}

fn vip(id: i32) -> Resource {
    Resource {
        type_name: Some("Sales.VipCustomer".to_string()),
        ..customer(id)
    }
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_entity_set_id() {
    let service = service();
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(builder.get_id().unwrap(), Some(url("http://host/Customers(5)")));
}

#[test]
fn test_entity_set_id_with_keys_as_segments() {
    let service = service_with(ConventionConfig::default().with_keys_as_segments());
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(builder.get_id().unwrap(), Some(url("http://host/Customers/5")));
}

#[test]
fn test_singleton_id_has_no_key() {
    let service = service();
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Me");

    assert_eq!(builder.get_id().unwrap(), Some(url("http://host/Me")));
    assert_eq!(builder.get_edit_link().unwrap(), Some(url("http://host/Me")));
}

#[test]
fn test_id_is_idempotent() {
    let service = service();
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    let first = builder.get_id().unwrap();
    let second = builder.get_id().unwrap();
    assert_eq!(first, second);
    assert_eq!(builder.get_etag().unwrap(), builder.get_etag().unwrap());
    assert_eq!(builder.get_actions().unwrap(), builder.get_actions().unwrap());
}

#[test]
fn test_explicit_values_take_precedence() {
    let service = service();
    let resource = customer(5)
        .with_id(url("http://other/people/1"))
        .with_edit_link(url("http://other/edit/1"))
        .with_read_link(url("http://other/read/1"))
        .with_etag("W/\"explicit\"");
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(builder.get_id().unwrap(), Some(url("http://other/people/1")));
    assert_eq!(builder.get_edit_link().unwrap(), Some(url("http://other/edit/1")));
    assert_eq!(builder.get_read_link().unwrap(), Some(url("http://other/read/1")));
    assert_eq!(builder.get_etag().unwrap().as_deref(), Some("W/\"explicit\""));
}

#[test]
fn test_transient_resource_has_no_id() {
    let service = service();
    let resource = customer(5).transient();
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(builder.get_id().unwrap(), None);
    assert_eq!(builder.get_edit_link().unwrap(), None);
    assert_eq!(
        builder.try_get_id_for_serialization().unwrap(),
        IdForSerialization::Transient
    );
}

#[test]
fn test_id_for_serialization() {
    let service = service();
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(
        builder.try_get_id_for_serialization().unwrap(),
        IdForSerialization::Id(url("http://host/Customers(5)"))
    );
}

#[test]
fn test_unknown_navigation_source() {
    let service = service();
    let resource = customer(5);
    let builder: MetadataBuilder = conventional(&service, &resource, TypeContext::unknown("Sales.Customer")).into();

    assert!(matches!(
        builder.get_id(),
        Err(MetadataError::UnknownNavigationSourceKind { .. })
    ));
}

#[test]
fn test_missing_key_is_reported() {
    let service = service();
    let resource = Resource::new("Sales.Customer").set("Name", "Ann");
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(
        builder.get_id(),
        Err(MetadataError::key_not_found("Sales.Customer", "Id"))
    );
}

#[test]
fn test_unsigned_key_is_widened() {
    let model = EdmModel::new("Sales", "Container")
        .entity_type(EntityType::new("Sales", "Counter").key("Id", PrimitiveKind::Int64))
        .source(NavigationSource::entity_set("Counters", "Sales.Counter"));
    let service = MetadataContext::new(url("http://host/"), ConventionConfig::default())
        .unwrap()
        .with_model(model);
    let resource = Resource::new("Sales.Counter").set("Id", 7u32);
    let builder = in_source(&service, &resource, "Counters");

    assert_eq!(builder.get_id().unwrap(), Some(url("http://host/Counters(7)")));
}

// ============================================================================
// Links
// ============================================================================

#[test]
fn test_derived_type_edit_link_has_cast() {
    let service = service();
    let resource = vip(5);
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(builder.get_id().unwrap(), Some(url("http://host/Customers(5)")));
    assert_eq!(
        builder.get_edit_link().unwrap(),
        Some(url("http://host/Customers(5)/Sales.VipCustomer"))
    );
    assert_eq!(builder.get_read_link().unwrap(), builder.get_edit_link().unwrap());
}

#[test]
fn test_read_only_resource_gets_no_edit_link() {
    let service = service();
    let resource = customer(5).with_read_link(url("http://host/readonly/5"));
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(builder.get_edit_link().unwrap(), None);
    assert_eq!(builder.get_read_link().unwrap(), Some(url("http://host/readonly/5")));
    assert_eq!(
        builder.get_navigation_link_uri("Orders", None).unwrap(),
        Some(url("http://host/readonly/5/Orders"))
    );
}

#[test]
fn test_navigation_and_association_links() {
    let service = service();
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(
        builder.get_navigation_link_uri("Orders", None).unwrap(),
        Some(url("http://host/Customers(5)/Orders"))
    );
    assert_eq!(
        builder.get_association_link_uri("Orders", None).unwrap(),
        Some(url("http://host/Customers(5)/Orders/$ref"))
    );

    let explicit = url("http://elsewhere/orders");
    assert_eq!(
        builder.get_navigation_link_uri("Orders", Some(&explicit)).unwrap(),
        Some(explicit)
    );
}

#[test]
fn test_unprocessed_navigation_links() {
    let service = service();
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    builder.mark_nested_resource_info_processed("Orders");

    let profile = builder.get_next_unprocessed_navigation_link().unwrap().unwrap();
    assert_eq!(profile.name, "Profile");
    assert!(!profile.is_collection);
    assert_eq!(profile.url, Some(url("http://host/Customers(5)/Profile")));
    assert_eq!(
        profile.association_link_url,
        Some(url("http://host/Customers(5)/Profile/$ref"))
    );

    let manager = builder.get_next_unprocessed_navigation_link().unwrap().unwrap();
    assert_eq!(manager.name, "Manager");
    assert!(builder.get_next_unprocessed_navigation_link().unwrap().is_none());
}

#[test]
fn test_media_resource() {
    let service = service();
    let document = Resource::new("Sales.Document").set("Id", 1i32);
    let builder = in_source(&service, &document, "Documents");

    let media = builder.get_media_resource().unwrap().unwrap();
    assert_eq!(media.edit_link, Some(url("http://host/Documents(1)/$value")));
    assert_eq!(media.read_link, Some(url("http://host/Documents(1)/$value")));

    // Customers are not media-link entries.
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");
    assert_eq!(builder.get_media_resource().unwrap(), None);
}

#[test]
fn test_explicit_media_resource() {
    let service = service();
    let media = StreamReference::new().with_read_link(url("http://cdn/doc.pdf"));
    let document = Resource::new("Sales.Document")
        .set("Id", 1i32)
        .with_media_resource(media.clone());
    let builder = in_source(&service, &document, "Documents");

    assert_eq!(builder.get_media_resource().unwrap(), Some(media));
}

#[test]
fn test_stream_properties_appear_after_end() {
    let service = service();
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    builder.start_resource();
    assert_eq!(builder.get_properties().unwrap(), resource.properties);

    builder.end_resource();
    let properties = builder.get_properties().unwrap();
    assert_eq!(properties.len(), resource.properties.len() + 1);

    let photo = properties.last().unwrap();
    assert_eq!(photo.name, "Photo");
    let ODataValue::Stream(reference) = &photo.value else {
        panic!("expected a stream value");
    };
    assert_eq!(reference.edit_link, Some(url("http://host/Customers(5)/Photo")));
}

// ============================================================================
// ETag
// ============================================================================

#[test]
fn test_etag_with_null_value() {
    let service = service();
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(builder.get_etag().unwrap().as_deref(), Some("W/\"3,null\""));
}

#[test]
fn test_etag_literals_are_encoded() {
    let service = service();
    let resource = Resource::new("Sales.Customer")
        .set("Id", 5i32)
        .set("Version", 3i64)
        .set("Comment", "a b");
    let builder = in_source(&service, &resource, "Customers");

    assert_eq!(
        builder.get_etag().unwrap().as_deref(),
        Some("W/\"3,%27a%20b%27\"")
    );
}

#[test]
fn test_no_etag_without_concurrency_properties() {
    let service = service();
    let document = Resource::new("Sales.Document").set("Id", 1i32);
    let builder = in_source(&service, &document, "Documents");

    assert_eq!(builder.get_etag().unwrap(), None);
}

#[test]
fn test_double_literal_marker() {
    assert_eq!(LiteralFormatter::FOR_CONSTANTS.format(&ODataValue::Double(5.0)).unwrap(), "5.0");
    assert_eq!(LiteralFormatter::FOR_CONSTANTS.format(&ODataValue::Double(5.5)).unwrap(), "5.5");
}

// ============================================================================
// Containment
// ============================================================================

#[test]
fn test_contained_collection_through_parent() {
    let service = service();
    let parent_resource = customer(5);
    let order = Resource::new("Sales.Order").set("OrderId", 10i32);

    let parent = in_source(&service, &parent_resource, "Customers");

    let type_context = service
        .type_context_for_containment("Sales.Customer", "Orders")
        .unwrap();
    let child: MetadataBuilder = conventional(&service, &order, type_context)
        .with_parent(Rc::downgrade(&parent))
        .into();

    assert_eq!(
        child.get_id().unwrap(),
        Some(url("http://host/Customers(5)/Orders(10)"))
    );
}

#[test]
fn test_contained_single_through_parent() {
    let service = service();
    let parent_resource = customer(5);
    let profile = Resource::new("Sales.Profile").set("Id", 1i32);

    let parent = in_source(&service, &parent_resource, "Customers");

    let type_context = service
        .type_context_for_containment("Sales.Customer", "Profile")
        .unwrap();
    let child: MetadataBuilder = conventional(&service, &profile, type_context)
        .with_parent(Rc::downgrade(&parent))
        .into();

    assert_eq!(
        child.get_id().unwrap(),
        Some(url("http://host/Customers(5)/Profile"))
    );
}

#[test]
fn test_contained_under_derived_parent() {
    let service = service();
    let parent_resource = vip(5);
    let perk = Resource::new("Sales.Perk").set("Code", "A");
    let order = Resource::new("Sales.Order").set("OrderId", 10i32);

    let parent = in_source(&service, &parent_resource, "Customers");

    // Perks is declared on the derived type only: the parent needs a cast.
    let type_context = service
        .type_context_for_containment("Sales.VipCustomer", "Perks")
        .unwrap();
    let child: MetadataBuilder = conventional(&service, &perk, type_context)
        .with_parent(Rc::downgrade(&parent))
        .into();
    assert_eq!(
        child.get_id().unwrap(),
        Some(url("http://host/Customers(5)/Sales.VipCustomer/Perks(%27A%27)"))
    );

    // Orders is declared on the expected type: no cast.
    let type_context = service
        .type_context_for_containment("Sales.Customer", "Orders")
        .unwrap();
    let child: MetadataBuilder = conventional(&service, &order, type_context)
        .with_parent(Rc::downgrade(&parent))
        .into();
    assert_eq!(
        child.get_id().unwrap(),
        Some(url("http://host/Customers(5)/Orders(10)"))
    );
}

#[test]
fn test_contained_through_request_path() {
    let path = ODataPath::new()
        .entity_set("Customers", "Sales.Customer")
        .key([("Id", ODataValue::Int32(5))])
        .navigation("Orders", "Sales.Order", true);
    let service = service().with_request_path(path);

    let order = Resource::new("Sales.Order").set("OrderId", 10i32);
    let type_context = service
        .type_context_for_containment("Sales.Customer", "Orders")
        .unwrap();
    let builder: MetadataBuilder = conventional(&service, &order, type_context).into();

    assert_eq!(
        builder.get_id().unwrap(),
        Some(url("http://host/Customers(5)/Orders(10)"))
    );
}

#[test]
fn test_request_path_trims_redundant_cast() {
    let path = ODataPath::new()
        .entity_set("Customers", "Sales.Customer")
        .key([("Id", ODataValue::Int32(5))])
        .type_cast("Sales.VipCustomer")
        .navigation("Orders", "Sales.Order", true);
    let service = service().with_request_path(path);

    let order = Resource::new("Sales.Order").set("OrderId", 10i32);
    let type_context = service
        .type_context_for_containment("Sales.Customer", "Orders")
        .unwrap();
    let builder: MetadataBuilder = conventional(&service, &order, type_context).into();

    assert_eq!(
        builder.get_id().unwrap(),
        Some(url("http://host/Customers(5)/Orders(10)"))
    );
}

#[test]
fn test_request_path_keeps_required_cast() {
    let path = ODataPath::new()
        .entity_set("Customers", "Sales.Customer")
        .key([("Id", ODataValue::Int32(5))])
        .type_cast("Sales.VipCustomer")
        .navigation("Perks", "Sales.Perk", true);
    let service = service().with_request_path(path);

    let perk = Resource::new("Sales.Perk").set("Code", "A");
    let type_context = service
        .type_context_for_containment("Sales.VipCustomer", "Perks")
        .unwrap();
    let builder: MetadataBuilder = conventional(&service, &perk, type_context).into();

    assert_eq!(
        builder.get_id().unwrap(),
        Some(url("http://host/Customers(5)/Sales.VipCustomer/Perks(%27A%27)"))
    );
}

#[test]
fn test_containment_without_parent_or_path() {
    let service = service();
    let order = Resource::new("Sales.Order").set("OrderId", 10i32);
    let type_context = service
        .type_context_for_containment("Sales.Customer", "Orders")
        .unwrap();
    let builder: MetadataBuilder = conventional(&service, &order, type_context).into();

    assert!(matches!(
        builder.get_id(),
        Err(MetadataError::MissingContainmentContext { .. })
    ));
}

#[test]
fn test_parent_errors_propagate() {
    let service = service();
    let parent_resource = Resource::new("Sales.Customer").set("Name", "no key");
    let order = Resource::new("Sales.Order").set("OrderId", 10i32);

    let parent = in_source(&service, &parent_resource, "Customers");

    let type_context = service
        .type_context_for_containment("Sales.Customer", "Orders")
        .unwrap();
    let child: MetadataBuilder = conventional(&service, &order, type_context)
        .with_parent(Rc::downgrade(&parent))
        .into();

    let err = child.get_id().unwrap_err();
    assert_eq!(err, MetadataError::key_not_found("Sales.Customer", "Id"));
    assert_eq!(err.type_name(), Some("Sales.Customer"));
    assert_eq!(err.property(), Some("Id"));
}

// ============================================================================
// Operations
// ============================================================================

#[test]
fn test_missing_actions_are_synthesized() {
    let service = service();
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    let actions = builder.get_actions().unwrap();
    assert_eq!(
        actions,
        [ResourceOperation {
            kind: OperationKind::Action,
            metadata: "http://host/$metadata#Sales.Approve".to_string(),
            title: Some("Sales.Approve".to_string()),
            target: Some(url("http://host/Customers(5)/Sales.Approve")),
        }]
    );
    assert!(builder.get_functions().unwrap().is_empty());
}

#[test]
fn test_parameterised_operations_have_bare_targets() {
    let model = model()
        .operation(Operation::bound_action("Sales", "Submit", "Sales.Customer").parameter("note", "Edm.String"))
        .operation(Operation::bound_function("Sales", "Top", "Sales.Customer").parameter("year", "Edm.Int32"));
    let service = MetadataContext::new(url("http://host/"), ConventionConfig::default())
        .unwrap()
        .with_model(model);
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    let actions = builder.get_actions().unwrap();
    assert_eq!(actions[1].metadata, "http://host/$metadata#Sales.Submit");
    assert_eq!(actions[1].target, Some(url("http://host/Customers(5)/Sales.Submit")));

    let functions = builder.get_functions().unwrap();
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].metadata, "http://host/$metadata#Sales.Top");
    assert_eq!(functions[0].target, Some(url("http://host/Customers(5)/Sales.Top")));
}

#[test]
fn test_overloaded_functions_and_binding_cast() {
    let service = service();
    let resource = vip(5);
    let builder = in_source(&service, &resource, "Customers");

    let functions = builder.get_functions().unwrap();
    let summary: Vec<_> = functions
        .iter()
        .map(|f| (f.metadata.as_str(), f.target.as_ref().map(Url::as_str)))
        .collect();
    assert_eq!(
        summary,
        [
            (
                "http://host/$metadata#Sales.Rank()",
                Some("http://host/Customers(5)/Sales.VipCustomer/Sales.Rank")
            ),
            (
                "http://host/$metadata#Sales.Rank(year)",
                Some("http://host/Customers(5)/Sales.VipCustomer/Sales.Rank(year=year)")
            ),
        ]
    );

    // Approve is bound to the base type, so its target casts the id.
    let actions = builder.get_actions().unwrap();
    assert_eq!(
        actions[0].target,
        Some(url("http://host/Customers(5)/Sales.Customer/Sales.Approve"))
    );
}

#[test]
fn test_advertised_operations_are_not_duplicated() {
    let service = service();
    let resource = customer(5).with_action(ResourceOperation::action("#Sales.Approve"));
    let builder = in_source(&service, &resource, "Customers");

    let actions = builder.get_actions().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].metadata, "#Sales.Approve");
    assert_eq!(actions[0].target, None);
}

#[test]
fn test_selection_limits_operations() {
    let service = service();
    let resource = customer(5);
    let context = ResourceMetadataContext::new(
        &resource,
        service.type_context_for_source("Customers").unwrap(),
        &service,
        SelectedProperties::from_paths(["*"]),
        true,
    )
    .unwrap();
    let builder = MetadataBuilder::conventional(context);

    assert!(builder.get_actions().unwrap().is_empty());
    assert!(builder.get_next_unprocessed_navigation_link().unwrap().is_some());
}

struct NoOperations;

impl MetadataSelector for NoOperations {
    fn select_bindable_operations<'m>(&self, _type_name: &str, _operations: Vec<&'m Operation>) -> Vec<&'m Operation> {
        Vec::new()
    }
}

#[test]
fn test_selector_hook() {
    let service = service().with_selector(NoOperations);
    let resource = customer(5);
    let builder = in_source(&service, &resource, "Customers");

    assert!(builder.get_actions().unwrap().is_empty());
    assert!(builder.get_next_unprocessed_navigation_link().unwrap().is_some());
}

// ============================================================================
// Builder variants
// ============================================================================

#[test]
fn test_id_only_builder() {
    let service = service();
    let resource = customer(5);
    let context = ResourceMetadataContext::new(
        &resource,
        service.type_context_for_source("Customers").unwrap(),
        &service,
        SelectedProperties::EntireSubtree,
        true,
    )
    .unwrap();
    let builder: MetadataBuilder = ConventionalIdMetadataBuilder::new(context).into();

    assert_eq!(builder.get_id().unwrap(), Some(url("http://host/Customers(5)")));
    assert_eq!(builder.get_edit_link().unwrap(), None);
    assert_eq!(builder.get_etag().unwrap(), None);
    assert_eq!(builder.get_navigation_link_uri("Orders", None).unwrap(), None);
    assert!(builder.get_actions().unwrap().is_empty());
}

#[test]
fn test_no_op_builder() {
    let resource = customer(5).with_edit_link(url("http://host/edit/5"));
    let builder = MetadataBuilder::no_op(&resource);

    assert_eq!(builder.get_id().unwrap(), None);
    assert_eq!(builder.get_edit_link().unwrap(), Some(url("http://host/edit/5")));
    assert_eq!(builder.get_canonical_url().unwrap(), Some(url("http://host/edit/5")));
    assert_eq!(builder.get_properties().unwrap(), resource.properties);
    assert_eq!(
        builder.try_get_id_for_serialization().unwrap(),
        IdForSerialization::Unavailable
    );
}

#[test]
fn test_null_builder() {
    let builder = MetadataBuilder::null();

    assert_eq!(builder.get_id().unwrap(), None);
    assert_eq!(builder.get_read_link().unwrap(), None);
    assert!(builder.get_properties().unwrap().is_empty());
    assert!(builder.get_next_unprocessed_navigation_link().unwrap().is_none());
}

#[test]
fn test_without_model() {
    let service = MetadataContext::new(url("http://host/"), ConventionConfig::default()).unwrap();
    let info = ResourceSerializationInfo::entity_set("Orders", "Sales.Order");
    let resource = Resource::new("Sales.Order")
        .set_with_kind("OrderId", 10i32, PropertyKind::Key)
        .set_with_kind("Stamp", 4i32, PropertyKind::ETag)
        .with_serialization_info(info.clone());
    let context = ResourceMetadataContext::new(
        &resource,
        TypeContext::from_serialization_info(&info),
        &service,
        SelectedProperties::EntireSubtree,
        true,
    )
    .unwrap();
    let builder = MetadataBuilder::conventional(context);

    assert_eq!(builder.get_id().unwrap(), Some(url("http://host/Orders(10)")));
    assert_eq!(builder.get_etag().unwrap().as_deref(), Some("W/\"4\""));
    assert!(builder.get_actions().unwrap().is_empty());
    assert!(builder.get_next_unprocessed_navigation_link().unwrap().is_none());
}

#[test]
fn test_builder_flags_override_type_context() {
    let service = service();
    let parent_resource = customer(5);
    let order = Resource::new("Sales.Order").set("OrderId", 10i32);

    let parent = in_source(&service, &parent_resource, "Customers");

    // A single order reached through a renamed property of the same shape.
    let type_context = service
        .type_context_for_containment("Sales.Customer", "Orders")
        .unwrap();
    let builder = conventional(&service, &order, type_context)
        .with_parent(Rc::downgrade(&parent))
        .name_as_property("LatestOrder")
        .from_collection(false);
    assert!(!builder.is_from_collection());

    let child: MetadataBuilder = builder.into();
    assert_eq!(
        child.get_id().unwrap(),
        Some(url("http://host/Customers(5)/LatestOrder"))
    );
}
