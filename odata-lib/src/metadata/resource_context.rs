//! Per-resource metadata context

use std::cell::OnceCell;

use log::trace;

use super::MetadataContext;
use super::SelectedProperties;
use super::TypeContext;
use super::memoize;
use crate::error::MetadataError;
use crate::error::Result;
use crate::model::ODataValue;
use crate::model::Property;
use crate::model::PropertyKind;
use crate::model::Resource;
use crate::model::metadata::EdmModel;
use crate::model::metadata::NavigationProperty;
use crate::model::metadata::NavigationSourceKind;
use crate::model::metadata::Operation;
use crate::model::metadata::StructuralProperty;

/// Key or ETag property name with its value.
pub type NamedValue = (String, ODataValue);

/// Where key, ETag and selection information comes from.
#[derive(Debug)]
enum Source<'a> {
    /// Everything is looked up in the model.
    Model(&'a EdmModel),
    /// Property kinds on the wire stand in for the model.
    SerializationInfo,
}

/// Joins a resource with its type context and the service context.
///
/// Key properties, ETag properties and the selected navigation properties,
/// stream properties and bindable operations are computed once and frozen.
#[derive(Debug)]
pub struct ResourceMetadataContext<'a> {
    resource: &'a Resource,
    type_context: TypeContext,
    metadata: &'a MetadataContext,
    selected: SelectedProperties,
    actual_type_name: String,
    requires_id: bool,
    source: Source<'a>,
    key_properties: OnceCell<Vec<NamedValue>>,
    etag_properties: OnceCell<Vec<NamedValue>>,
    selected_navigation_properties: OnceCell<Vec<&'a NavigationProperty>>,
    selected_stream_properties: OnceCell<Vec<&'a StructuralProperty>>,
    selected_bindable_operations: OnceCell<Vec<&'a Operation>>,
}

impl<'a> ResourceMetadataContext<'a> {
    /// Creates the context of one resource.
    ///
    /// The model is consulted only when the resource carries no serialization
    /// info. Without a model the resource must name its own type.
    ///
    /// `requires_id` is `false` for resources whose identity is optional
    /// (e.g., members of a delta payload); missing keys are then skipped
    /// instead of reported.
    pub fn new(
        resource: &'a Resource,
        type_context: TypeContext,
        metadata: &'a MetadataContext,
        selected: SelectedProperties,
        requires_id: bool,
    ) -> Result<Self> {
        let model = metadata.model().filter(|_| resource.serialization_info.is_none());
        let (source, actual_type_name) = match model {
            Some(model) => {
                let actual = resource
                    .type_name
                    .clone()
                    .unwrap_or_else(|| type_context.expected_resource_type_name.clone());
                (Source::Model(model), actual)
            }
            None => {
                let actual = resource
                    .type_name
                    .clone()
                    .ok_or(MetadataError::MissingTypeName)?;
                (Source::SerializationInfo, actual)
            }
        };

        Ok(Self {
            resource,
            type_context,
            metadata,
            selected,
            actual_type_name,
            requires_id,
            source,
            key_properties: OnceCell::new(),
            etag_properties: OnceCell::new(),
            selected_navigation_properties: OnceCell::new(),
            selected_stream_properties: OnceCell::new(),
            selected_bindable_operations: OnceCell::new(),
        })
    }

    pub fn resource(&self) -> &'a Resource {
        self.resource
    }

    pub fn type_context(&self) -> &TypeContext {
        &self.type_context
    }

    pub fn metadata(&self) -> &'a MetadataContext {
        self.metadata
    }

    /// The model, unless this context works from serialization info.
    pub fn model(&self) -> Option<&'a EdmModel> {
        match self.source {
            Source::Model(model) => Some(model),
            Source::SerializationInfo => None,
        }
    }

    pub fn selected(&self) -> &SelectedProperties {
        &self.selected
    }

    /// The resource's own type name, or the expected type when it has none.
    pub fn actual_type_name(&self) -> &str {
        &self.actual_type_name
    }

    pub fn requires_id(&self) -> bool {
        self.requires_id
    }

    /// Returns the key properties in key declaration order.
    ///
    /// # Errors
    ///
    /// Fails when a key value is null or structured, and, for resources that
    /// require an id, when keys are missing.
    pub fn key_properties(&self) -> Result<&[NamedValue]> {
        memoize(&self.key_properties, || self.compute_key_properties()).map(Vec::as_slice)
    }

    /// Returns the concurrency properties in annotation order.
    ///
    /// Null values are kept; they serialize as `null` in the ETag.
    pub fn etag_properties(&self) -> Result<&[NamedValue]> {
        memoize(&self.etag_properties, || self.compute_etag_properties()).map(Vec::as_slice)
    }

    /// Returns the navigation properties metadata is produced for.
    pub fn selected_navigation_properties(&self) -> &[&'a NavigationProperty] {
        self.selected_navigation_properties.get_or_init(|| {
            let Source::Model(model) = self.source else {
                return Vec::new();
            };
            let selected = self.selected.navigation_properties(model, &self.actual_type_name);
            match self.metadata.selector() {
                Some(selector) => selector.select_navigation_properties(&self.actual_type_name, selected),
                None => selected,
            }
        })
    }

    /// Returns the stream properties metadata is produced for.
    pub fn selected_stream_properties(&self) -> &[&'a StructuralProperty] {
        self.selected_stream_properties.get_or_init(|| {
            let Source::Model(model) = self.source else {
                return Vec::new();
            };
            let selected = self.selected.stream_properties(model, &self.actual_type_name);
            match self.metadata.selector() {
                Some(selector) => selector.select_stream_properties(&self.actual_type_name, selected),
                None => selected,
            }
        })
    }

    /// Returns the bindable operations metadata is produced for.
    pub fn selected_bindable_operations(&self) -> &[&'a Operation] {
        self.selected_bindable_operations.get_or_init(|| {
            let Source::Model(model) = self.source else {
                return Vec::new();
            };
            let selected = self.selected.bindable_operations(model, &self.actual_type_name);
            match self.metadata.selector() {
                Some(selector) => selector.select_bindable_operations(&self.actual_type_name, selected),
                None => selected,
            }
        })
    }

    fn compute_key_properties(&self) -> Result<Vec<NamedValue>> {
        let type_name = self.actual_type_name.as_str();
        let mut keys = Vec::new();

        match self.source {
            Source::Model(model) => {
                for name in model.key_names(type_name) {
                    match self.resource.property(name) {
                        Some(property) => {
                            if let Some(value) = self.key_value(property)? {
                                keys.push((name.clone(), value));
                            }
                        }
                        None if self.requires_id => {
                            return Err(MetadataError::key_not_found(type_name, name));
                        }
                        None => trace!("Skipping missing key property {name} of {type_name}"),
                    }
                }
            }
            Source::SerializationInfo => {
                for property in self.resource.properties.iter().filter(|p| p.kind() == PropertyKind::Key) {
                    if let Some(value) = self.key_value(property)? {
                        keys.push((property.name.clone(), value));
                    }
                }
            }
        }

        if keys.is_empty() && self.requires_id {
            return Err(MetadataError::missing_keys(type_name));
        }
        Ok(keys)
    }

    fn key_value(&self, property: &Property) -> Result<Option<ODataValue>> {
        let type_name = self.actual_type_name.as_str();
        if property.value.is_null() {
            if self.requires_id {
                return Err(MetadataError::null_key_value(type_name, &property.name));
            }
            return Ok(None);
        }
        if property.value.is_structured() {
            return Err(MetadataError::non_primitive(type_name, &property.name));
        }
        Ok(Some(property.value.clone()))
    }

    fn compute_etag_properties(&self) -> Result<Vec<NamedValue>> {
        let type_name = self.actual_type_name.as_str();

        match self.source {
            Source::Model(model) => {
                let annotated = matches!(
                    self.type_context.navigation_source_kind,
                    NavigationSourceKind::EntitySet | NavigationSourceKind::Singleton
                );
                let Some(source) = model
                    .find_navigation_source(&self.type_context.navigation_source_name)
                    .filter(|_| annotated)
                else {
                    return Ok(Vec::new());
                };

                let mut etags = Vec::new();
                for path in &source.optimistic_concurrency {
                    let name = path.rsplit('/').next().unwrap_or(path);
                    if model.find_property(type_name, name).is_none() {
                        return Err(MetadataError::missing_annotation_target(type_name, name));
                    }
                    let value = match self.resource.property(name) {
                        Some(property) => etag_value(type_name, property)?,
                        None => ODataValue::Null,
                    };
                    etags.push((name.to_string(), value));
                }
                Ok(etags)
            }
            Source::SerializationInfo => self
                .resource
                .properties
                .iter()
                .filter(|p| p.kind() == PropertyKind::ETag)
                .map(|p| Ok((p.name.clone(), etag_value(type_name, p)?)))
                .collect(),
        }
    }
}

fn etag_value(type_name: &str, property: &Property) -> Result<ODataValue> {
    if property.value.is_structured() {
        return Err(MetadataError::non_primitive(type_name, &property.name));
    }
    Ok(property.value.clone())
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::config::ConventionConfig;
    use crate::model::ResourceSerializationInfo;
    use crate::model::metadata::EntityType;
    use crate::model::metadata::NavigationSource;
    use crate::model::metadata::PrimitiveKind;
    use crate::model::metadata::PropertyType;

    fn service() -> MetadataContext {
        let model = EdmModel::new("Sales", "Container")
            .entity_type(
                EntityType::new("Sales", "Order")
                    .key("CustomerId", PrimitiveKind::Int32)
                    .key("OrderId", PrimitiveKind::Int32)
                    .property("Version", PropertyType::Primitive(PrimitiveKind::Int64))
                    .property("Receipt", PropertyType::Stream),
            )
            .source(
                NavigationSource::entity_set("Orders", "Sales.Order").with_concurrency(["Version"]),
            )
            .source(
                NavigationSource::entity_set("Broken", "Sales.Order").with_concurrency(["Missing"]),
            );
        MetadataContext::new(Url::parse("http://host/").unwrap(), ConventionConfig::default())
            .unwrap()
            .with_model(model)
    }

    fn context<'a>(
        service: &'a MetadataContext,
        resource: &'a Resource,
        source: &str,
        requires_id: bool,
    ) -> ResourceMetadataContext<'a> {
        let type_context = service.type_context_for_source(source).unwrap();
        ResourceMetadataContext::new(
            resource,
            type_context,
            service,
            SelectedProperties::EntireSubtree,
            requires_id,
        )
        .unwrap()
    }

    #[test]
    fn test_key_properties_follow_declaration_order() {
        let service = service();
        let order = Resource::new("Sales.Order").set("OrderId", 2i32).set("CustomerId", 1i32);
        let context = context(&service, &order, "Orders", true);
        let keys: Vec<_> = context.key_properties().unwrap().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["CustomerId", "OrderId"]);
    }

    #[test]
    fn test_missing_key_depends_on_requires_id() {
        let service = service();
        let order = Resource::new("Sales.Order").set("OrderId", 2i32);

        let required = context(&service, &order, "Orders", true);
        assert_eq!(
            required.key_properties(),
            Err(MetadataError::key_not_found("Sales.Order", "CustomerId"))
        );

        let optional = context(&service, &order, "Orders", false);
        assert_eq!(optional.key_properties().unwrap().len(), 1);
    }

    #[test]
    fn test_null_and_structured_keys() {
        let service = service();
        let order = Resource::new("Sales.Order")
            .set("CustomerId", ODataValue::Null)
            .set("OrderId", 2i32);
        assert_eq!(
            context(&service, &order, "Orders", true).key_properties(),
            Err(MetadataError::null_key_value("Sales.Order", "CustomerId"))
        );

        let order = Resource::new("Sales.Order")
            .set("CustomerId", ODataValue::Collection(vec![]))
            .set("OrderId", 2i32);
        assert_eq!(
            context(&service, &order, "Orders", true).key_properties(),
            Err(MetadataError::non_primitive("Sales.Order", "CustomerId"))
        );
    }

    #[test]
    fn test_etag_properties_from_annotation() {
        let service = service();
        let order = Resource::new("Sales.Order")
            .set("CustomerId", 1i32)
            .set("OrderId", 2i32)
            .set("Version", 7i64);
        let context = context(&service, &order, "Orders", true);
        assert_eq!(
            context.etag_properties().unwrap(),
            [("Version".to_string(), ODataValue::Int64(7))]
        );

        let unversioned = Resource::new("Sales.Order").set("CustomerId", 1i32).set("OrderId", 2i32);
        let context = self::context(&service, &unversioned, "Orders", true);
        assert_eq!(
            context.etag_properties().unwrap(),
            [("Version".to_string(), ODataValue::Null)]
        );
    }

    #[test]
    fn test_etag_annotation_target_must_exist() {
        let service = service();
        let order = Resource::new("Sales.Order");
        let context = context(&service, &order, "Broken", true);
        assert_eq!(
            context.etag_properties(),
            Err(MetadataError::missing_annotation_target("Sales.Order", "Missing"))
        );
    }

    #[test]
    fn test_serialization_info_replaces_model() {
        let service = service();
        let order = Resource::new("Sales.Order")
            .set_with_kind("Code", "A1", PropertyKind::Key)
            .set_with_kind("Stamp", 3i32, PropertyKind::ETag)
            .set("Note", "ignored")
            .with_serialization_info(ResourceSerializationInfo::entity_set("Orders", "Sales.Order"));
        let type_context =
            TypeContext::from_serialization_info(order.serialization_info.as_ref().unwrap());
        let context = ResourceMetadataContext::new(
            &order,
            type_context,
            &service,
            SelectedProperties::EntireSubtree,
            true,
        )
        .unwrap();

        assert!(context.model().is_none());
        assert_eq!(context.key_properties().unwrap()[0].0, "Code");
        assert_eq!(context.etag_properties().unwrap()[0].0, "Stamp");
        assert!(context.selected_stream_properties().is_empty());
        assert!(context.selected_bindable_operations().is_empty());
    }

    #[test]
    fn test_missing_type_name_without_model() {
        let service = MetadataContext::new(Url::parse("http://host/").unwrap(), ConventionConfig::default())
            .unwrap();
        let resource = Resource::untyped();
        let result = ResourceMetadataContext::new(
            &resource,
            TypeContext::unknown("Sales.Order"),
            &service,
            SelectedProperties::EntireSubtree,
            true,
        );
        assert_eq!(result.err(), Some(MetadataError::MissingTypeName));
    }

    #[test]
    fn test_selected_stream_properties() {
        let service = service();
        let order = Resource::new("Sales.Order");
        let context = context(&service, &order, "Orders", false);
        let streams: Vec<_> = context
            .selected_stream_properties()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(streams, ["Receipt"]);
    }
}
