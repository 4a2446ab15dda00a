//! Full convention-based metadata builder

use std::cell::Cell;
use std::cell::OnceCell;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Weak;

use log::debug;
use url::Url;

use super::IdForSerialization;
use super::MetadataBuilder;
use super::ResourceMetadataBuilder;
use super::ResourceState;
use super::id_for_serialization;
use super::identity::Identity;
use crate::error::Result;
use crate::metadata::ComputedOperation;
use crate::metadata::MissingOperationGenerator;
use crate::metadata::ResourceMetadataContext;
use crate::metadata::memoize;
use crate::model::NestedResourceInfo;
use crate::model::ODataValue;
use crate::model::Property;
use crate::model::Resource;
use crate::model::ResourceOperation;
use crate::model::types::StreamReference;
use crate::uri::ConventionalUriBuilder;

/// Computes every piece of resource metadata the payload left out.
///
/// Used for response payloads written or read with a full model. Each facet
/// prefers the explicit wire value, is never computed for transient
/// resources where it depends on identity, and is otherwise computed once.
#[derive(Debug)]
pub struct ConventionalMetadataBuilder<'a> {
    identity: Identity<'a>,
    state: Cell<ResourceState>,
    computed_edit_link: OnceCell<Option<Url>>,
    computed_read_link: OnceCell<Option<Url>>,
    computed_etag: OnceCell<Option<String>>,
    computed_media_resource: OnceCell<Option<StreamReference>>,
    computed_stream_properties: OnceCell<Vec<Property>>,
    computed_actions: OnceCell<Vec<ResourceOperation>>,
    computed_functions: OnceCell<Vec<ResourceOperation>>,
    missing_operations: MissingOperationGenerator,
    processed_nested_resource_infos: RefCell<HashSet<String>>,
    navigation_cursor: Cell<usize>,
}

impl<'a> ConventionalMetadataBuilder<'a> {
    pub fn new(context: ResourceMetadataContext<'a>) -> Self {
        Self {
            identity: Identity::new(context),
            state: Cell::new(ResourceState::NotStarted),
            computed_edit_link: OnceCell::new(),
            computed_read_link: OnceCell::new(),
            computed_etag: OnceCell::new(),
            computed_media_resource: OnceCell::new(),
            computed_stream_properties: OnceCell::new(),
            computed_actions: OnceCell::new(),
            computed_functions: OnceCell::new(),
            missing_operations: MissingOperationGenerator::new(),
            processed_nested_resource_infos: RefCell::new(HashSet::new()),
            navigation_cursor: Cell::new(0),
        }
    }

    /// Points at the builder of the resource containing this one.
    pub fn with_parent(mut self, parent: Weak<MetadataBuilder<'a>>) -> Self {
        self.identity.set_parent(parent);
        self
    }

    /// Overrides whether the resource is a member of a collection.
    pub fn from_collection(mut self, is_from_collection: bool) -> Self {
        self.identity.set_from_collection(is_from_collection);
        self
    }

    /// Sets the name of the property whose value this resource is.
    pub fn name_as_property(mut self, name: impl Into<String>) -> Self {
        self.identity.set_name_as_property(name.into());
        self
    }

    pub fn is_from_collection(&self) -> bool {
        self.identity.is_from_collection()
    }

    pub fn state(&self) -> ResourceState {
        self.state.get()
    }

    fn context(&self) -> &ResourceMetadataContext<'a> {
        self.identity.context()
    }

    fn resource(&self) -> &'a Resource {
        self.context().resource()
    }

    fn uri_builder(&self) -> &'a ConventionalUriBuilder {
        self.identity.uri_builder()
    }

    fn compute_edit_link(&self) -> Result<Option<Url>> {
        let Some(id) = self.identity.id()? else {
            return Ok(None);
        };
        let context = self.context();
        let actual = context.actual_type_name();
        if actual != context.type_context().navigation_source_entity_type_name {
            return self.uri_builder().append_type_segment(&id, actual).map(Some);
        }
        Ok(Some(id))
    }

    fn compute_etag(&self) -> Result<Option<String>> {
        let properties = self.context().etag_properties()?;
        if properties.is_empty() {
            return Ok(None);
        }

        let formatter = self.context().metadata().literal_formatter();
        let mut etag = String::from("W/\"");
        for (i, (_, value)) in properties.iter().enumerate() {
            if i > 0 {
                etag.push(',');
            }
            match value {
                ODataValue::Null => etag.push_str("null"),
                value => etag.push_str(&formatter.format(value)?),
            }
        }
        etag.push('"');
        Ok(Some(etag))
    }

    fn compute_media_resource(&self) -> Result<Option<StreamReference>> {
        if !self.context().type_context().is_media_link_entry {
            return Ok(None);
        }
        Ok(Some(StreamReference {
            edit_link: self.get_stream_edit_link(None)?,
            read_link: self.get_stream_read_link(None)?,
            ..StreamReference::default()
        }))
    }

    /// Selected stream properties the wire did not carry, links computed.
    fn compute_stream_properties(&self) -> Result<Vec<Property>> {
        let resource = self.resource();
        let mut properties = Vec::new();
        for stream in self.context().selected_stream_properties() {
            if resource.property(&stream.name).is_some() {
                continue;
            }
            let reference = StreamReference {
                edit_link: self.get_stream_edit_link(Some(stream.name.as_str()))?,
                read_link: self.get_stream_read_link(Some(stream.name.as_str()))?,
                ..StreamReference::default()
            };
            properties.push(Property::new(stream.name.clone(), ODataValue::Stream(reference)));
        }
        Ok(properties)
    }

    fn complete_operations(
        &self,
        wire: &[ResourceOperation],
        computed: &[ComputedOperation],
    ) -> Result<Vec<ResourceOperation>> {
        let mut operations = wire.to_vec();
        for operation in computed {
            let target = self.get_operation_target_uri(
                &operation.name,
                operation.binding_type.as_deref(),
                &operation.parameter_names,
            )?;
            operations.push(ResourceOperation {
                kind: operation.kind,
                metadata: operation.metadata.clone(),
                title: self.get_operation_title(&operation.name),
                target,
            });
        }
        Ok(operations)
    }
}

impl<'a> ResourceMetadataBuilder<'a> for ConventionalMetadataBuilder<'a> {
    fn resource_context(&self) -> Option<&ResourceMetadataContext<'a>> {
        Some(self.context())
    }

    fn get_id(&self) -> Result<Option<Url>> {
        self.identity.id()
    }

    fn try_get_id_for_serialization(&self) -> Result<IdForSerialization> {
        Ok(id_for_serialization(self.resource().is_transient, self.get_id()?))
    }

    fn get_canonical_url(&self) -> Result<Option<Url>> {
        self.get_id()
    }

    fn get_edit_link(&self) -> Result<Option<Url>> {
        let resource = self.resource();
        if let Some(link) = &resource.edit_link {
            return Ok(Some(link.clone()));
        }
        // Read-only resources keep their explicit read link and get no edit link.
        if resource.read_link.is_some() || resource.is_transient {
            return Ok(None);
        }
        memoize(&self.computed_edit_link, || self.compute_edit_link()).cloned()
    }

    fn get_read_link(&self) -> Result<Option<Url>> {
        if let Some(link) = &self.resource().read_link {
            return Ok(Some(link.clone()));
        }
        memoize(&self.computed_read_link, || self.get_edit_link()).cloned()
    }

    fn get_etag(&self) -> Result<Option<String>> {
        if let Some(etag) = &self.resource().etag {
            return Ok(Some(etag.clone()));
        }
        memoize(&self.computed_etag, || self.compute_etag()).cloned()
    }

    fn get_media_resource(&self) -> Result<Option<StreamReference>> {
        if let Some(media) = &self.resource().media_resource {
            return Ok(Some(media.clone()));
        }
        memoize(&self.computed_media_resource, || self.compute_media_resource()).cloned()
    }

    fn get_properties(&self) -> Result<Vec<Property>> {
        let mut properties = self.resource().properties.clone();
        if self.state.get() == ResourceState::Finished {
            let streams = memoize(&self.computed_stream_properties, || {
                self.compute_stream_properties()
            })?;
            properties.extend(streams.iter().cloned());
        }
        Ok(properties)
    }

    fn get_actions(&self) -> Result<Vec<ResourceOperation>> {
        memoize(&self.computed_actions, || {
            let computed = self.missing_operations.computed_actions(self.context());
            self.complete_operations(&self.resource().actions, computed)
        })
        .cloned()
    }

    fn get_functions(&self) -> Result<Vec<ResourceOperation>> {
        memoize(&self.computed_functions, || {
            let computed = self.missing_operations.computed_functions(self.context());
            self.complete_operations(&self.resource().functions, computed)
        })
        .cloned()
    }

    fn get_stream_edit_link(&self, stream_property: Option<&str>) -> Result<Option<Url>> {
        let Some(base) = self.get_edit_link()? else {
            return Ok(None);
        };
        self.uri_builder()
            .build_stream_edit_link_uri(&base, stream_property)
            .map(Some)
    }

    fn get_stream_read_link(&self, stream_property: Option<&str>) -> Result<Option<Url>> {
        let Some(base) = self.get_read_link()? else {
            return Ok(None);
        };
        self.uri_builder()
            .build_stream_read_link_uri(&base, stream_property)
            .map(Some)
    }

    fn get_navigation_link_uri(&self, navigation_property: &str, explicit: Option<&Url>) -> Result<Option<Url>> {
        if let Some(url) = explicit {
            return Ok(Some(url.clone()));
        }
        let Some(base) = self.get_read_link()? else {
            return Ok(None);
        };
        self.uri_builder()
            .build_navigation_link_uri(&base, navigation_property)
            .map(Some)
    }

    fn get_association_link_uri(&self, navigation_property: &str, explicit: Option<&Url>) -> Result<Option<Url>> {
        if let Some(url) = explicit {
            return Ok(Some(url.clone()));
        }
        let Some(base) = self.get_edit_link()? else {
            return Ok(None);
        };
        self.uri_builder()
            .build_association_link_uri(&base, navigation_property)
            .map(Some)
    }

    fn get_operation_target_uri(
        &self,
        operation_name: &str,
        binding_type: Option<&str>,
        parameter_names: &[String],
    ) -> Result<Option<Url>> {
        let binding_type = binding_type.filter(|binding| !binding.is_empty());
        // A cast segment goes after the id, not after an opaque edit link.
        let base = match binding_type {
            Some(_) => self.get_id()?,
            None => self.get_edit_link()?,
        };
        let Some(base) = base else {
            return Ok(None);
        };
        self.uri_builder()
            .build_operation_target_uri(&base, operation_name, binding_type, parameter_names)
            .map(Some)
    }

    fn get_operation_title(&self, operation_name: &str) -> Option<String> {
        Some(operation_name.to_string())
    }

    fn start_resource(&self) {
        self.state.set(ResourceState::InProgress);
    }

    fn end_resource(&self) {
        self.state.set(ResourceState::Finished);
    }

    fn mark_nested_resource_info_processed(&self, navigation_property: &str) {
        self.processed_nested_resource_infos
            .borrow_mut()
            .insert(navigation_property.to_string());
    }

    fn get_next_unprocessed_navigation_link(&self) -> Result<Option<NestedResourceInfo>> {
        let navigation_properties = self.context().selected_navigation_properties();
        loop {
            let index = self.navigation_cursor.get();
            let Some(nav) = navigation_properties.get(index) else {
                return Ok(None);
            };
            self.navigation_cursor.set(index + 1);
            if self.processed_nested_resource_infos.borrow().contains(&nav.name) {
                continue;
            }

            debug!("Emitting deferred navigation link {}", nav.name);
            return Ok(Some(NestedResourceInfo {
                name: nav.name.clone(),
                is_collection: nav.is_collection,
                url: self.get_navigation_link_uri(&nav.name, None)?,
                association_link_url: self.get_association_link_uri(&nav.name, None)?,
            }));
        }
    }
}
