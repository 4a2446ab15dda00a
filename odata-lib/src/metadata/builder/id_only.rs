//! Identity-only convention builder

use std::rc::Weak;

use url::Url;

use super::IdForSerialization;
use super::MetadataBuilder;
use super::ResourceMetadataBuilder;
use super::id_for_serialization;
use super::identity::Identity;
use crate::error::Result;
use crate::metadata::ResourceMetadataContext;
use crate::model::Property;
use crate::model::ResourceOperation;
use crate::model::types::StreamReference;

/// Computes the id by convention and nothing else.
///
/// Used for delta and patch payloads: links, ETags and operations are only
/// ever what the wire supplied.
#[derive(Debug)]
pub struct ConventionalIdMetadataBuilder<'a> {
    identity: Identity<'a>,
}

impl<'a> ConventionalIdMetadataBuilder<'a> {
    pub fn new(context: ResourceMetadataContext<'a>) -> Self {
        Self {
            identity: Identity::new(context),
        }
    }

    /// Points at the builder of the resource containing this one.
    pub fn with_parent(mut self, parent: Weak<MetadataBuilder<'a>>) -> Self {
        self.identity.set_parent(parent);
        self
    }

    pub fn from_collection(mut self, is_from_collection: bool) -> Self {
        self.identity.set_from_collection(is_from_collection);
        self
    }

    pub fn name_as_property(mut self, name: impl Into<String>) -> Self {
        self.identity.set_name_as_property(name.into());
        self
    }
}

impl<'a> ResourceMetadataBuilder<'a> for ConventionalIdMetadataBuilder<'a> {
    fn resource_context(&self) -> Option<&ResourceMetadataContext<'a>> {
        Some(self.identity.context())
    }

    fn get_id(&self) -> Result<Option<Url>> {
        self.identity.id()
    }

    fn try_get_id_for_serialization(&self) -> Result<IdForSerialization> {
        let is_transient = self.identity.context().resource().is_transient;
        Ok(id_for_serialization(is_transient, self.get_id()?))
    }

    fn get_canonical_url(&self) -> Result<Option<Url>> {
        self.get_id()
    }

    fn get_edit_link(&self) -> Result<Option<Url>> {
        Ok(self.identity.context().resource().edit_link.clone())
    }

    fn get_read_link(&self) -> Result<Option<Url>> {
        Ok(self.identity.context().resource().read_link.clone())
    }

    fn get_etag(&self) -> Result<Option<String>> {
        Ok(self.identity.context().resource().etag.clone())
    }

    fn get_media_resource(&self) -> Result<Option<StreamReference>> {
        Ok(self.identity.context().resource().media_resource.clone())
    }

    fn get_properties(&self) -> Result<Vec<Property>> {
        Ok(self.identity.context().resource().properties.clone())
    }

    fn get_actions(&self) -> Result<Vec<ResourceOperation>> {
        Ok(self.identity.context().resource().actions.clone())
    }

    fn get_functions(&self) -> Result<Vec<ResourceOperation>> {
        Ok(self.identity.context().resource().functions.clone())
    }

    fn get_navigation_link_uri(&self, _navigation_property: &str, explicit: Option<&Url>) -> Result<Option<Url>> {
        Ok(explicit.cloned())
    }

    fn get_association_link_uri(&self, _navigation_property: &str, explicit: Option<&Url>) -> Result<Option<Url>> {
        Ok(explicit.cloned())
    }
}
