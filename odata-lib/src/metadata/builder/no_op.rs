//! Pass-through builder

use url::Url;

use super::IdForSerialization;
use super::ResourceMetadataBuilder;
use super::id_for_serialization;
use crate::error::Result;
use crate::model::Property;
use crate::model::Resource;
use crate::model::ResourceOperation;
use crate::model::types::StreamReference;

/// Returns exactly what the resource carries, computing nothing.
///
/// Used for request payloads, where conventions cannot be assumed.
#[derive(Debug, Clone, Copy)]
pub struct NoOpMetadataBuilder<'a> {
    resource: &'a Resource,
}

impl<'a> NoOpMetadataBuilder<'a> {
    pub fn new(resource: &'a Resource) -> Self {
        Self { resource }
    }
}

impl<'a> ResourceMetadataBuilder<'a> for NoOpMetadataBuilder<'a> {
    fn get_id(&self) -> Result<Option<Url>> {
        Ok(self.resource.id.clone())
    }

    fn try_get_id_for_serialization(&self) -> Result<IdForSerialization> {
        Ok(id_for_serialization(self.resource.is_transient, self.resource.id.clone()))
    }

    fn get_canonical_url(&self) -> Result<Option<Url>> {
        Ok(self.resource.id.clone().or_else(|| self.resource.edit_link.clone()))
    }

    fn get_edit_link(&self) -> Result<Option<Url>> {
        Ok(self.resource.edit_link.clone())
    }

    fn get_read_link(&self) -> Result<Option<Url>> {
        Ok(self.resource.read_link.clone())
    }

    fn get_etag(&self) -> Result<Option<String>> {
        Ok(self.resource.etag.clone())
    }

    fn get_media_resource(&self) -> Result<Option<StreamReference>> {
        Ok(self.resource.media_resource.clone())
    }

    fn get_properties(&self) -> Result<Vec<Property>> {
        Ok(self.resource.properties.clone())
    }

    fn get_actions(&self) -> Result<Vec<ResourceOperation>> {
        Ok(self.resource.actions.clone())
    }

    fn get_functions(&self) -> Result<Vec<ResourceOperation>> {
        Ok(self.resource.functions.clone())
    }

    fn get_navigation_link_uri(&self, _navigation_property: &str, explicit: Option<&Url>) -> Result<Option<Url>> {
        Ok(explicit.cloned())
    }

    fn get_association_link_uri(&self, _navigation_property: &str, explicit: Option<&Url>) -> Result<Option<Url>> {
        Ok(explicit.cloned())
    }
}
