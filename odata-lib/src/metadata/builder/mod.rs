//! Resource metadata builders
//!
//! [`MetadataBuilder`] is the closed set of builder variants. Writers and
//! readers hold an `Rc<MetadataBuilder>` and use it through the
//! [`ResourceMetadataBuilder`] trait; they never depend on a concrete variant.
//!
//! A child builder may point at its parent through a [`Weak`] handle to
//! resolve containment. The parent must stay alive for as long as its
//! children compute ids; it owns none of them.
//!
//! [`Weak`]: std::rc::Weak

mod conventional;
mod id_only;
mod identity;
mod no_op;

pub use conventional::ConventionalMetadataBuilder;
pub use id_only::ConventionalIdMetadataBuilder;
pub use no_op::NoOpMetadataBuilder;

use url::Url;

use super::ResourceMetadataContext;
use crate::error::Result;
use crate::model::NestedResourceInfo;
use crate::model::Property;
use crate::model::ResourceOperation;
use crate::model::types::StreamReference;

/// Processing state of a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResourceState {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

/// What a writer should do about the `id` of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdForSerialization {
    /// No id is known; the writer decides whether that is acceptable.
    Unavailable,
    /// The resource is transient: do not write an id.
    Transient,
    /// Write this id.
    Id(Url),
}

/// The contract every metadata builder fulfils.
///
/// The defaults describe a builder that knows nothing, which is exactly the
/// null builder.
pub trait ResourceMetadataBuilder<'a> {
    /// The resource context, for builders that have one.
    fn resource_context(&self) -> Option<&ResourceMetadataContext<'a>> {
        None
    }

    fn get_id(&self) -> Result<Option<Url>> {
        Ok(None)
    }

    fn try_get_id_for_serialization(&self) -> Result<IdForSerialization> {
        Ok(IdForSerialization::Unavailable)
    }

    /// The URL children resolve containment against.
    fn get_canonical_url(&self) -> Result<Option<Url>> {
        Ok(None)
    }

    fn get_edit_link(&self) -> Result<Option<Url>> {
        Ok(None)
    }

    fn get_read_link(&self) -> Result<Option<Url>> {
        Ok(None)
    }

    fn get_etag(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn get_media_resource(&self) -> Result<Option<StreamReference>> {
        Ok(None)
    }

    fn get_properties(&self) -> Result<Vec<Property>> {
        Ok(Vec::new())
    }

    fn get_actions(&self) -> Result<Vec<ResourceOperation>> {
        Ok(Vec::new())
    }

    fn get_functions(&self) -> Result<Vec<ResourceOperation>> {
        Ok(Vec::new())
    }

    /// Edit link of a named stream property, or of the media resource.
    fn get_stream_edit_link(&self, _stream_property: Option<&str>) -> Result<Option<Url>> {
        Ok(None)
    }

    /// Read link of a named stream property, or of the media resource.
    fn get_stream_read_link(&self, _stream_property: Option<&str>) -> Result<Option<Url>> {
        Ok(None)
    }

    /// Navigation link of a property; `explicit` is the link the wire carried.
    fn get_navigation_link_uri(&self, _navigation_property: &str, _explicit: Option<&Url>) -> Result<Option<Url>> {
        Ok(None)
    }

    /// Association (`$ref`) link of a property; `explicit` is the link the wire carried.
    fn get_association_link_uri(&self, _navigation_property: &str, _explicit: Option<&Url>) -> Result<Option<Url>> {
        Ok(None)
    }

    fn get_operation_target_uri(
        &self,
        _operation_name: &str,
        _binding_type: Option<&str>,
        _parameter_names: &[String],
    ) -> Result<Option<Url>> {
        Ok(None)
    }

    fn get_operation_title(&self, _operation_name: &str) -> Option<String> {
        None
    }

    fn start_resource(&self) {}

    fn end_resource(&self) {}

    fn mark_nested_resource_info_processed(&self, _navigation_property: &str) {}

    /// Returns the next selected navigation property that has not been
    /// written yet, with its links computed.
    fn get_next_unprocessed_navigation_link(&self) -> Result<Option<NestedResourceInfo>> {
        Ok(None)
    }
}

/// Builder that knows nothing, used where no resource context exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetadataBuilder;

impl<'a> ResourceMetadataBuilder<'a> for NullMetadataBuilder {}

/// A metadata builder of one of the supported variants.
#[derive(Debug)]
pub enum MetadataBuilder<'a> {
    /// Computes everything by convention.
    Conventional(ConventionalMetadataBuilder<'a>),
    /// Computes identity only; links are never synthesized.
    ConventionalId(ConventionalIdMetadataBuilder<'a>),
    /// Returns only what the payload supplied.
    NoOp(NoOpMetadataBuilder<'a>),
    /// Returns nothing.
    Null,
}

impl<'a> MetadataBuilder<'a> {
    /// Creates a conventional builder for the context.
    pub fn conventional(context: ResourceMetadataContext<'a>) -> Self {
        Self::Conventional(ConventionalMetadataBuilder::new(context))
    }

    /// Creates an identity-only builder for the context.
    pub fn conventional_id(context: ResourceMetadataContext<'a>) -> Self {
        Self::ConventionalId(ConventionalIdMetadataBuilder::new(context))
    }

    /// Creates a builder that only echoes the resource.
    pub fn no_op(resource: &'a crate::model::Resource) -> Self {
        Self::NoOp(NoOpMetadataBuilder::new(resource))
    }

    /// The null builder.
    pub fn null() -> Self {
        Self::Null
    }

    fn inner(&self) -> &dyn ResourceMetadataBuilder<'a> {
        match self {
            Self::Conventional(builder) => builder,
            Self::ConventionalId(builder) => builder,
            Self::NoOp(builder) => builder,
            Self::Null => &NullMetadataBuilder,
        }
    }
}

impl<'a> From<ConventionalMetadataBuilder<'a>> for MetadataBuilder<'a> {
    fn from(builder: ConventionalMetadataBuilder<'a>) -> Self {
        Self::Conventional(builder)
    }
}

impl<'a> From<ConventionalIdMetadataBuilder<'a>> for MetadataBuilder<'a> {
    fn from(builder: ConventionalIdMetadataBuilder<'a>) -> Self {
        Self::ConventionalId(builder)
    }
}

impl<'a> From<NoOpMetadataBuilder<'a>> for MetadataBuilder<'a> {
    fn from(builder: NoOpMetadataBuilder<'a>) -> Self {
        Self::NoOp(builder)
    }
}

impl<'a> ResourceMetadataBuilder<'a> for MetadataBuilder<'a> {
    fn resource_context(&self) -> Option<&ResourceMetadataContext<'a>> {
        self.inner().resource_context()
    }

    fn get_id(&self) -> Result<Option<Url>> {
        self.inner().get_id()
    }

    fn try_get_id_for_serialization(&self) -> Result<IdForSerialization> {
        self.inner().try_get_id_for_serialization()
    }

    fn get_canonical_url(&self) -> Result<Option<Url>> {
        self.inner().get_canonical_url()
    }

    fn get_edit_link(&self) -> Result<Option<Url>> {
        self.inner().get_edit_link()
    }

    fn get_read_link(&self) -> Result<Option<Url>> {
        self.inner().get_read_link()
    }

    fn get_etag(&self) -> Result<Option<String>> {
        self.inner().get_etag()
    }

    fn get_media_resource(&self) -> Result<Option<StreamReference>> {
        self.inner().get_media_resource()
    }

    fn get_properties(&self) -> Result<Vec<Property>> {
        self.inner().get_properties()
    }

    fn get_actions(&self) -> Result<Vec<ResourceOperation>> {
        self.inner().get_actions()
    }

    fn get_functions(&self) -> Result<Vec<ResourceOperation>> {
        self.inner().get_functions()
    }

    fn get_stream_edit_link(&self, stream_property: Option<&str>) -> Result<Option<Url>> {
        self.inner().get_stream_edit_link(stream_property)
    }

    fn get_stream_read_link(&self, stream_property: Option<&str>) -> Result<Option<Url>> {
        self.inner().get_stream_read_link(stream_property)
    }

    fn get_navigation_link_uri(&self, navigation_property: &str, explicit: Option<&Url>) -> Result<Option<Url>> {
        self.inner().get_navigation_link_uri(navigation_property, explicit)
    }

    fn get_association_link_uri(&self, navigation_property: &str, explicit: Option<&Url>) -> Result<Option<Url>> {
        self.inner().get_association_link_uri(navigation_property, explicit)
    }

    fn get_operation_target_uri(
        &self,
        operation_name: &str,
        binding_type: Option<&str>,
        parameter_names: &[String],
    ) -> Result<Option<Url>> {
        self.inner()
            .get_operation_target_uri(operation_name, binding_type, parameter_names)
    }

    fn get_operation_title(&self, operation_name: &str) -> Option<String> {
        self.inner().get_operation_title(operation_name)
    }

    fn start_resource(&self) {
        self.inner().start_resource()
    }

    fn end_resource(&self) {
        self.inner().end_resource()
    }

    fn mark_nested_resource_info_processed(&self, navigation_property: &str) {
        self.inner().mark_nested_resource_info_processed(navigation_property)
    }

    fn get_next_unprocessed_navigation_link(&self) -> Result<Option<NestedResourceInfo>> {
        self.inner().get_next_unprocessed_navigation_link()
    }
}

/// Resolves the id a writer should emit, shared by the conventional builders.
fn id_for_serialization(is_transient: bool, id: Option<Url>) -> IdForSerialization {
    match (is_transient, id) {
        (true, _) => IdForSerialization::Transient,
        (false, Some(id)) => IdForSerialization::Id(id),
        (false, None) => IdForSerialization::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_for_serialization() {
        let id = Url::parse("http://host/Customers(5)").unwrap();
        assert_eq!(id_for_serialization(true, Some(id.clone())), IdForSerialization::Transient);
        assert_eq!(id_for_serialization(false, Some(id.clone())), IdForSerialization::Id(id));
        assert_eq!(id_for_serialization(false, None), IdForSerialization::Unavailable);
    }

    #[test]
    fn test_null_builder_knows_nothing() {
        let builder = MetadataBuilder::null();
        assert!(builder.resource_context().is_none());
        assert_eq!(builder.get_etag(), Ok(None));
        assert_eq!(builder.get_operation_title("Sales.Approve"), None);
        assert_eq!(
            builder.get_navigation_link_uri("Orders", None),
            Ok(None)
        );
    }
}
