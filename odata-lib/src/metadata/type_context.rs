//! Static type information for a resource position

use crate::model::ResourceSerializationInfo;
use crate::model::metadata::EdmModel;
use crate::model::metadata::NavigationSource;
use crate::model::metadata::NavigationSourceKind;

/// What is known about a resource before looking at the resource itself.
///
/// Comes either from the model or from the resource's serialization info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeContext {
    /// Name of the entity set, singleton or containment navigation property.
    pub navigation_source_name: String,
    /// Kind of the navigation source.
    pub navigation_source_kind: NavigationSourceKind,
    /// Entity type declared by the navigation source.
    pub navigation_source_entity_type_name: String,
    /// Type statically expected at this position.
    pub expected_resource_type_name: String,
    /// Whether the expected type is a media-link entry.
    pub is_media_link_entry: bool,
    /// Whether the resource is a member of a collection.
    pub is_from_collection: bool,
}

impl TypeContext {
    /// Builds a context from a model navigation source.
    ///
    /// Members of entity sets (contained or not) are assumed to come from a
    /// collection; use [`TypeContext::from_collection`] for single-valued
    /// containment.
    pub fn from_model(model: &EdmModel, source: &NavigationSource, expected_type_name: &str) -> Self {
        Self {
            navigation_source_name: source.name.clone(),
            navigation_source_kind: source.kind,
            navigation_source_entity_type_name: source.entity_type.clone(),
            expected_resource_type_name: expected_type_name.to_string(),
            is_media_link_entry: model.has_stream(expected_type_name),
            is_from_collection: source.kind != NavigationSourceKind::Singleton,
        }
    }

    /// Builds a context from serialization info.
    ///
    /// Without a model, media-link entries cannot be detected.
    pub fn from_serialization_info(info: &ResourceSerializationInfo) -> Self {
        Self {
            navigation_source_name: info.navigation_source_name.clone(),
            navigation_source_kind: info.navigation_source_kind,
            navigation_source_entity_type_name: info.navigation_source_entity_type_name.clone(),
            expected_resource_type_name: info.expected_type_name.clone(),
            is_media_link_entry: false,
            is_from_collection: info.is_from_collection,
        }
    }

    /// A position with no resolvable navigation source.
    pub fn unknown(expected_type_name: impl Into<String>) -> Self {
        let expected = expected_type_name.into();
        Self {
            navigation_source_kind: NavigationSourceKind::UnknownEntitySet,
            navigation_source_entity_type_name: expected.clone(),
            expected_resource_type_name: expected,
            ..Self::default()
        }
    }

    pub fn from_collection(mut self, is_from_collection: bool) -> Self {
        self.is_from_collection = is_from_collection;
        self
    }

    pub fn with_expected_type(mut self, type_name: impl Into<String>) -> Self {
        self.expected_resource_type_name = type_name.into();
        self
    }

    pub fn media_link_entry(mut self, is_media_link_entry: bool) -> Self {
        self.is_media_link_entry = is_media_link_entry;
        self
    }
}
