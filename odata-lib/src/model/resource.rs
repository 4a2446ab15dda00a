//! Wire resources and their explicitly supplied metadata

use serde::Deserialize;
use serde::Serialize;
use url::Url;

use super::ODataValue;
use super::metadata::NavigationSourceKind;
use super::types::StreamReference;

/// A resource instance as it appears on the wire.
///
/// Every metadata field here is the explicit ("non-computed") value supplied
/// by the payload or the caller. Metadata builders always prefer these values
/// and only compute the ones left as `None`.
///
/// # Example
///
/// ```
/// use odata_lib::model::Resource;
///
/// let customer = Resource::new("Sales.Customer")
///     .set("Id", 5i32)
///     .set("Name", "Contoso");
///
/// assert_eq!(customer.property("Id").map(|p| &p.value), Some(&5i32.into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    /// Fully qualified name of the resource's actual type.
    pub type_name: Option<String>,
    /// Properties in wire order.
    pub properties: Vec<Property>,
    /// Explicit identity.
    pub id: Option<Url>,
    /// Explicit edit link.
    pub edit_link: Option<Url>,
    /// Explicit read link.
    pub read_link: Option<Url>,
    /// Explicit ETag.
    pub etag: Option<String>,
    /// Explicit media resource.
    pub media_resource: Option<StreamReference>,
    /// Transient resources have no identity.
    pub is_transient: bool,
    /// Actions advertised on the wire.
    pub actions: Vec<ResourceOperation>,
    /// Functions advertised on the wire.
    pub functions: Vec<ResourceOperation>,
    /// Serialization hints used when no model is available.
    pub serialization_info: Option<ResourceSerializationInfo>,
}

impl Resource {
    /// Creates a new resource of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// Creates a new resource without a type name.
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Appends a property, builder-style.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<ODataValue>) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    /// Appends a property tagged with a serialization kind, builder-style.
    pub fn set_with_kind(
        mut self,
        name: impl Into<String>,
        value: impl Into<ODataValue>,
        kind: PropertyKind,
    ) -> Self {
        self.properties.push(Property::new(name, value).with_kind(kind));
        self
    }

    /// Sets the explicit id.
    pub fn with_id(mut self, id: Url) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the explicit edit link.
    pub fn with_edit_link(mut self, link: Url) -> Self {
        self.edit_link = Some(link);
        self
    }

    /// Sets the explicit read link.
    pub fn with_read_link(mut self, link: Url) -> Self {
        self.read_link = Some(link);
        self
    }

    /// Sets the explicit ETag.
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Sets the explicit media resource.
    pub fn with_media_resource(mut self, media: StreamReference) -> Self {
        self.media_resource = Some(media);
        self
    }

    /// Marks the resource as transient.
    pub fn transient(mut self) -> Self {
        self.is_transient = true;
        self
    }

    /// Adds an action advertised on the wire.
    pub fn with_action(mut self, action: ResourceOperation) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a function advertised on the wire.
    pub fn with_function(mut self, function: ResourceOperation) -> Self {
        self.functions.push(function);
        self
    }

    /// Attaches serialization hints.
    pub fn with_serialization_info(mut self, info: ResourceSerializationInfo) -> Self {
        self.serialization_info = Some(info);
        self
    }

    /// Finds a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A named property value.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The property name.
    pub name: String,
    /// The property value.
    pub value: ODataValue,
    /// Serialization hints for model-less writing.
    pub serialization_info: Option<PropertySerializationInfo>,
}

impl Property {
    /// Creates a new property.
    pub fn new(name: impl Into<String>, value: impl Into<ODataValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            serialization_info: None,
        }
    }

    /// Tags the property with a serialization kind.
    pub fn with_kind(mut self, kind: PropertyKind) -> Self {
        self.serialization_info = Some(PropertySerializationInfo { kind });
        self
    }

    /// Returns the serialization kind, `Unspecified` when untagged.
    pub fn kind(&self) -> PropertyKind {
        self.serialization_info
            .map(|info| info.kind)
            .unwrap_or_default()
    }
}

/// What role a property plays when no model is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// No particular role.
    #[default]
    Unspecified,
    /// Part of the key.
    Key,
    /// Part of the ETag.
    ETag,
    /// Dynamic property of an open type.
    Open,
}

/// Per-property serialization hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySerializationInfo {
    /// The property role.
    pub kind: PropertyKind,
}

/// Per-resource serialization hints, used instead of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSerializationInfo {
    /// Name of the navigation source the resource belongs to.
    pub navigation_source_name: String,
    /// Kind of that navigation source.
    pub navigation_source_kind: NavigationSourceKind,
    /// Entity type declared by the navigation source.
    pub navigation_source_entity_type_name: String,
    /// Type statically expected at this position in the payload.
    pub expected_type_name: String,
    /// Whether the resource is a member of a collection.
    pub is_from_collection: bool,
}

impl ResourceSerializationInfo {
    /// Creates hints for a member of an entity set.
    pub fn entity_set(name: impl Into<String>, entity_type_name: impl Into<String>) -> Self {
        let entity_type_name = entity_type_name.into();
        Self {
            navigation_source_name: name.into(),
            navigation_source_kind: NavigationSourceKind::EntitySet,
            navigation_source_entity_type_name: entity_type_name.clone(),
            expected_type_name: entity_type_name,
            is_from_collection: true,
        }
    }

    /// Overrides the navigation source kind.
    pub fn with_kind(mut self, kind: NavigationSourceKind) -> Self {
        self.navigation_source_kind = kind;
        self
    }

    /// Overrides the expected type name.
    pub fn with_expected_type(mut self, type_name: impl Into<String>) -> Self {
        self.expected_type_name = type_name.into();
        self
    }

    /// Sets whether the resource comes from a collection.
    pub fn from_collection(mut self, is_from_collection: bool) -> Self {
        self.is_from_collection = is_from_collection;
        self
    }
}

/// Whether an operation is an action or a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Side-effecting operation.
    Action,
    /// Side-effect free operation.
    Function,
}

/// An action or function advertised on a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceOperation {
    /// Action or function.
    pub kind: OperationKind,
    /// Metadata reference, `#NS.Name` or an absolute `$metadata#NS.Name` URI.
    pub metadata: String,
    /// Human-readable title.
    pub title: Option<String>,
    /// URI the operation is invoked at.
    pub target: Option<Url>,
}

impl ResourceOperation {
    /// Creates an action reference.
    pub fn action(metadata: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Action,
            metadata: metadata.into(),
            title: None,
            target: None,
        }
    }

    /// Creates a function reference.
    pub fn function(metadata: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Function,
            metadata: metadata.into(),
            title: None,
            target: None,
        }
    }

    /// Sets the target.
    pub fn with_target(mut self, target: Url) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A navigation property as projected onto a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedResourceInfo {
    /// The navigation property name.
    pub name: String,
    /// Whether the property is collection-valued.
    pub is_collection: bool,
    /// Navigation link.
    pub url: Option<Url>,
    /// Association (`$ref`) link.
    pub association_link_url: Option<Url>,
}
