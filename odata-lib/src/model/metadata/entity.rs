//! Entity type metadata

use serde::Deserialize;
use serde::Serialize;

/// An entity type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityType {
    /// Namespace the type is declared in (e.g., "Sales").
    pub namespace: String,

    /// Unqualified type name (e.g., "Customer").
    pub name: String,

    /// Fully qualified name of the base type, if any.
    #[serde(default)]
    pub base_type: Option<String>,

    /// Names of the key properties, in key order.
    ///
    /// Empty for derived types, which inherit the key of their base.
    #[serde(default)]
    pub key: Vec<String>,

    /// Whether instances are media-link entries.
    #[serde(default)]
    pub has_stream: bool,

    /// Structural properties declared directly on this type.
    #[serde(default)]
    pub properties: Vec<StructuralProperty>,

    /// Navigation properties declared directly on this type.
    #[serde(default)]
    pub navigation_properties: Vec<NavigationProperty>,
}

impl EntityType {
    /// Creates a new entity type with no properties.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            base_type: None,
            key: Vec::new(),
            has_stream: false,
            properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    /// Returns the fully qualified name (e.g., "Sales.Customer").
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Sets the base type.
    pub fn derived_from(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    /// Adds a key property.
    pub fn key(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        let name = name.into();
        self.key.push(name.clone());
        self.properties.push(StructuralProperty::new(name, PropertyType::Primitive(kind)));
        self
    }

    /// Adds a structural property.
    pub fn property(mut self, name: impl Into<String>, kind: PropertyType) -> Self {
        self.properties.push(StructuralProperty::new(name, kind));
        self
    }

    /// Adds a navigation property.
    pub fn navigation(mut self, property: NavigationProperty) -> Self {
        self.navigation_properties.push(property);
        self
    }

    /// Marks the type as a media-link entry.
    pub fn with_stream(mut self) -> Self {
        self.has_stream = true;
        self
    }

    /// Finds a structural property declared directly on this type.
    pub fn declared_property(&self, name: &str) -> Option<&StructuralProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Finds a navigation property declared directly on this type.
    pub fn declared_navigation_property(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigation_properties.iter().find(|p| p.name == name)
    }
}

/// A structural (non-navigation) property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StructuralProperty {
    /// The property name.
    pub name: String,
    /// The property type.
    #[serde(rename = "Type")]
    pub kind: PropertyType,
}

impl StructuralProperty {
    /// Creates a new structural property.
    pub fn new(name: impl Into<String>, kind: PropertyType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Returns `true` for stream properties.
    pub fn is_stream(&self) -> bool {
        matches!(self.kind, PropertyType::Stream)
    }
}

/// The type of a structural property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    /// A primitive type.
    Primitive(PrimitiveKind),
    /// An enum type, by qualified name.
    Enum(String),
    /// A complex type, by qualified name.
    Complex(String),
    /// A named stream.
    Stream,
    /// A collection of the inner type.
    Collection(Box<PropertyType>),
}

/// Primitive EDM types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    SByte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal,
    String,
    Guid,
    Binary,
    Date,
    DateTimeOffset,
    TimeOfDay,
    Duration,
    Geography,
    Geometry,
}

/// A navigation property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NavigationProperty {
    /// The property name.
    pub name: String,

    /// Fully qualified name of the target entity type.
    pub target_type: String,

    /// Whether the property is collection-valued.
    #[serde(default)]
    pub is_collection: bool,

    /// Whether the targets are contained in the declaring entity.
    #[serde(default)]
    pub contains_target: bool,
}

impl NavigationProperty {
    /// Creates a single-valued navigation property.
    pub fn single(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_type: target_type.into(),
            is_collection: false,
            contains_target: false,
        }
    }

    /// Creates a collection-valued navigation property.
    pub fn collection(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            is_collection: true,
            ..Self::single(name, target_type)
        }
    }

    /// Marks the property as a containment navigation property.
    pub fn contained(mut self) -> Self {
        self.contains_target = true;
        self
    }
}
