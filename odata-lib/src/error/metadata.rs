//! Metadata computation errors

use super::LiteralError;

/// Errors that can occur while computing resource metadata by convention.
///
/// None of these are recovered locally: they abort metadata computation for
/// the current resource and surface to whoever drives serialization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetadataError {
    /// The entity type has no usable key values.
    #[error("Resource of type '{type_name}' has no key properties")]
    MissingKeyProperties { type_name: String },

    /// A declared key property is absent from the resource.
    #[error("Key property '{property}' of type '{type_name}' is missing from the resource")]
    KeyPropertyNotFound { type_name: String, property: String },

    /// A key property carries a null value.
    #[error("Key property '{property}' of type '{type_name}' has a null value")]
    NullKeyValue { type_name: String, property: String },

    /// A key or ETag property carries a structured or collection value.
    #[error("Key or ETag property '{property}' of type '{type_name}' must have a primitive or enum value")]
    NonPrimitiveKeyOrETagValue { type_name: String, property: String },

    /// A resource read without a model has no type name.
    #[error("Resource type name is missing and no model is available to infer it")]
    MissingTypeName,

    /// The navigation source kind does not allow identity computation.
    #[error("Cannot compute identity for '{navigation_source}': navigation source kind is unknown")]
    UnknownNavigationSourceKind { navigation_source: String },

    /// A contained resource has neither a parent builder nor a usable request path.
    #[error("Cannot compute identity for contained resource '{navigation_source}': no parent id and no request path")]
    MissingContainmentContext { navigation_source: String },

    /// An ETag annotation path names a property the type does not declare.
    #[error("OptimisticConcurrency names property '{property}' which type '{type_name}' does not declare")]
    MissingAnnotationTarget { type_name: String, property: String },

    /// The URI builder was asked for an instance URI without keys.
    #[error("Cannot build instance URI for type '{type_name}': key property list is empty")]
    EmptyKeyPropertyList { type_name: String },

    /// A value could not be formatted as a literal.
    #[error(transparent)]
    Literal(#[from] LiteralError),

    /// An assembled URI is not a valid absolute URI.
    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),
}

impl MetadataError {
    /// Creates a new missing key properties error.
    pub fn missing_keys(type_name: impl Into<String>) -> Self {
        Self::MissingKeyProperties {
            type_name: type_name.into(),
        }
    }

    /// Creates a new key property not found error.
    pub fn key_not_found(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::KeyPropertyNotFound {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    /// Creates a new null key value error.
    pub fn null_key_value(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::NullKeyValue {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    /// Creates a new non-primitive key or ETag value error.
    pub fn non_primitive(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::NonPrimitiveKeyOrETagValue {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    /// Creates a new missing annotation target error.
    pub fn missing_annotation_target(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::MissingAnnotationTarget {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    /// Returns the type name this error refers to, if any.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::MissingKeyProperties { type_name }
            | Self::KeyPropertyNotFound { type_name, .. }
            | Self::NullKeyValue { type_name, .. }
            | Self::NonPrimitiveKeyOrETagValue { type_name, .. }
            | Self::MissingAnnotationTarget { type_name, .. }
            | Self::EmptyKeyPropertyList { type_name } => Some(type_name),
            _ => None,
        }
    }

    /// Returns the property name this error refers to, if any.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::KeyPropertyNotFound { property, .. }
            | Self::NullKeyValue { property, .. }
            | Self::NonPrimitiveKeyOrETagValue { property, .. }
            | Self::MissingAnnotationTarget { property, .. } => Some(property),
            _ => None,
        }
    }
}
