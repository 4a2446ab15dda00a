//! Conventional URI builder.

use url::Url;

use super::KeySerializer;
use super::PathSegment;
use crate::config::ConventionConfig;
use crate::error::MetadataError;
use crate::error::Result;
use crate::model::ODataValue;

/// Segment addressing the default stream of a media-link entry.
pub const DEFAULT_STREAM_SEGMENT: &str = "$value";

/// Segment addressing the references behind a navigation property.
pub const REF_SEGMENT: &str = "$ref";

/// Segment addressing the service metadata document.
pub const METADATA_SEGMENT: &str = "$metadata";

/// Builds resource URIs by convention over an absolute service root.
///
/// Every method takes a base URI and returns a new one; nothing is shared
/// between calls. Named segments are percent-escaped, keyword segments
/// (`$value`, `$ref`) and operation segments are appended as-is.
///
/// # Example
///
/// ```
/// use odata_lib::config::ConventionConfig;
/// use odata_lib::model::ODataValue;
/// use odata_lib::uri::ConventionalUriBuilder;
/// use url::Url;
///
/// let builder = ConventionalUriBuilder::new(
///     Url::parse("http://host/").unwrap(),
///     &ConventionConfig::default(),
/// );
/// let set = builder.build_entity_set_uri(&builder.build_base_uri(), "Customers").unwrap();
/// let keys = vec![("Id".to_string(), ODataValue::Int32(5))];
/// let entity = builder.build_entity_instance_uri(&set, &keys, "Sales.Customer").unwrap();
/// assert_eq!(entity.as_str(), "http://host/Customers(5)");
/// ```
#[derive(Debug, Clone)]
pub struct ConventionalUriBuilder {
    service_root: Url,
    key_serializer: KeySerializer,
}

impl ConventionalUriBuilder {
    /// Creates a builder for the given service root.
    pub fn new(service_root: Url, config: &ConventionConfig) -> Self {
        Self {
            service_root,
            key_serializer: KeySerializer::from_config(config),
        }
    }

    /// Returns the key serializer in use.
    pub fn key_serializer(&self) -> KeySerializer {
        self.key_serializer
    }

    /// Returns the service root.
    pub fn build_base_uri(&self) -> Url {
        self.service_root.clone()
    }

    /// Returns the URI of the metadata document (`{root}/$metadata`).
    pub fn build_metadata_document_uri(&self) -> Result<Url> {
        append_segment(&self.service_root, METADATA_SEGMENT, false)
    }

    /// Appends an entity set (or singleton, or containment property) segment.
    pub fn build_entity_set_uri(&self, base: &Url, entity_set_name: &str) -> Result<Url> {
        append_segment(base, entity_set_name, true)
    }

    /// Appends the key expression for an entity instance.
    ///
    /// Fails if `key_properties` is empty or any key value is null or
    /// structured.
    pub fn build_entity_instance_uri(
        &self,
        base: &Url,
        key_properties: &[(String, ODataValue)],
        type_name: &str,
    ) -> Result<Url> {
        if key_properties.is_empty() {
            return Err(MetadataError::EmptyKeyPropertyList {
                type_name: type_name.to_string(),
            });
        }
        for (name, value) in key_properties {
            if value.is_null() {
                return Err(MetadataError::null_key_value(type_name, name));
            }
            if value.is_structured() {
                return Err(MetadataError::non_primitive(type_name, name));
            }
        }

        let mut uri = base.as_str().to_string();
        self.key_serializer
            .append_key_expression(&mut uri, key_properties, |p| p.0.as_str(), |p| &p.1)?;
        Ok(Url::parse(&uri)?)
    }

    /// Appends the edit link segment of a stream.
    ///
    /// `None` addresses the default stream of a media-link entry.
    pub fn build_stream_edit_link_uri(&self, base: &Url, stream_property: Option<&str>) -> Result<Url> {
        stream_uri(base, stream_property)
    }

    /// Appends the read link segment of a stream.
    ///
    /// `None` addresses the default stream of a media-link entry.
    pub fn build_stream_read_link_uri(&self, base: &Url, stream_property: Option<&str>) -> Result<Url> {
        stream_uri(base, stream_property)
    }

    /// Appends a navigation property segment.
    pub fn build_navigation_link_uri(&self, base: &Url, navigation_property: &str) -> Result<Url> {
        append_segment(base, navigation_property, true)
    }

    /// Appends a navigation property segment followed by `$ref`.
    pub fn build_association_link_uri(&self, base: &Url, navigation_property: &str) -> Result<Url> {
        let navigation = append_segment(base, navigation_property, true)?;
        append_segment(&navigation, REF_SEGMENT, false)
    }

    /// Appends an operation target.
    ///
    /// A non-empty binding type is inserted as a cast segment first. A
    /// non-empty parameter list is rendered as `(p1=p1,p2=p2)`.
    pub fn build_operation_target_uri<S: AsRef<str>>(
        &self,
        base: &Url,
        operation_name: &str,
        binding_type_name: Option<&str>,
        parameter_names: &[S],
    ) -> Result<Url> {
        let base = match binding_type_name.filter(|name| !name.is_empty()) {
            Some(binding) => append_segment(base, binding, true)?,
            None => base.clone(),
        };

        let mut segment = operation_name.to_string();
        if !parameter_names.is_empty() {
            let parameters: Vec<String> = parameter_names
                .iter()
                .map(|p| format!("{0}={0}", p.as_ref()))
                .collect();
            segment.push('(');
            segment.push_str(&parameters.join(","));
            segment.push(')');
        }
        append_segment(&base, &segment, false)
    }

    /// Appends a type-cast segment.
    pub fn append_type_segment(&self, base: &Url, type_name: &str) -> Result<Url> {
        append_segment(base, type_name, true)
    }

    /// Replays already-parsed path segments against a base URI.
    pub fn append_path_segments(&self, base: &Url, segments: &[PathSegment]) -> Result<Url> {
        let mut uri = base.clone();
        for segment in segments {
            uri = match segment {
                PathSegment::EntitySet { name, .. } | PathSegment::Singleton { name, .. } => {
                    self.build_entity_set_uri(&uri, name)?
                }
                PathSegment::Key { keys, entity_type } => {
                    self.build_entity_instance_uri(&uri, keys, entity_type)?
                }
                PathSegment::Navigation { name, .. } => self.build_navigation_link_uri(&uri, name)?,
                PathSegment::TypeCast { type_name } => self.append_type_segment(&uri, type_name)?,
                PathSegment::Operation { name, .. } => append_segment(&uri, name, false)?,
            };
        }
        Ok(uri)
    }
}

fn stream_uri(base: &Url, stream_property: Option<&str>) -> Result<Url> {
    match stream_property {
        Some(name) => append_segment(base, name, true),
        None => append_segment(base, DEFAULT_STREAM_SEGMENT, false),
    }
}

/// Appends one segment, inserting a `/` only if the base does not end with one.
fn append_segment(base: &Url, segment: &str, escape: bool) -> Result<Url> {
    let segment = if escape {
        urlencoding::encode(segment)
    } else {
        segment.into()
    };

    let mut uri = base.as_str().to_string();
    if !uri.ends_with('/') {
        uri.push('/');
    }
    uri.push_str(&segment);
    Ok(Url::parse(&uri)?)
}
