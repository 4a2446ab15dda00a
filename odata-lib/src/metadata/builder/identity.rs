//! Identity computation shared by the conventional builders

use std::cell::OnceCell;
use std::rc::Rc;
use std::rc::Weak;

use log::debug;
use url::Url;

use super::MetadataBuilder;
use super::ResourceMetadataBuilder;
use crate::error::MetadataError;
use crate::error::Result;
use crate::metadata::ResourceMetadataContext;
use crate::metadata::memoize;
use crate::model::ODataValue;
use crate::model::metadata::NavigationSourceKind;
use crate::uri::ConventionalUriBuilder;
use crate::uri::PathSegment;

/// Computes and memoizes a resource's canonical id.
#[derive(Debug)]
pub(crate) struct Identity<'a> {
    context: ResourceMetadataContext<'a>,
    parent: Weak<MetadataBuilder<'a>>,
    is_from_collection: bool,
    name_as_property: Option<String>,
    computed_id: OnceCell<Url>,
}

impl<'a> Identity<'a> {
    pub(crate) fn new(context: ResourceMetadataContext<'a>) -> Self {
        let is_from_collection = context.type_context().is_from_collection;
        Self {
            context,
            parent: Weak::new(),
            is_from_collection,
            name_as_property: None,
            computed_id: OnceCell::new(),
        }
    }

    pub(crate) fn context(&self) -> &ResourceMetadataContext<'a> {
        &self.context
    }

    pub(crate) fn uri_builder(&self) -> &'a ConventionalUriBuilder {
        self.context.metadata().uri_builder()
    }

    pub(crate) fn set_parent(&mut self, parent: Weak<MetadataBuilder<'a>>) {
        self.parent = parent;
    }

    pub(crate) fn parent(&self) -> Option<Rc<MetadataBuilder<'a>>> {
        self.parent.upgrade()
    }

    pub(crate) fn set_from_collection(&mut self, is_from_collection: bool) {
        self.is_from_collection = is_from_collection;
    }

    pub(crate) fn is_from_collection(&self) -> bool {
        self.is_from_collection
    }

    pub(crate) fn set_name_as_property(&mut self, name: String) {
        self.name_as_property = Some(name);
    }

    /// Returns the id: the wire id if present, none for transient
    /// resources, otherwise the computed id.
    pub(crate) fn id(&self) -> Result<Option<Url>> {
        let resource = self.context.resource();
        if let Some(id) = &resource.id {
            return Ok(Some(id.clone()));
        }
        if resource.is_transient {
            return Ok(None);
        }
        memoize(&self.computed_id, || self.compute_id()).map(|id| Some(id.clone()))
    }

    fn compute_id(&self) -> Result<Url> {
        let type_context = self.context.type_context();
        let source = type_context.navigation_source_name.as_str();
        let id = match type_context.navigation_source_kind {
            NavigationSourceKind::Singleton => self.compute_singleton_id()?,
            NavigationSourceKind::EntitySet => self.compute_entity_set_id()?,
            NavigationSourceKind::ContainedEntitySet => self.compute_contained_id()?,
            NavigationSourceKind::UnknownEntitySet => {
                return Err(MetadataError::UnknownNavigationSourceKind {
                    navigation_source: source.to_string(),
                });
            }
        };
        debug!("Computed id {id} for {}", self.context.actual_type_name());
        Ok(id)
    }

    fn compute_singleton_id(&self) -> Result<Url> {
        let builder = self.uri_builder();
        builder.build_entity_set_uri(
            &builder.build_base_uri(),
            &self.context.type_context().navigation_source_name,
        )
    }

    fn compute_entity_set_id(&self) -> Result<Url> {
        let set = self.compute_singleton_id()?;
        self.append_keys(&set)
    }

    fn append_keys(&self, base: &Url) -> Result<Url> {
        self.uri_builder().build_entity_instance_uri(
            base,
            &self.normalized_key_properties()?,
            self.context.actual_type_name(),
        )
    }

    /// Key values with unsigned integers widened to the next signed type.
    fn normalized_key_properties(&self) -> Result<Vec<(String, ODataValue)>> {
        Ok(self
            .context
            .key_properties()?
            .iter()
            .map(|(name, value)| (name.clone(), value.to_underlying_signed()))
            .collect())
    }

    /// Parent canonical URL (or replayed request path), then the containment
    /// property, then the key when the resource is a collection member.
    fn compute_contained_id(&self) -> Result<Url> {
        let navigation_property = self.containing_property();
        let containing = match self.containing_uri_from_parent()? {
            Some(uri) => uri,
            None => {
                debug!("No parent id for {navigation_property}, replaying the request path");
                self.containing_uri_from_path()?
            }
        };

        let builder = self.uri_builder();
        let uri = builder.build_navigation_link_uri(&containing, navigation_property)?;
        if self.is_from_collection {
            self.append_keys(&uri)
        } else {
            Ok(uri)
        }
    }

    fn containing_property(&self) -> &str {
        self.name_as_property
            .as_deref()
            .unwrap_or(&self.context.type_context().navigation_source_name)
    }

    fn containing_uri_from_parent(&self) -> Result<Option<Url>> {
        let Some(parent) = self.parent() else {
            return Ok(None);
        };
        let Some(uri) = parent.get_canonical_url()? else {
            return Ok(None);
        };

        // The containment property may be declared on a derived parent type
        // only; the cast makes it addressable.
        if let Some(parent_context) = parent.resource_context() {
            let actual = parent_context.actual_type_name();
            let expected = parent_context.type_context().expected_resource_type_name.as_str();
            let declared = self
                .context
                .model()
                .is_some_and(|model| model.declares_property(expected, self.containing_property()));
            if actual != expected && !declared {
                return self.uri_builder().append_type_segment(&uri, actual).map(Some);
            }
        }
        Ok(Some(uri))
    }

    fn containing_uri_from_path(&self) -> Result<Url> {
        let missing = || MetadataError::MissingContainmentContext {
            navigation_source: self.context.type_context().navigation_source_name.clone(),
        };
        let path = self
            .context
            .metadata()
            .request_path()
            .filter(|path| !path.is_empty())
            .ok_or_else(missing)?;
        let segments = path.segments();

        let mut end = segments
            .iter()
            .rposition(PathSegment::is_navigation_or_operation)
            .ok_or_else(missing)?;

        // Drop trailing casts whose owning type already declares the property.
        let property = self.containing_property();
        while end > 0 && matches!(segments[end - 1], PathSegment::TypeCast { .. }) {
            let owner = segments[..end - 1].last().and_then(PathSegment::target_type);
            let declared = match (self.context.model(), owner) {
                (Some(model), Some(owner)) => model.declares_property(owner, property),
                _ => false,
            };
            if !declared {
                break;
            }
            end -= 1;
        }

        if end == 0 {
            return Err(missing());
        }
        let builder = self.uri_builder();
        builder.append_path_segments(&builder.build_base_uri(), &segments[..end])
    }
}
