//! Service-level metadata context

use std::fmt;

use url::Url;

use super::MetadataSelector;
use super::TypeContext;
use crate::config::ConventionConfig;
use crate::error::Result;
use crate::model::metadata::EdmModel;
use crate::model::metadata::Operation;
use crate::uri::ConventionalUriBuilder;
use crate::uri::LiteralFormatter;
use crate::uri::ODataPath;

/// Everything the builders of one request share.
///
/// Created once per request (or per service, when no request path is
/// involved) and borrowed by every [`ResourceMetadataContext`].
///
/// [`ResourceMetadataContext`]: super::ResourceMetadataContext
pub struct MetadataContext {
    config: ConventionConfig,
    model: Option<EdmModel>,
    uri_builder: ConventionalUriBuilder,
    metadata_document_uri: Url,
    request_path: Option<ODataPath>,
    selector: Option<Box<dyn MetadataSelector>>,
}

impl MetadataContext {
    /// Creates a context without a model for the given service root.
    pub fn new(service_root: Url, config: ConventionConfig) -> Result<Self> {
        let uri_builder = ConventionalUriBuilder::new(service_root, &config);
        let metadata_document_uri = uri_builder.build_metadata_document_uri()?;
        Ok(Self {
            config,
            model: None,
            uri_builder,
            metadata_document_uri,
            request_path: None,
            selector: None,
        })
    }

    /// Attaches the service model.
    pub fn with_model(mut self, model: EdmModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Attaches the parsed request path, used to locate contained resources.
    pub fn with_request_path(mut self, path: ODataPath) -> Self {
        self.request_path = Some(path);
        self
    }

    /// Installs a hook that can narrow the selected metadata.
    pub fn with_selector(mut self, selector: impl MetadataSelector + 'static) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    pub fn config(&self) -> &ConventionConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&EdmModel> {
        self.model.as_ref()
    }

    pub fn uri_builder(&self) -> &ConventionalUriBuilder {
        &self.uri_builder
    }

    pub fn service_root(&self) -> Url {
        self.uri_builder.build_base_uri()
    }

    pub fn metadata_document_uri(&self) -> &Url {
        &self.metadata_document_uri
    }

    pub fn request_path(&self) -> Option<&ODataPath> {
        self.request_path.as_ref()
    }

    pub fn selector(&self) -> Option<&dyn MetadataSelector> {
        self.selector.as_deref()
    }

    /// Formatter used for ETag values, honoring the encoding setting.
    pub fn literal_formatter(&self) -> LiteralFormatter {
        LiteralFormatter::Default {
            encode: self.config.encode_literals,
        }
    }

    /// Builds the type context of a member of a top-level entity set or singleton.
    ///
    /// Returns `None` without a model or if the source is not declared.
    pub fn type_context_for_source(&self, source_name: &str) -> Option<TypeContext> {
        let model = self.model.as_ref()?;
        let source = model.find_navigation_source(source_name)?;
        Some(TypeContext::from_model(model, source, &source.entity_type))
    }

    /// Builds the type context of a resource reached through a containment
    /// navigation property.
    pub fn type_context_for_containment(
        &self,
        parent_type: &str,
        navigation_property: &str,
    ) -> Option<TypeContext> {
        let model = self.model.as_ref()?;
        let nav = model.find_navigation_property(parent_type, navigation_property)?;
        let source = model.contained_source(parent_type, navigation_property)?;
        Some(
            TypeContext::from_model(model, &source, &source.entity_type)
                .from_collection(nav.is_collection),
        )
    }

    /// Returns the name an operation is referenced by in metadata URLs.
    ///
    /// Overloaded functions carry their non-binding parameter names so the
    /// reference stays unambiguous (e.g., `Sales.Rank(year)`).
    pub fn metadata_reference_name(&self, operation: &Operation) -> String {
        let overloaded = self.model.as_ref().is_some_and(|m| m.is_overloaded(operation));
        if overloaded && !operation.is_action() {
            format!(
                "{}({})",
                operation.full_name(),
                operation.non_binding_parameter_names().join(",")
            )
        } else {
            operation.full_name()
        }
    }

    /// Returns the absolute metadata URL of an operation.
    pub fn operation_metadata(&self, operation: &Operation) -> String {
        format!(
            "{}#{}",
            self.metadata_document_uri,
            self.metadata_reference_name(operation)
        )
    }
}

impl fmt::Debug for MetadataContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataContext")
            .field("config", &self.config)
            .field("model", &self.model.as_ref().map(|m| &m.namespace))
            .field("metadata_document_uri", &self.metadata_document_uri.as_str())
            .field("request_path", &self.request_path)
            .field("selector", &self.selector.is_some())
            .finish()
    }
}

/// Returns the part of an operation metadata reference after `#`.
pub(crate) fn operation_fragment(metadata: &str) -> Option<&str> {
    metadata.split_once('#').map(|(_, fragment)| fragment)
}
