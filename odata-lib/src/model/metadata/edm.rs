//! The service model

use serde::Deserialize;
use serde::Serialize;

use super::EntityType;
use super::NavigationProperty;
use super::NavigationSource;
use super::NavigationSourceKind;
use super::Operation;
use super::StructuralProperty;

/// The structured-data model of a service.
///
/// # Example
///
/// ```
/// use odata_lib::model::metadata::{EdmModel, EntityType, NavigationSource, PrimitiveKind};
///
/// let model = EdmModel::new("Sales", "Container")
///     .entity_type(EntityType::new("Sales", "Customer").key("Id", PrimitiveKind::Int32))
///     .source(NavigationSource::entity_set("Customers", "Sales.Customer"));
///
/// assert!(model.find_entity_type("Sales.Customer").is_some());
/// assert_eq!(model.key_names("Sales.Customer"), ["Id"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EdmModel {
    /// Default namespace.
    pub namespace: String,

    /// Name of the entity container.
    pub container_name: String,

    /// All entity types.
    #[serde(default)]
    pub entity_types: Vec<EntityType>,

    /// Entity sets and singletons of the container.
    #[serde(default)]
    pub navigation_sources: Vec<NavigationSource>,

    /// All actions and functions.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl EdmModel {
    /// Creates an empty model.
    pub fn new(namespace: impl Into<String>, container_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            container_name: container_name.into(),
            entity_types: Vec::new(),
            navigation_sources: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Loads a model from its JSON description.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds an entity type.
    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_types.push(entity_type);
        self
    }

    /// Adds an entity set or singleton.
    pub fn source(mut self, source: NavigationSource) -> Self {
        self.navigation_sources.push(source);
        self
    }

    /// Adds an action or function.
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Finds an entity type by fully qualified name.
    pub fn find_entity_type(&self, full_name: &str) -> Option<&EntityType> {
        let (namespace, name) = full_name.rsplit_once('.')?;
        self.entity_types
            .iter()
            .find(|t| t.namespace == namespace && t.name == name)
    }

    /// Returns the type and all its base types, most derived first.
    ///
    /// Unknown types yield an empty chain.
    pub fn type_chain(&self, full_name: &str) -> Vec<&EntityType> {
        let mut chain = Vec::new();
        let mut current = self.find_entity_type(full_name);
        while let Some(ty) = current {
            // Guards against a malformed model with an inheritance cycle.
            if chain.len() > self.entity_types.len() {
                break;
            }
            chain.push(ty);
            current = ty
                .base_type
                .as_deref()
                .and_then(|base| self.find_entity_type(base));
        }
        chain
    }

    /// Returns `true` if `full_name` is `base` or derives from it.
    pub fn is_same_or_derived(&self, full_name: &str, base: &str) -> bool {
        full_name == base || self.type_chain(full_name).iter().any(|t| t.full_name() == base)
    }

    /// Returns the key property names of a type, inherited keys included.
    pub fn key_names(&self, full_name: &str) -> &[String] {
        self.type_chain(full_name)
            .into_iter()
            .find(|t| !t.key.is_empty())
            .map(|t| t.key.as_slice())
            .unwrap_or_default()
    }

    /// Finds a structural property, searching base types too.
    pub fn find_property(&self, type_name: &str, property: &str) -> Option<&StructuralProperty> {
        self.type_chain(type_name)
            .into_iter()
            .find_map(|t| t.declared_property(property))
    }

    /// Finds a navigation property, searching base types too.
    pub fn find_navigation_property(
        &self,
        type_name: &str,
        property: &str,
    ) -> Option<&NavigationProperty> {
        self.type_chain(type_name)
            .into_iter()
            .find_map(|t| t.declared_navigation_property(property))
    }

    /// Returns `true` if the type (or a base) declares a property of that name.
    pub fn declares_property(&self, type_name: &str, property: &str) -> bool {
        self.find_property(type_name, property).is_some()
            || self.find_navigation_property(type_name, property).is_some()
    }

    /// Returns all structural properties of a type, base type properties first.
    pub fn structural_properties(&self, type_name: &str) -> Vec<&StructuralProperty> {
        self.type_chain(type_name)
            .into_iter()
            .rev()
            .flat_map(|t| t.properties.iter())
            .collect()
    }

    /// Returns all navigation properties of a type, base type properties first.
    pub fn navigation_properties(&self, type_name: &str) -> Vec<&NavigationProperty> {
        self.type_chain(type_name)
            .into_iter()
            .rev()
            .flat_map(|t| t.navigation_properties.iter())
            .collect()
    }

    /// Returns `true` if the type or one of its base types has a default stream.
    pub fn has_stream(&self, type_name: &str) -> bool {
        self.type_chain(type_name).iter().any(|t| t.has_stream)
    }

    // =========================================================================
    // Navigation sources
    // =========================================================================

    /// Finds an entity set or singleton by name.
    pub fn find_navigation_source(&self, name: &str) -> Option<&NavigationSource> {
        self.navigation_sources.iter().find(|s| s.name == name)
    }

    /// Derives the contained navigation source behind a containment property.
    ///
    /// Returns `None` if the property does not exist or is not a containment
    /// navigation property.
    pub fn contained_source(&self, parent_type: &str, property: &str) -> Option<NavigationSource> {
        let nav = self.find_navigation_property(parent_type, property)?;
        if !nav.contains_target {
            return None;
        }
        Some(NavigationSource {
            name: nav.name.clone(),
            kind: NavigationSourceKind::ContainedEntitySet,
            entity_type: nav.target_type.clone(),
            optimistic_concurrency: Vec::new(),
        })
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Returns the operations bindable to instances of a type.
    ///
    /// Operations bound to any base type are included.
    pub fn bindable_operations(&self, type_name: &str) -> Vec<&Operation> {
        self.operations
            .iter()
            .filter(|op| {
                op.binding_type()
                    .is_some_and(|binding| self.is_same_or_derived(type_name, binding))
            })
            .collect()
    }

    /// Returns `true` if more than one operation shares this operation's name.
    pub fn is_overloaded(&self, operation: &Operation) -> bool {
        self.operations
            .iter()
            .filter(|op| op.namespace == operation.namespace && op.name == operation.name)
            .count()
            > 1
    }

    /// Resolves a metadata fragment such as `NS.Name` or `NS.Name(p1,p2)`.
    ///
    /// A parameter list narrows overloads to those whose non-binding
    /// parameters match it exactly.
    pub fn resolve_operations(&self, fragment: &str) -> Vec<&Operation> {
        let (name, parameters) = match fragment.split_once('(') {
            Some((name, rest)) => {
                let list = rest.trim_end_matches(')');
                let params: Vec<&str> = list
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .collect();
                (name, Some(params))
            }
            None => (fragment, None),
        };

        self.operations
            .iter()
            .filter(|op| op.full_name() == name)
            .filter(|op| match &parameters {
                Some(params) => op.non_binding_parameter_names() == *params,
                None => true,
            })
            .collect()
    }
}
