//! Metadata selection (`$select`)

use std::collections::HashSet;

use crate::model::metadata::EdmModel;
use crate::model::metadata::NavigationProperty;
use crate::model::metadata::Operation;
use crate::model::metadata::StructuralProperty;

/// Which properties and operations a response includes metadata for.
///
/// # Example
///
/// ```
/// use odata_lib::metadata::SelectedProperties;
///
/// let selected = SelectedProperties::from_paths(["Name", "Orders/Total", "Sales.*"]);
/// assert!(selected.is_property_selected("Orders"));
/// assert!(!selected.is_property_selected("Photo"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectedProperties {
    /// No `$select`: everything is selected.
    #[default]
    EntireSubtree,
    /// Nothing is selected.
    Empty,
    /// An explicit selection.
    Partial(SelectedItems),
}

/// The items named by an explicit selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedItems {
    /// `*` selects every structural and navigation property, but no operations.
    pub all_properties: bool,
    /// Property and operation names, qualified or not.
    pub names: HashSet<String>,
    /// Namespaces selected with `NS.*`, selecting all their operations.
    pub operation_namespaces: HashSet<String>,
}

impl SelectedProperties {
    /// Parses `$select` items. Only the first segment of a path matters.
    ///
    /// A leading type-cast segment (`Sales.VipCustomer/Level`) is skipped.
    /// No items at all yields [`SelectedProperties::Empty`].
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items = SelectedItems::default();
        let mut any = false;
        for path in paths {
            let path = path.as_ref().trim();
            if path.is_empty() {
                continue;
            }
            any = true;

            let mut segments = path.split('/');
            let mut first = segments.next().unwrap_or_default();
            if first.contains('.') && !first.ends_with(".*") {
                if let Some(next) = segments.next() {
                    first = next;
                }
            }

            if first == "*" {
                items.all_properties = true;
            } else if let Some(namespace) = first.strip_suffix(".*") {
                items.operation_namespaces.insert(namespace.to_string());
            } else {
                items.names.insert(first.to_string());
            }
        }

        if any {
            Self::Partial(items)
        } else {
            Self::Empty
        }
    }

    /// Returns `true` if the named structural or navigation property is selected.
    pub fn is_property_selected(&self, name: &str) -> bool {
        match self {
            Self::EntireSubtree => true,
            Self::Empty => false,
            Self::Partial(items) => items.all_properties || items.names.contains(name),
        }
    }

    /// Returns `true` if the bindable operation is selected.
    pub fn is_operation_selected(&self, operation: &Operation) -> bool {
        match self {
            Self::EntireSubtree => true,
            Self::Empty => false,
            Self::Partial(items) => {
                items.operation_namespaces.contains(&operation.namespace)
                    || items.names.contains(&operation.full_name())
                    || items.names.contains(&operation.name)
            }
        }
    }

    /// Returns the selected navigation properties of a type, in declaration order.
    pub fn navigation_properties<'m>(
        &self,
        model: &'m EdmModel,
        type_name: &str,
    ) -> Vec<&'m NavigationProperty> {
        model
            .navigation_properties(type_name)
            .into_iter()
            .filter(|nav| self.is_property_selected(&nav.name))
            .collect()
    }

    /// Returns the selected stream properties of a type, in declaration order.
    pub fn stream_properties<'m>(
        &self,
        model: &'m EdmModel,
        type_name: &str,
    ) -> Vec<&'m StructuralProperty> {
        model
            .structural_properties(type_name)
            .into_iter()
            .filter(|p| p.is_stream() && self.is_property_selected(&p.name))
            .collect()
    }

    /// Returns the selected operations bindable to a type.
    pub fn bindable_operations<'m>(&self, model: &'m EdmModel, type_name: &str) -> Vec<&'m Operation> {
        model
            .bindable_operations(type_name)
            .into_iter()
            .filter(|op| self.is_operation_selected(op))
            .collect()
    }
}

/// Hook for narrowing the metadata a response advertises.
///
/// Every method receives the already-selected items and returns the subset to
/// keep. The defaults keep everything.
pub trait MetadataSelector {
    fn select_navigation_properties<'m>(
        &self,
        _type_name: &str,
        properties: Vec<&'m NavigationProperty>,
    ) -> Vec<&'m NavigationProperty> {
        properties
    }

    fn select_stream_properties<'m>(
        &self,
        _type_name: &str,
        properties: Vec<&'m StructuralProperty>,
    ) -> Vec<&'m StructuralProperty> {
        properties
    }

    fn select_bindable_operations<'m>(
        &self,
        _type_name: &str,
        operations: Vec<&'m Operation>,
    ) -> Vec<&'m Operation> {
        operations
    }
}
