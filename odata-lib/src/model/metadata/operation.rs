//! Action and function metadata

use serde::Deserialize;
use serde::Serialize;

use crate::model::OperationKind;

/// An action or function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Operation {
    /// Action or function.
    pub kind: OperationKind,

    /// Namespace the operation is declared in.
    pub namespace: String,

    /// Unqualified operation name.
    pub name: String,

    /// Whether the first parameter is a binding parameter.
    #[serde(default)]
    pub is_bound: bool,

    /// Parameters in declaration order, binding parameter first.
    #[serde(default)]
    pub parameters: Vec<OperationParameter>,
}

impl Operation {
    /// Creates an action bound to the given type.
    pub fn bound_action(
        namespace: impl Into<String>,
        name: impl Into<String>,
        binding_type: impl Into<String>,
    ) -> Self {
        Self {
            kind: OperationKind::Action,
            namespace: namespace.into(),
            name: name.into(),
            is_bound: true,
            parameters: vec![OperationParameter::new("bindingParameter", binding_type)],
        }
    }

    /// Creates a function bound to the given type.
    pub fn bound_function(
        namespace: impl Into<String>,
        name: impl Into<String>,
        binding_type: impl Into<String>,
    ) -> Self {
        Self {
            kind: OperationKind::Function,
            ..Self::bound_action(namespace, name, binding_type)
        }
    }

    /// Adds a parameter.
    pub fn parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(OperationParameter::new(name, type_name));
        self
    }

    /// Returns the fully qualified name (e.g., "Sales.Approve").
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Returns the binding parameter type, for bound operations.
    pub fn binding_type(&self) -> Option<&str> {
        if !self.is_bound {
            return None;
        }
        self.parameters.first().map(|p| p.type_name.as_str())
    }

    /// Returns the names of the parameters after the binding parameter.
    pub fn non_binding_parameter_names(&self) -> Vec<&str> {
        let skip = usize::from(self.is_bound);
        self.parameters
            .iter()
            .skip(skip)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Returns `true` if this is an action.
    pub fn is_action(&self) -> bool {
        self.kind == OperationKind::Action
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationParameter {
    /// Parameter name.
    pub name: String,
    /// Fully qualified parameter type name.
    #[serde(rename = "Type")]
    pub type_name: String,
}

impl OperationParameter {
    /// Creates a new parameter.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}
