//! Synthesis of bindable operations missing from the payload

use std::cell::OnceCell;

use log::trace;

use super::ResourceMetadataContext;
use super::context::operation_fragment;
use crate::model::OperationKind;
use crate::model::metadata::EdmModel;
use crate::model::metadata::Operation;

/// A bindable operation the payload did not advertise.
///
/// Target and title are filled in later by the owning metadata builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedOperation {
    pub kind: OperationKind,
    /// Absolute metadata URL (e.g., `http://host/$metadata#Sales.Approve`).
    pub metadata: String,
    /// Fully qualified operation name.
    pub name: String,
    /// Binding type, only when it differs from the resource's actual type.
    pub binding_type: Option<String>,
    /// Non-binding parameter names, set for overloaded functions only.
    pub parameter_names: Vec<String>,
}

/// Computes the selected bindable operations the wire did not carry.
///
/// The result is computed once, on first access, and split into actions and
/// functions.
#[derive(Debug, Default)]
pub struct MissingOperationGenerator {
    computed: OnceCell<(Vec<ComputedOperation>, Vec<ComputedOperation>)>,
}

impl MissingOperationGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the synthesized actions.
    pub fn computed_actions(&self, context: &ResourceMetadataContext<'_>) -> &[ComputedOperation] {
        &self.computed(context).0
    }

    /// Returns the synthesized functions.
    pub fn computed_functions(&self, context: &ResourceMetadataContext<'_>) -> &[ComputedOperation] {
        &self.computed(context).1
    }

    fn computed(
        &self,
        context: &ResourceMetadataContext<'_>,
    ) -> &(Vec<ComputedOperation>, Vec<ComputedOperation>) {
        self.computed.get_or_init(|| compute_missing_operations(context))
    }
}

fn compute_missing_operations(
    context: &ResourceMetadataContext<'_>,
) -> (Vec<ComputedOperation>, Vec<ComputedOperation>) {
    let (Some(model), selected) = (context.model(), context.selected_bindable_operations()) else {
        return Default::default();
    };
    if selected.is_empty() {
        return Default::default();
    }

    // Operations the wire already advertises, resolved against the model.
    let resource = context.resource();
    let advertised: Vec<&Operation> = resource
        .actions
        .iter()
        .chain(resource.functions.iter())
        .filter_map(|op| operation_fragment(&op.metadata))
        .flat_map(|fragment| model.resolve_operations(fragment))
        .collect();

    let metadata = context.metadata();
    let actual_type = context.actual_type_name();
    let mut actions = Vec::new();
    let mut functions = Vec::new();

    for operation in selected.iter().copied() {
        if advertised.contains(&operation) {
            continue;
        }

        let binding_type = operation
            .binding_type()
            .filter(|binding| *binding != actual_type)
            .map(str::to_string);
        let computed = ComputedOperation {
            kind: operation.kind,
            metadata: metadata.operation_metadata(operation),
            name: operation.full_name(),
            binding_type,
            parameter_names: target_parameter_names(model, operation),
        };
        trace!("Synthesized {} for {actual_type}", computed.metadata);

        match operation.kind {
            OperationKind::Action => actions.push(computed),
            OperationKind::Function => functions.push(computed),
        }
    }

    (actions, functions)
}

/// Only overloaded functions carry parameters in their target, matching
/// their metadata reference name.
fn target_parameter_names(model: &EdmModel, operation: &Operation) -> Vec<String> {
    if operation.is_action() || !model.is_overloaded(operation) {
        return Vec::new();
    }
    operation
        .non_binding_parameter_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}
