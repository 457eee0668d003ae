use stratum_core::container::{Constraint, ContainerProperty, ContainerRequest, IndexDef};

use crate::change::FieldChange;
use crate::severity::Severity;

use super::{diff_collection, diff_scalar, ResourceDiffer};

/// Containers hold stored data, so removals and type changes are the
/// risky operations: dropping a property loses data (breaking), dropping
/// a constraint or index only degrades the service (warning).
pub struct ContainerDiffer;

impl ResourceDiffer for ContainerDiffer {
    type Resource = ContainerRequest;

    fn diff(current: &ContainerRequest, desired: &ContainerRequest) -> Vec<FieldChange> {
        let mut out = Vec::new();
        diff_scalar(&mut out, "name", &current.name, &desired.name, Severity::Safe);
        diff_scalar(
            &mut out,
            "description",
            &current.description,
            &desired.description,
            Severity::Safe,
        );
        // Flipping node/edge storage invalidates every stored instance.
        diff_scalar(
            &mut out,
            "usedFor",
            &current.used_for,
            &desired.used_for,
            Severity::Breaking,
        );
        diff_collection(
            &mut out,
            "properties",
            &current.properties,
            &desired.properties,
            Severity::Safe,
            Severity::Breaking,
            diff_property,
        );
        diff_collection(
            &mut out,
            "constraints",
            &current.constraints,
            &desired.constraints,
            Severity::Safe,
            Severity::Warning,
            diff_constraint,
        );
        diff_collection(
            &mut out,
            "indexes",
            &current.indexes,
            &desired.indexes,
            Severity::Safe,
            Severity::Warning,
            diff_index,
        );
        out
    }
}

fn diff_property(current: &ContainerProperty, desired: &ContainerProperty) -> Vec<FieldChange> {
    let mut out = Vec::new();
    diff_scalar(
        &mut out,
        "type",
        &current.property_type,
        &desired.property_type,
        Severity::Breaking,
    );
    diff_scalar(
        &mut out,
        "nullable",
        &current.nullable,
        &desired.nullable,
        Severity::Breaking,
    );
    diff_scalar(
        &mut out,
        "autoIncrement",
        &current.auto_increment,
        &desired.auto_increment,
        Severity::Breaking,
    );
    diff_scalar(
        &mut out,
        "defaultValue",
        &current.default_value,
        &desired.default_value,
        Severity::Breaking,
    );
    diff_scalar(&mut out, "name", &current.name, &desired.name, Severity::Safe);
    diff_scalar(
        &mut out,
        "description",
        &current.description,
        &desired.description,
        Severity::Safe,
    );
    out
}

// Constraints and indexes cannot be edited in place, so their sub-diff
// is a single whole-value change.
fn diff_constraint(current: &Constraint, desired: &Constraint) -> Vec<FieldChange> {
    let mut out = Vec::new();
    diff_scalar(&mut out, "definition", current, desired, Severity::Warning);
    out
}

fn diff_index(current: &IndexDef, desired: &IndexDef) -> Vec<FieldChange> {
    let mut out = Vec::new();
    diff_scalar(&mut out, "definition", current, desired, Severity::Warning);
    out
}
