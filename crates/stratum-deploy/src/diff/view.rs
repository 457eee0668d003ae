use stratum_core::view::{ViewProperty, ViewRequest};

use crate::change::FieldChange;
use crate::severity::Severity;

use super::{diff_collection, diff_scalar, ResourceDiffer};

/// Views are projections: changing the filter, the implements chain or
/// how a property is sourced changes what every consumer reads, so those
/// are all breaking.
pub struct ViewDiffer;

impl ResourceDiffer for ViewDiffer {
    type Resource = ViewRequest;

    fn diff(current: &ViewRequest, desired: &ViewRequest) -> Vec<FieldChange> {
        let mut out = Vec::new();
        diff_scalar(&mut out, "name", &current.name, &desired.name, Severity::Safe);
        diff_scalar(
            &mut out,
            "description",
            &current.description,
            &desired.description,
            Severity::Safe,
        );
        diff_scalar(
            &mut out,
            "filter",
            &current.filter,
            &desired.filter,
            Severity::Breaking,
        );
        // Ordered comparison: implements resolves property collisions by
        // position, so a reorder is as breaking as a membership change.
        diff_scalar(
            &mut out,
            "implements",
            &current.implements,
            &desired.implements,
            Severity::Breaking,
        );
        diff_collection(
            &mut out,
            "properties",
            &current.properties,
            &desired.properties,
            Severity::Safe,
            Severity::Breaking,
            diff_view_property,
        );
        out
    }
}

fn diff_view_property(current: &ViewProperty, desired: &ViewProperty) -> Vec<FieldChange> {
    let mut out = Vec::new();
    if current.connection_type() != desired.connection_type() {
        diff_scalar(
            &mut out,
            "connectionType",
            &current.connection_type(),
            &desired.connection_type(),
            Severity::Breaking,
        );
        return out;
    }
    match (current, desired) {
        (ViewProperty::Mapped(have), ViewProperty::Mapped(want)) => {
            diff_scalar(
                &mut out,
                "container",
                &have.container,
                &want.container,
                Severity::Breaking,
            );
            diff_scalar(
                &mut out,
                "containerPropertyIdentifier",
                &have.container_property_identifier,
                &want.container_property_identifier,
                Severity::Breaking,
            );
            diff_scalar(
                &mut out,
                "source",
                &have.source,
                &want.source,
                Severity::Breaking,
            );
            diff_scalar(&mut out, "name", &have.name, &want.name, Severity::Safe);
            diff_scalar(
                &mut out,
                "description",
                &have.description,
                &want.description,
                Severity::Safe,
            );
        }
        (ViewProperty::Edge(have), ViewProperty::Edge(want)) => {
            diff_scalar(
                &mut out,
                "source",
                &have.source,
                &want.source,
                Severity::Breaking,
            );
            diff_scalar(
                &mut out,
                "type",
                &have.edge_type,
                &want.edge_type,
                Severity::Breaking,
            );
            diff_scalar(
                &mut out,
                "edgeSource",
                &have.edge_source,
                &want.edge_source,
                Severity::Breaking,
            );
            diff_scalar(
                &mut out,
                "direction",
                &have.direction,
                &want.direction,
                Severity::Breaking,
            );
            diff_scalar(&mut out, "name", &have.name, &want.name, Severity::Safe);
            diff_scalar(
                &mut out,
                "description",
                &have.description,
                &want.description,
                Severity::Safe,
            );
        }
        (
            ViewProperty::ReverseDirectRelation(have),
            ViewProperty::ReverseDirectRelation(want),
        ) => {
            diff_scalar(
                &mut out,
                "source",
                &have.source,
                &want.source,
                Severity::Breaking,
            );
            diff_scalar(
                &mut out,
                "through",
                &have.through,
                &want.through,
                Severity::Breaking,
            );
            diff_scalar(&mut out, "name", &have.name, &want.name, Severity::Safe);
            diff_scalar(
                &mut out,
                "description",
                &have.description,
                &want.description,
                Severity::Safe,
            );
        }
        // Different variants with the same connection label cannot occur;
        // the label encodes the variant.
        _ => {}
    }
    out
}
