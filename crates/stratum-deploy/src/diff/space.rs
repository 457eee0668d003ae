use stratum_core::space::SpaceRequest;

use crate::change::FieldChange;
use crate::severity::Severity;

use super::{diff_scalar, ResourceDiffer};

/// Spaces only carry metadata; every change is safe.
pub struct SpaceDiffer;

impl ResourceDiffer for SpaceDiffer {
    type Resource = SpaceRequest;

    fn diff(current: &SpaceRequest, desired: &SpaceRequest) -> Vec<FieldChange> {
        let mut out = Vec::new();
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
}
