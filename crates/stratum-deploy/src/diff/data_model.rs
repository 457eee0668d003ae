use std::collections::HashSet;

use serde_json::json;

use stratum_core::data_model::DataModelRequest;

use crate::change::FieldChange;
use crate::severity::Severity;

use super::{diff_scalar, ResourceDiffer};

/// The `views` list is compared as an ordered sequence — any difference,
/// including a pure reorder, is one `Changed("views")` entry. Severity
/// comes from set containment: as long as every existing view is still
/// in the desired list nothing is lost, so the change is safe.
pub struct DataModelDiffer;

impl ResourceDiffer for DataModelDiffer {
    type Resource = DataModelRequest;

    fn diff(current: &DataModelRequest, desired: &DataModelRequest) -> Vec<FieldChange> {
        let mut out = Vec::new();
        diff_scalar(&mut out, "name", &current.name, &desired.name, Severity::Safe);
        diff_scalar(
            &mut out,
            "description",
            &current.description,
            &desired.description,
            Severity::Safe,
        );
        if current.views != desired.views {
            let desired_set: HashSet<_> = desired.views.iter().collect();
            let severity = if current.views.iter().all(|v| desired_set.contains(v)) {
                Severity::Safe
            } else {
                Severity::Breaking
            };
            out.push(FieldChange::Changed {
                path: "views".to_string(),
                old: json!(current.views),
                new: json!(desired.views),
                severity,
            });
        }
        out
    }
}
