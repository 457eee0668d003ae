use serde_json::json;

use stratum_core::container::ContainerRequest;
use stratum_core::{ReadResource, SchemaSet, WriteResource};

use crate::change::{FieldChange, ResourceChange};
use crate::diff::{
    ContainerDiffer, DataModelDiffer, ResourceDiffer, SpaceDiffer, ViewDiffer,
};
use crate::options::{DeployOptions, ModusOperandi};
use crate::plan::{Plan, SchemaPlan};
use crate::severity::Severity;
use crate::snapshot::Snapshot;

/// Build the full deployment plan from a snapshot and the desired
/// schema. Pure — deletions never originate here, they only arise from
/// the rebuild transform or from rollback.
pub fn create_plan(snapshot: &Snapshot, desired: &SchemaSet, options: &DeployOptions) -> SchemaPlan {
    let model_space = desired.data_model.space.as_str();
    let skip_foreign_space = !options.multi_space;

    let spaces = plan_resources(
        &desired.spaces,
        |r| snapshot.spaces.get(r).map(ReadResource::as_request),
        |_| None,
        SpaceDiffer::diff,
    );

    let mut containers = plan_resources(
        &desired.containers,
        |r| snapshot.containers.get(r).map(ReadResource::as_request),
        |c: &ContainerRequest| {
            (skip_foreign_space && c.space != model_space).then(|| {
                format!(
                    "container space '{}' does not match data model space '{model_space}'",
                    c.space
                )
            })
        },
        ContainerDiffer::diff,
    );
    if options.modus_operandi == ModusOperandi::Additive {
        rewrite_sub_resource_groups(&mut containers);
    }

    let views = plan_resources(
        &desired.views,
        |r| snapshot.views.get(r).map(ReadResource::as_request),
        |v: &stratum_core::view::ViewRequest| {
            (skip_foreign_space && v.space != model_space).then(|| {
                format!(
                    "view space '{}' does not match data model space '{model_space}'",
                    v.space
                )
            })
        },
        ViewDiffer::diff,
    );

    let data_models = plan_resources(
        std::slice::from_ref(&desired.data_model),
        |r| snapshot.data_models.get(r).map(ReadResource::as_request),
        |_| None,
        DataModelDiffer::diff,
    );

    let plan = SchemaPlan {
        spaces,
        containers,
        views,
        data_models,
    };

    tracing::debug!(
        creates = plan.spaces.to_create().count()
            + plan.containers.to_create().count()
            + plan.views.to_create().count()
            + plan.data_models.to_create().count(),
        updates = plan.spaces.to_update().count()
            + plan.containers.to_update().count()
            + plan.views.to_update().count()
            + plan.data_models.to_update().count(),
        max_severity = %plan.max_severity(),
        "deployment plan built"
    );

    plan
}

/// Plan one resource kind: look each desired resource up in the
/// snapshot, apply the skip criteria, diff the rest.
fn plan_resources<R: WriteResource>(
    desired: &[R],
    current_of: impl Fn(&R::Ref) -> Option<R>,
    skip_reason: impl Fn(&R) -> Option<String>,
    diff: impl Fn(&R, &R) -> Vec<FieldChange>,
) -> Plan<R> {
    let mut resources = Vec::with_capacity(desired.len());
    for want in desired {
        let reference = want.reference();
        if let Some(reason) = skip_reason(want) {
            resources.push(ResourceChange {
                reference,
                new: None,
                current: None,
                changes: vec![],
                note: Some(reason),
            });
            continue;
        }
        match current_of(&reference) {
            None => resources.push(ResourceChange {
                reference,
                new: Some(want.clone()),
                current: None,
                changes: vec![],
                note: None,
            }),
            Some(have) => {
                let changes = diff(&have, want);
                resources.push(ResourceChange {
                    reference,
                    new: Some(want.clone()),
                    current: Some(have),
                    changes,
                    note: None,
                });
            }
        }
    }
    Plan { resources }
}

/// Additive-mode rewrite: the remote forbids modifying a constraint or
/// index in place, so a modified sub-element becomes a matched
/// delete-then-recreate pair on the same path instead of a `Group`.
fn rewrite_sub_resource_groups(plan: &mut Plan<ContainerRequest>) {
    for change in &mut plan.resources {
        let (Some(current), Some(new)) = (&change.current, &change.new) else {
            continue;
        };
        change.changes = change
            .changes
            .iter()
            .flat_map(|fc| match fc {
                FieldChange::Group { path, .. } => {
                    if let Some(key) = path.strip_prefix("constraints.") {
                        match (current.constraints.get(key), new.constraints.get(key)) {
                            (Some(have), Some(want)) => vec![
                                FieldChange::Removed {
                                    path: path.clone(),
                                    value: json!(have),
                                    severity: Severity::Warning,
                                },
                                FieldChange::Added {
                                    path: path.clone(),
                                    value: json!(want),
                                    severity: Severity::Safe,
                                },
                            ],
                            _ => vec![fc.clone()],
                        }
                    } else if let Some(key) = path.strip_prefix("indexes.") {
                        match (current.indexes.get(key), new.indexes.get(key)) {
                            (Some(have), Some(want)) => vec![
                                FieldChange::Removed {
                                    path: path.clone(),
                                    value: json!(have),
                                    severity: Severity::Warning,
                                },
                                FieldChange::Added {
                                    path: path.clone(),
                                    value: json!(want),
                                    severity: Severity::Safe,
                                },
                            ],
                            _ => vec![fc.clone()],
                        }
                    } else {
                        vec![fc.clone()]
                    }
                }
                other => vec![other.clone()],
            })
            .collect();
    }
}
