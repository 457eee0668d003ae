use std::collections::HashSet;

use serde_json::{json, Value};

use stratum_core::container::ContainerRequest;
use stratum_core::data_model::DataModelRequest;
use stratum_core::space::SpaceRequest;
use stratum_core::view::ViewRequest;
use stratum_core::WriteResource;

use crate::change::{ChangeKind, FieldChange, ResourceChange};
use crate::error::DeployError;
use crate::plan::Plan;
use crate::severity::Severity;

/// Resources that can take a removed sub-element back, keyed by the
/// removal's field path.
pub(crate) trait Consolidate: WriteResource {
    fn restore_removed(&mut self, path: &str, value: &Value) -> Result<(), DeployError>;
}

impl Consolidate for SpaceRequest {
    fn restore_removed(&mut self, path: &str, _value: &Value) -> Result<(), DeployError> {
        // The space differ never emits removals.
        Err(DeployError::MalformedPath {
            kind: Self::KIND,
            path: path.to_string(),
        })
    }
}

impl Consolidate for ContainerRequest {
    fn restore_removed(&mut self, path: &str, value: &Value) -> Result<(), DeployError> {
        fn parse<T: serde::de::DeserializeOwned>(
            path: &str,
            value: &Value,
        ) -> Result<T, DeployError> {
            serde_json::from_value(value.clone()).map_err(|source| {
                DeployError::InvalidRemovedValue {
                    path: path.to_string(),
                    source,
                }
            })
        }
        if let Some(key) = path.strip_prefix("properties.") {
            self.properties.insert(key.to_string(), parse(path, value)?);
        } else if let Some(key) = path.strip_prefix("constraints.") {
            self.constraints.insert(key.to_string(), parse(path, value)?);
        } else if let Some(key) = path.strip_prefix("indexes.") {
            self.indexes.insert(key.to_string(), parse(path, value)?);
        } else {
            return Err(DeployError::MalformedPath {
                kind: Self::KIND,
                path: path.to_string(),
            });
        }
        Ok(())
    }
}

impl Consolidate for ViewRequest {
    fn restore_removed(&mut self, path: &str, value: &Value) -> Result<(), DeployError> {
        let Some(key) = path.strip_prefix("properties.") else {
            return Err(DeployError::MalformedPath {
                kind: Self::KIND,
                path: path.to_string(),
            });
        };
        let property = serde_json::from_value(value.clone()).map_err(|source| {
            DeployError::InvalidRemovedValue {
                path: path.to_string(),
                source,
            }
        })?;
        self.properties.insert(key.to_string(), property);
        Ok(())
    }
}

impl Consolidate for DataModelRequest {
    fn restore_removed(&mut self, path: &str, _value: &Value) -> Result<(), DeployError> {
        // Data models are consolidated through their views list, not
        // through removal entries.
        Err(DeployError::MalformedPath {
            kind: Self::KIND,
            path: path.to_string(),
        })
    }
}

/// Additive consolidation of one plan: after this, no entry deletes and
/// no surviving change removes anything from the remote target.
pub fn consolidate<R: Consolidate>(plan: Plan<R>) -> Result<Plan<R>, DeployError> {
    let resources = plan
        .resources
        .into_iter()
        .map(consolidate_change)
        .collect::<Result<_, _>>()?;
    Ok(Plan { resources })
}

/// Consolidate a single plan entry.
///
/// Delete candidates flip to unchanged by keeping the current value.
/// Removals are folded back into the desired value — except when a
/// matching `Added` shares the literal path, which marks a deliberate
/// delete-then-recreate pair that must survive.
pub(crate) fn consolidate_change<R: Consolidate>(
    mut change: ResourceChange<R>,
) -> Result<ResourceChange<R>, DeployError> {
    if change.kind() == ChangeKind::Delete {
        change.new = change.current.clone();
        return Ok(change);
    }

    let has_removal = change
        .changes
        .iter()
        .any(|fc| matches!(fc, FieldChange::Removed { .. }));
    if !has_removal {
        return Ok(change);
    }
    let Some(mut new) = change.new.take() else {
        return Ok(change);
    };
    if change.current.is_none() {
        return Err(DeployError::MissingCurrent {
            reference: change.reference.to_string(),
        });
    }

    let added_paths: HashSet<String> = change
        .changes
        .iter()
        .filter_map(|fc| match fc {
            FieldChange::Added { path, .. } => Some(path.clone()),
            _ => None,
        })
        .collect();

    let mut kept = Vec::with_capacity(change.changes.len());
    for fc in change.changes {
        match fc {
            FieldChange::Removed { ref path, ref value, .. }
                if !added_paths.contains(path.as_str()) =>
            {
                new.restore_removed(path, value)?;
                // Superseded: the desired value now carries the element.
            }
            other => kept.push(other),
        }
    }
    change.changes = kept;
    change.new = Some(new);
    Ok(change)
}

/// Data-model consolidation: the views list only ever grows. The merged
/// list keeps the current order and appends desired views not already
/// present, so the pending write is provably additive — the `views`
/// change is re-stated against the merged list, or dropped when the
/// merge adds nothing.
pub fn consolidate_data_models(
    plan: Plan<DataModelRequest>,
) -> Result<Plan<DataModelRequest>, DeployError> {
    let mut resources = Vec::with_capacity(plan.resources.len());
    for mut change in plan.resources {
        if change.kind() == ChangeKind::Delete {
            change.new = change.current.clone();
            resources.push(change);
            continue;
        }
        let views_changed = change
            .changes
            .iter()
            .any(|fc| matches!(fc, FieldChange::Changed { path, .. } if path == "views"));
        if !views_changed {
            resources.push(change);
            continue;
        }
        let Some(new) = change.new.as_mut() else {
            resources.push(change);
            continue;
        };
        let current = change.current.as_ref().ok_or_else(|| {
            DeployError::MissingCurrent {
                reference: new.reference().to_string(),
            }
        })?;

        let mut merged = current.views.clone();
        for view in &new.views {
            if !merged.contains(view) {
                merged.push(view.clone());
            }
        }
        new.views = merged.clone();

        change
            .changes
            .retain(|fc| !matches!(fc, FieldChange::Changed { path, .. } if path == "views"));
        if merged != current.views {
            change.changes.push(FieldChange::Changed {
                path: "views".to_string(),
                old: json!(current.views),
                new: json!(merged),
                severity: Severity::Safe,
            });
        }
        resources.push(change);
    }
    Ok(Plan { resources })
}
