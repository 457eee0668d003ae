//! Field-level differs, one per resource kind.
//!
//! Contract: `diff(current, desired)` is deterministic and returns an
//! empty list iff the two values agree on every compared field. Differs
//! are pure — they never touch the network and never mutate input.

mod container;
mod data_model;
mod space;
mod view;

pub use container::ContainerDiffer;
pub use data_model::DataModelDiffer;
pub use space::SpaceDiffer;
pub use view::ViewDiffer;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

use stratum_core::WriteResource;

use crate::change::FieldChange;
use crate::severity::Severity;

/// A differ for one resource kind, selected statically at the
/// plan-builder call site.
pub trait ResourceDiffer {
    type Resource: WriteResource;

    fn diff(current: &Self::Resource, desired: &Self::Resource) -> Vec<FieldChange>;
}

/// Emit a `Changed` entry when a scalar field differs.
pub(crate) fn diff_scalar<T: PartialEq + Serialize>(
    out: &mut Vec<FieldChange>,
    path: &str,
    current: &T,
    desired: &T,
    severity: Severity,
) {
    if current != desired {
        out.push(FieldChange::Changed {
            path: path.to_string(),
            old: json!(current),
            new: json!(desired),
            severity,
        });
    }
}

/// Diff two keyed collections under a path prefix.
///
/// Desired-only keys become `Added`, current-only keys become `Removed`,
/// keys present on both sides but unequal become a `Group` holding the
/// element sub-diff.
pub(crate) fn diff_collection<T: PartialEq + Serialize>(
    out: &mut Vec<FieldChange>,
    prefix: &str,
    current: &BTreeMap<String, T>,
    desired: &BTreeMap<String, T>,
    added: Severity,
    removed: Severity,
    sub_diff: impl Fn(&T, &T) -> Vec<FieldChange>,
) {
    for (key, want) in desired {
        match current.get(key) {
            None => out.push(FieldChange::Added {
                path: format!("{prefix}.{key}"),
                value: json!(want),
                severity: added,
            }),
            Some(have) if have != want => out.push(FieldChange::Group {
                path: format!("{prefix}.{key}"),
                children: sub_diff(have, want),
            }),
            Some(_) => {}
        }
    }
    for (key, have) in current {
        if !desired.contains_key(key) {
            out.push(FieldChange::Removed {
                path: format!("{prefix}.{key}"),
                value: json!(have),
                severity: removed,
            });
        }
    }
}
