use serde::{Deserialize, Serialize};
use serde_json::Value;

use stratum_core::WriteResource;

use crate::severity::{max_severity, Severity};

/// One detected difference between the observed and desired value of a
/// resource, addressed by a dot-separated field path.
///
/// Severity is always derivable bottom-up: leaves carry the
/// classification their differ assigned, groups report the maximum of
/// their children and never cache it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FieldChange {
    Added {
        path: String,
        value: Value,
        severity: Severity,
    },
    Removed {
        path: String,
        value: Value,
        severity: Severity,
    },
    Changed {
        path: String,
        old: Value,
        new: Value,
        severity: Severity,
    },
    Group {
        path: String,
        children: Vec<FieldChange>,
    },
}

impl FieldChange {
    pub fn path(&self) -> &str {
        match self {
            FieldChange::Added { path, .. }
            | FieldChange::Removed { path, .. }
            | FieldChange::Changed { path, .. }
            | FieldChange::Group { path, .. } => path,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            FieldChange::Added { severity, .. }
            | FieldChange::Removed { severity, .. }
            | FieldChange::Changed { severity, .. } => *severity,
            FieldChange::Group { children, .. } => {
                max_severity(children.iter().map(FieldChange::severity))
            }
        }
    }

    /// The change that undoes this one: additions become removals and
    /// vice versa, changed fields swap old and new, groups recurse.
    pub fn reversed(&self) -> FieldChange {
        match self {
            FieldChange::Added {
                path,
                value,
                severity,
            } => FieldChange::Removed {
                path: path.clone(),
                value: value.clone(),
                severity: *severity,
            },
            FieldChange::Removed {
                path,
                value,
                severity,
            } => FieldChange::Added {
                path: path.clone(),
                value: value.clone(),
                severity: *severity,
            },
            FieldChange::Changed {
                path,
                old,
                new,
                severity,
            } => FieldChange::Changed {
                path: path.clone(),
                old: new.clone(),
                new: old.clone(),
                severity: *severity,
            },
            FieldChange::Group { path, children } => FieldChange::Group {
                path: path.clone(),
                children: children.iter().map(FieldChange::reversed).collect(),
            },
        }
    }
}

/// What the plan decided to do with one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
    Unchanged,
    Skip,
}

/// The planned fate of a single resource: desired value, observed value
/// (both in request form) and the field-level differences between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "", rename_all = "snake_case")]
pub struct ResourceChange<R: WriteResource> {
    pub reference: R::Ref,
    pub new: Option<R>,
    pub current: Option<R>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<R: WriteResource> ResourceChange<R> {
    /// Pure classification from presence of new/current and whether any
    /// field changed.
    pub fn kind(&self) -> ChangeKind {
        match (self.new.is_some(), self.current.is_some()) {
            (true, false) => ChangeKind::Create,
            (false, true) => ChangeKind::Delete,
            (true, true) => {
                if self.changes.is_empty() {
                    ChangeKind::Unchanged
                } else {
                    ChangeKind::Update
                }
            }
            (false, false) => ChangeKind::Skip,
        }
    }

    pub fn severity(&self) -> Severity {
        max_severity(self.changes.iter().map(FieldChange::severity))
    }
}
