use serde::{Deserialize, Serialize};

use stratum_core::container::ContainerRequest;
use stratum_core::data_model::DataModelRequest;
use stratum_core::refs::{ConstraintRef, IndexRef};
use stratum_core::space::SpaceRequest;
use stratum_core::view::ViewRequest;
use stratum_core::WriteResource;

use crate::change::{ChangeKind, FieldChange, ResourceChange};
use crate::consolidate;
use crate::error::DeployError;
use crate::force;
use crate::severity::{max_severity, Severity};

/// Deployment plan for one resource kind: the per-resource decisions in
/// desired order. Immutable once built — transforms produce new plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Plan<R: WriteResource> {
    pub resources: Vec<ResourceChange<R>>,
}

impl<R: WriteResource> Plan<R> {
    pub fn empty() -> Self {
        Self { resources: vec![] }
    }

    fn of_kind(&self, kind: ChangeKind) -> impl Iterator<Item = &ResourceChange<R>> + '_ {
        self.resources.iter().filter(move |c| c.kind() == kind)
    }

    pub fn to_create(&self) -> impl Iterator<Item = &ResourceChange<R>> + '_ {
        self.of_kind(ChangeKind::Create)
    }

    pub fn to_update(&self) -> impl Iterator<Item = &ResourceChange<R>> + '_ {
        self.of_kind(ChangeKind::Update)
    }

    pub fn to_delete(&self) -> impl Iterator<Item = &ResourceChange<R>> + '_ {
        self.of_kind(ChangeKind::Delete)
    }

    /// Creates and updates merged, in plan order. This is the write set
    /// for the upsert endpoint.
    pub fn to_upsert(&self) -> impl Iterator<Item = &ResourceChange<R>> + '_ {
        self.resources
            .iter()
            .filter(|c| matches!(c.kind(), ChangeKind::Create | ChangeKind::Update))
    }

    pub fn unchanged(&self) -> impl Iterator<Item = &ResourceChange<R>> + '_ {
        self.of_kind(ChangeKind::Unchanged)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ResourceChange<R>> + '_ {
        self.of_kind(ChangeKind::Skip)
    }

    pub fn max_severity(&self) -> Severity {
        max_severity(self.resources.iter().map(ResourceChange::severity))
    }

    pub fn has_changes(&self) -> bool {
        self.resources.iter().any(|c| {
            matches!(
                c.kind(),
                ChangeKind::Create | ChangeKind::Update | ChangeKind::Delete
            )
        })
    }
}

impl Plan<ContainerRequest> {
    /// Constraints scheduled for removal, read off `Removed` changes
    /// with a `constraints.` path prefix. These go to the dedicated
    /// delete endpoint before any upsert.
    pub fn constraints_to_remove(&self) -> Vec<ConstraintRef> {
        self.sub_resource_removals("constraints.")
            .map(|(container, identifier)| ConstraintRef {
                container,
                identifier,
            })
            .collect()
    }

    /// Indexes scheduled for removal, read off `Removed` changes with an
    /// `indexes.` path prefix.
    pub fn indexes_to_remove(&self) -> Vec<IndexRef> {
        self.sub_resource_removals("indexes.")
            .map(|(container, identifier)| IndexRef {
                container,
                identifier,
            })
            .collect()
    }

    fn sub_resource_removals<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (stratum_core::ContainerRef, String)> + 'a {
        self.resources.iter().flat_map(move |change| {
            change.changes.iter().filter_map(move |fc| match fc {
                FieldChange::Removed { path, .. } => path
                    .strip_prefix(prefix)
                    .map(|identifier| (change.reference.clone(), identifier.to_string())),
                _ => None,
            })
        })
    }
}

/// The full deployment plan: one [`Plan`] per endpoint kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchemaPlan {
    pub spaces: Plan<SpaceRequest>,
    pub containers: Plan<ContainerRequest>,
    pub views: Plan<ViewRequest>,
    pub data_models: Plan<DataModelRequest>,
}

impl SchemaPlan {
    pub fn max_severity(&self) -> Severity {
        max_severity([
            self.spaces.max_severity(),
            self.containers.max_severity(),
            self.views.max_severity(),
            self.data_models.max_severity(),
        ])
    }

    pub fn has_changes(&self) -> bool {
        self.spaces.has_changes()
            || self.containers.has_changes()
            || self.views.has_changes()
            || self.data_models.has_changes()
    }

    /// Additive-mode transform: fold every removal back into the
    /// desired value so nothing is ever deleted from the remote.
    pub fn consolidate(self) -> Result<Self, DeployError> {
        Ok(Self {
            spaces: consolidate::consolidate(self.spaces)?,
            containers: consolidate::consolidate(self.containers)?,
            views: consolidate::consolidate(self.views)?,
            data_models: consolidate::consolidate_data_models(self.data_models)?,
        })
    }

    /// Rebuild-mode transform: push breaking updates through as
    /// delete-then-recreate, except containers holding data.
    pub fn force(self, drop_data: bool) -> Result<Self, DeployError> {
        Ok(Self {
            spaces: force::force(self.spaces, drop_data)?,
            containers: force::force(self.containers, drop_data)?,
            views: force::force(self.views, drop_data)?,
            data_models: force::force(self.data_models, drop_data)?,
        })
    }
}
