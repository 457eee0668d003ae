//! stratum-deploy
//!
//! Declarative schema reconciliation against the remote data-modeling
//! service: diff the desired schema against a snapshot, classify every
//! change by risk severity, build a reviewable plan, apply it with
//! dependency ordering and batched writes, and roll partially-applied
//! changes back on failure.
//!
//! Public API:
//! - `fetch_state()` — snapshot the remote state for a desired schema
//! - `create_plan()` — diff snapshot vs. desired into per-kind plans
//! - `deploy()` — fetch → plan → transform → gate → apply → rollback
//! - `purge()` — tear down every desired resource in reverse order

pub mod apply;
pub mod build;
pub mod change;
mod consolidate;
pub mod diff;
pub mod error;
mod force;
pub mod gate;
pub mod options;
pub mod plan;
pub mod rollback;
pub mod severity;
pub mod snapshot;

use serde::{Deserialize, Serialize};

use stratum_client::SchemaServices;
use stratum_core::{SchemaSet, WriteResource};

pub use crate::apply::{AppliedChanges, SchemaApplied};
pub use crate::change::{ChangeKind, FieldChange, ResourceChange};
pub use crate::error::DeployError;
pub use crate::options::{DeployOptions, ModusOperandi};
pub use crate::plan::{Plan, SchemaPlan};
pub use crate::severity::Severity;
pub use crate::snapshot::Snapshot;

/// Outcome status of one `deploy()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStatus {
    /// Everything applied (or everything rolled back cleanly).
    Success,
    /// The severity gate blocked the plan; nothing was written.
    Failure,
    /// Some writes failed and were not (or could not be) undone.
    Partial,
    /// Dry run: the plan is ready for review, nothing was written.
    Pending,
}

/// Everything a caller needs to audit one deployment: the plan as
/// gated, the snapshot it was computed from, and per-item outcomes of
/// the apply pass and the optional rollback.
#[derive(Debug)]
pub struct DeploymentResult {
    pub status: DeployStatus,
    pub plan: SchemaPlan,
    pub snapshot: Snapshot,
    pub responses: Option<SchemaApplied>,
    pub recovery: Option<SchemaApplied>,
}

/// The reconciliation engine. Holds the endpoint handles and the
/// per-deployment options; every `deploy()` call runs the full
/// fetch → plan → transform → gate → apply pipeline from scratch.
///
/// No coordination across concurrent deploys against the same target —
/// callers needing that must hold an external lock or lease.
pub struct Deployer {
    services: SchemaServices,
    options: DeployOptions,
}

impl Deployer {
    pub fn new(services: SchemaServices, options: DeployOptions) -> Self {
        Self { services, options }
    }

    pub fn options(&self) -> &DeployOptions {
        &self.options
    }

    /// Snapshot the remote state for every reference the desired schema
    /// names.
    pub async fn fetch_state(&self, desired: &SchemaSet) -> Result<Snapshot, DeployError> {
        snapshot::fetch_state(&self.services, desired).await
    }

    /// Diff the snapshot against the desired schema into per-kind plans.
    pub fn create_plan(&self, snapshot: &Snapshot, desired: &SchemaSet) -> SchemaPlan {
        build::create_plan(snapshot, desired, &self.options)
    }

    /// Run the full deployment pipeline.
    pub async fn deploy(&self, desired: &SchemaSet) -> Result<DeploymentResult, DeployError> {
        let snapshot = self.fetch_state(desired).await?;
        let plan = self.create_plan(&snapshot, desired);
        let plan = match self.options.modus_operandi {
            ModusOperandi::Additive => plan.consolidate()?,
            ModusOperandi::Rebuild => plan.force(self.options.drop_data)?,
        };

        if !gate::should_proceed(&plan, self.options.max_severity) {
            tracing::warn!(
                found = %plan.max_severity(),
                allowed = %self.options.max_severity,
                "deployment blocked by severity gate"
            );
            return Ok(DeploymentResult {
                status: DeployStatus::Failure,
                plan,
                snapshot,
                responses: None,
                recovery: None,
            });
        }

        if self.options.dry_run {
            tracing::info!("dry run: plan ready, no writes performed");
            return Ok(DeploymentResult {
                status: DeployStatus::Pending,
                plan,
                snapshot,
                responses: None,
                recovery: None,
            });
        }

        let responses = apply::apply_plan(&self.services, &plan).await?;
        if responses.is_success() {
            tracing::info!("deployment applied");
            return Ok(DeploymentResult {
                status: DeployStatus::Success,
                plan,
                snapshot,
                responses: Some(responses),
                recovery: None,
            });
        }

        if !self.options.auto_rollback {
            tracing::warn!("deployment partially applied, auto-rollback disabled");
            return Ok(DeploymentResult {
                status: DeployStatus::Partial,
                plan,
                snapshot,
                responses: Some(responses),
                recovery: None,
            });
        }

        tracing::warn!("deployment partially applied, rolling back");
        let recovery_plan = rollback::build_recovery_plan(&plan, &responses);
        let recovery = apply::apply_plan(&self.services, &recovery_plan).await?;
        let status = if recovery.is_success() {
            DeployStatus::Success
        } else {
            // A failed rollback is reported, not retried.
            DeployStatus::Partial
        };
        Ok(DeploymentResult {
            status,
            plan,
            snapshot,
            responses: Some(responses),
            recovery: Some(recovery),
        })
    }

    /// Delete every resource the desired schema names, dependents first.
    /// No severity gate — the caller asked for destruction explicitly.
    pub async fn purge(&self, desired: &SchemaSet) -> Result<SchemaApplied, DeployError> {
        if self.options.dry_run {
            tracing::info!("dry run: purge skipped");
            return Ok(SchemaApplied::default());
        }

        let plan = SchemaPlan {
            spaces: deletion_plan(&desired.spaces),
            containers: deletion_plan(&desired.containers),
            views: deletion_plan(&desired.views),
            data_models: deletion_plan(std::slice::from_ref(&desired.data_model)),
        };
        tracing::info!("purging desired schema from remote");
        apply::apply_plan(&self.services, &plan).await
    }
}

fn deletion_plan<R: WriteResource>(desired: &[R]) -> Plan<R> {
    Plan {
        resources: desired
            .iter()
            .map(|r| ResourceChange {
                reference: r.reference(),
                new: None,
                current: Some(r.clone()),
                changes: vec![],
                note: None,
            })
            .collect(),
    }
}
