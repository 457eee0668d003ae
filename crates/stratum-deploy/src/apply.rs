use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use stratum_client::{ItemResult, SchemaEndpoint, SchemaServices};
use stratum_core::container::ContainerRequest;
use stratum_core::data_model::DataModelRequest;
use stratum_core::refs::{ConstraintRef, IndexRef};
use stratum_core::space::SpaceRequest;
use stratum_core::view::ViewRequest;
use stratum_core::{ResourceKind, WriteResource};

use crate::change::FieldChange;
use crate::error::DeployError;
use crate::plan::{Plan, SchemaPlan};

/// Constraint and index deletes go to narrow endpoints; keep the batches
/// small.
const SUB_RESOURCE_DELETE_BATCH: usize = 10;

/// Outcome record for one resource kind, split by what the plan decided.
/// Unchanged and skipped entries never reached the network.
#[derive(Debug, Clone)]
pub struct AppliedChanges<R: WriteResource> {
    pub created: Vec<ItemResult<R::Ref>>,
    pub updated: Vec<ItemResult<R::Ref>>,
    pub deleted: Vec<ItemResult<R::Ref>>,
    pub unchanged: Vec<R::Ref>,
    pub skipped: Vec<R::Ref>,
    /// Field-level changes behind each updated reference.
    pub changed_fields: HashMap<R::Ref, Vec<FieldChange>>,
}

impl<R: WriteResource> Default for AppliedChanges<R> {
    fn default() -> Self {
        Self {
            created: vec![],
            updated: vec![],
            deleted: vec![],
            unchanged: vec![],
            skipped: vec![],
            changed_fields: HashMap::new(),
        }
    }
}

impl<R: WriteResource> AppliedChanges<R> {
    pub fn is_success(&self) -> bool {
        self.created
            .iter()
            .chain(&self.updated)
            .chain(&self.deleted)
            .all(ItemResult::is_success)
    }

    /// References that were successfully written, per category.
    pub fn created_ok(&self) -> HashSet<&R::Ref> {
        Self::successes(&self.created)
    }

    pub fn updated_ok(&self) -> HashSet<&R::Ref> {
        Self::successes(&self.updated)
    }

    pub fn deleted_ok(&self) -> HashSet<&R::Ref> {
        Self::successes(&self.deleted)
    }

    fn successes(results: &[ItemResult<R::Ref>]) -> HashSet<&R::Ref> {
        results
            .iter()
            .filter(|r| r.is_success())
            .map(|r| &r.reference)
            .collect()
    }
}

/// Outcomes of one apply pass across all four endpoints, plus the
/// container sub-resource deletions that run on their own endpoints.
#[derive(Debug, Clone, Default)]
pub struct SchemaApplied {
    pub spaces: AppliedChanges<SpaceRequest>,
    pub containers: AppliedChanges<ContainerRequest>,
    pub views: AppliedChanges<ViewRequest>,
    pub data_models: AppliedChanges<DataModelRequest>,
    pub removed_constraints: Vec<ItemResult<ConstraintRef>>,
    pub removed_indexes: Vec<ItemResult<IndexRef>>,
}

impl SchemaApplied {
    pub fn is_success(&self) -> bool {
        self.spaces.is_success()
            && self.containers.is_success()
            && self.views.is_success()
            && self.data_models.is_success()
            && self.removed_constraints.iter().all(ItemResult::is_success)
            && self.removed_indexes.iter().all(ItemResult::is_success)
    }
}

/// Execute a plan against the remote service. The only side-effecting
/// component of the pipeline.
///
/// Order: deletions in reverse dependency order, then container
/// constraint/index removal (their paths are disjoint from the container
/// upsert endpoint), then upserts in forward dependency order. Per-item
/// failures are recorded, never raised, and never abort sibling items or
/// other endpoints.
pub async fn apply_plan(
    services: &SchemaServices,
    plan: &SchemaPlan,
) -> Result<SchemaApplied, DeployError> {
    let mut applied = SchemaApplied::default();

    // 1. Deletions, dependents first.
    applied.data_models.deleted =
        delete_pass(services.data_models.as_ref(), &plan.data_models).await?;
    applied.views.deleted = delete_pass(services.views.as_ref(), &plan.views).await?;
    applied.containers.deleted =
        delete_pass(services.containers.as_ref(), &plan.containers).await?;
    applied.spaces.deleted = delete_pass(services.spaces.as_ref(), &plan.spaces).await?;

    // 2. Constraint and index removal.
    for chunk in plan.containers.constraints_to_remove().chunks(SUB_RESOURCE_DELETE_BATCH) {
        let results = services.containers.delete_constraints(chunk.to_vec()).await?;
        ensure_complete(ResourceKind::Container, chunk, &results)?;
        applied.removed_constraints.extend(results);
    }
    for chunk in plan.containers.indexes_to_remove().chunks(SUB_RESOURCE_DELETE_BATCH) {
        let results = services.containers.delete_indexes(chunk.to_vec()).await?;
        ensure_complete(ResourceKind::Container, chunk, &results)?;
        applied.removed_indexes.extend(results);
    }

    // 3. Upserts, dependencies first.
    upsert_pass(services.spaces.as_ref(), &plan.spaces, &mut applied.spaces).await?;
    upsert_pass(
        services.containers.as_ref(),
        &plan.containers,
        &mut applied.containers,
    )
    .await?;
    upsert_pass(services.views.as_ref(), &plan.views, &mut applied.views).await?;
    upsert_pass(
        services.data_models.as_ref(),
        &plan.data_models,
        &mut applied.data_models,
    )
    .await?;

    Ok(applied)
}

/// Issue one batched delete call for the plan's delete entries.
async fn delete_pass<W, E>(
    endpoint: &E,
    plan: &Plan<W>,
) -> Result<Vec<ItemResult<W::Ref>>, DeployError>
where
    W: WriteResource,
    E: SchemaEndpoint<W> + ?Sized,
{
    let refs: Vec<W::Ref> = plan.to_delete().map(|c| c.reference.clone()).collect();
    if refs.is_empty() {
        return Ok(vec![]);
    }
    tracing::info!(endpoint = %W::KIND, count = refs.len(), "deleting resources");
    let results = endpoint.delete(refs.clone()).await?;
    ensure_complete(W::KIND, &refs, &results)?;
    Ok(results)
}

/// Issue one batched upsert call for the plan's create and update
/// entries, classify each returned reference back into created versus
/// updated, and record the entries that needed no call.
async fn upsert_pass<W, E>(
    endpoint: &E,
    plan: &Plan<W>,
    applied: &mut AppliedChanges<W>,
) -> Result<(), DeployError>
where
    W: WriteResource,
    E: SchemaEndpoint<W> + ?Sized,
{
    applied.unchanged = plan.unchanged().map(|c| c.reference.clone()).collect();
    applied.skipped = plan.skipped().map(|c| c.reference.clone()).collect();
    for change in plan.to_update() {
        applied
            .changed_fields
            .insert(change.reference.clone(), change.changes.clone());
    }

    let create_refs: HashSet<W::Ref> = plan.to_create().map(|c| c.reference.clone()).collect();
    let items: Vec<W> = plan
        .to_upsert()
        .filter_map(|c| c.new.clone())
        .collect();
    if items.is_empty() {
        return Ok(());
    }
    let submitted: Vec<W::Ref> = items.iter().map(WriteResource::reference).collect();

    tracing::info!(
        endpoint = %W::KIND,
        creates = create_refs.len(),
        updates = submitted.len() - create_refs.len(),
        "upserting resources"
    );
    let results = endpoint.apply(items).await?;
    ensure_complete(W::KIND, &submitted, &results)?;

    let known: HashSet<&W::Ref> = submitted.iter().collect();
    for result in results {
        if create_refs.contains(&result.reference) {
            applied.created.push(result);
        } else if known.contains(&result.reference) {
            applied.updated.push(result);
        } else {
            tracing::warn!(
                endpoint = %W::KIND,
                reference = %result.reference,
                "batch outcome contains a reference that was never submitted"
            );
        }
    }
    Ok(())
}

/// Every submitted reference must come back with exactly one outcome; a
/// missing reference is a defect in the endpoint.
fn ensure_complete<Ref: Clone + Eq + Hash + Display>(
    endpoint: ResourceKind,
    submitted: &[Ref],
    results: &[ItemResult<Ref>],
) -> Result<(), DeployError> {
    let returned: HashSet<&Ref> = results.iter().map(|r| &r.reference).collect();
    for reference in submitted {
        if !returned.contains(reference) {
            return Err(DeployError::MissingOutcome {
                endpoint,
                reference: reference.to_string(),
            });
        }
    }
    Ok(())
}
