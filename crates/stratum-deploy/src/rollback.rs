use stratum_core::WriteResource;

use crate::apply::{AppliedChanges, SchemaApplied};
use crate::change::{ChangeKind, FieldChange, ResourceChange};
use crate::plan::{Plan, SchemaPlan};

/// Build the recovery plan that undoes a partially-applied deployment.
///
/// Only successfully-applied items are reversed — failed items were
/// never applied, there is nothing to undo. The recovery plan runs
/// through the ordinary apply engine, so its deletions and recreations
/// get the same dependency ordering as a forward deploy.
pub fn build_recovery_plan(plan: &SchemaPlan, applied: &SchemaApplied) -> SchemaPlan {
    SchemaPlan {
        spaces: recover_kind(&plan.spaces, &applied.spaces),
        containers: recover_kind(&plan.containers, &applied.containers),
        views: recover_kind(&plan.views, &applied.views),
        data_models: recover_kind(&plan.data_models, &applied.data_models),
    }
}

fn recover_kind<R: WriteResource>(plan: &Plan<R>, applied: &AppliedChanges<R>) -> Plan<R> {
    let created_ok = applied.created_ok();
    let updated_ok = applied.updated_ok();
    let deleted_ok = applied.deleted_ok();

    let mut resources = Vec::new();
    for change in &plan.resources {
        match change.kind() {
            // A created resource did not exist before: delete it.
            ChangeKind::Create if created_ok.contains(&change.reference) => {
                resources.push(ResourceChange {
                    reference: change.reference.clone(),
                    new: None,
                    current: change.new.clone(),
                    changes: vec![],
                    note: Some("rollback of create".to_string()),
                });
            }
            // A deleted resource is recreated from its observed value.
            ChangeKind::Delete if deleted_ok.contains(&change.reference) => {
                resources.push(ResourceChange {
                    reference: change.reference.clone(),
                    new: change.current.clone(),
                    current: None,
                    changes: vec![],
                    note: Some("rollback of delete".to_string()),
                });
            }
            // An updated resource is reverted: sides swap, every field
            // change is reversed.
            ChangeKind::Update if updated_ok.contains(&change.reference) => {
                resources.push(ResourceChange {
                    reference: change.reference.clone(),
                    new: change.current.clone(),
                    current: change.new.clone(),
                    changes: change.changes.iter().map(FieldChange::reversed).collect(),
                    note: Some("rollback of update".to_string()),
                });
            }
            // Failed writes were never applied; unchanged and skipped
            // entries are explicitly excluded.
            ChangeKind::Create | ChangeKind::Delete | ChangeKind::Update => {}
            ChangeKind::Unchanged | ChangeKind::Skip => {}
        }
    }
    Plan { resources }
}
