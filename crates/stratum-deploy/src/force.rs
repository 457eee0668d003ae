use stratum_core::ResourceKind;

use crate::change::{ChangeKind, ResourceChange};
use crate::consolidate::{consolidate_change, Consolidate};
use crate::error::DeployError;
use crate::plan::Plan;
use crate::severity::Severity;

/// Rebuild-mode transform: breaking updates become a pure deletion
/// followed by a pure creation of the same reference.
///
/// Containers are the exception while `drop_data` is off — recreating a
/// container destroys its stored instances, so those entries are
/// consolidated instead. A residual breaking change (a `usedFor` flip,
/// say) is left in the plan to fail at apply time rather than
/// pre-validated away.
pub fn force<R: Consolidate>(plan: Plan<R>, drop_data: bool) -> Result<Plan<R>, DeployError> {
    let mut resources = Vec::with_capacity(plan.resources.len());
    for change in plan.resources {
        if change.kind() != ChangeKind::Update || change.severity() != Severity::Breaking {
            resources.push(change);
            continue;
        }
        if drop_data || R::KIND != ResourceKind::Container {
            resources.push(ResourceChange {
                reference: change.reference.clone(),
                new: None,
                current: change.current,
                changes: vec![],
                note: Some("rebuild: removed before recreate".to_string()),
            });
            // The original change list rides on the create half so the
            // gate still sees what forced the rebuild.
            resources.push(ResourceChange {
                reference: change.reference,
                new: change.new,
                current: None,
                changes: change.changes,
                note: change.note,
            });
        } else {
            resources.push(consolidate_change(change)?);
        }
    }
    Ok(Plan { resources })
}
