use crate::plan::SchemaPlan;
use crate::severity::Severity;

/// The deploy gate: proceed only when no planned change exceeds the
/// allowed severity. An empty plan is safe by definition.
pub fn should_proceed(plan: &SchemaPlan, max_allowed: Severity) -> bool {
    plan.max_severity() <= max_allowed
}
