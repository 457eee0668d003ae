use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk classification of a change, ordered: a deployment is gated on
/// the maximum severity found anywhere in its plan.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Safe,
    Warning,
    Breaking,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Safe => f.write_str("safe"),
            Severity::Warning => f.write_str("warning"),
            Severity::Breaking => f.write_str("breaking"),
        }
    }
}

/// Maximum severity of a set, `Safe` when empty.
pub fn max_severity(severities: impl IntoIterator<Item = Severity>) -> Severity {
    severities.into_iter().max().unwrap_or_default()
}
