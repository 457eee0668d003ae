use serde::{Deserialize, Serialize};

/// Outcome of one submitted item within a batch call.
///
/// Batch writes are atomic per item, not per call: a single call may
/// return a mix of these. The remote rejecting an item
/// (`FailedResponse`) and the transport failing to deliver it
/// (`FailedRequest`) are both recorded, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Success,
    FailedResponse { code: u16, message: String },
    FailedRequest { error: String },
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Success)
    }
}

/// One submitted reference paired with its outcome. Every reference
/// submitted to a batch call must appear in the returned set exactly
/// once; a missing reference is a defect in the endpoint, not a
/// recoverable failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult<Ref> {
    pub reference: Ref,
    pub outcome: ItemOutcome,
}

impl<Ref> ItemResult<Ref> {
    pub fn success(reference: Ref) -> Self {
        Self {
            reference,
            outcome: ItemOutcome::Success,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}
