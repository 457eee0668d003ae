use thiserror::Error;

use stratum_client::ClientError;
use stratum_core::ResourceKind;

/// Fatal errors of the deploy pipeline.
///
/// Per-item remote failures are not here — they are recorded as data in
/// the applied-changes record. These variants are either configuration
/// mistakes caught before any I/O or invariant violations that valid
/// input can never produce.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("unknown modus operandi: {0} (expected \"additive\" or \"rebuild\")")]
    UnknownModusOperandi(String),

    #[error("malformed change path for {kind}: {path}")]
    MalformedPath { kind: ResourceKind, path: String },

    #[error("cannot restore removed element at {path}: {source}")]
    InvalidRemovedValue {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("consolidation of {reference} requires the current value")]
    MissingCurrent { reference: String },

    #[error("{endpoint} batch outcome is missing reference {reference}")]
    MissingOutcome {
        endpoint: ResourceKind,
        reference: String,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}
