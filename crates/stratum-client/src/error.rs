use thiserror::Error;

/// Errors raised by an endpoint call as a whole.
///
/// Per-item failures are never errors — they come back as
/// [`ItemOutcome`](crate::outcome::ItemOutcome) data. `ClientError` is
/// reserved for reads that cannot produce a result at all and for
/// boundary defects.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("remote service rejected the request ({code}): {message}")]
    Rejected { code: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
