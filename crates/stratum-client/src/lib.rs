//! stratum-client
//!
//! The boundary to the remote data-modeling service: per-item outcome
//! types, object-safe batched endpoint traits and the client
//! configuration value. The transport itself (HTTP, auth refresh,
//! retries) lives behind these traits and is not part of this workspace.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod outcome;

pub use crate::config::ClientConfig;
pub use crate::endpoint::{BoxFuture, ContainerEndpoint, SchemaEndpoint, SchemaServices};
pub use crate::error::ClientError;
pub use crate::outcome::{ItemOutcome, ItemResult};
