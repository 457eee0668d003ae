use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The four resource kinds the engine manages, in forward dependency
/// order: spaces contain containers and views, views feed data models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Space,
    Container,
    View,
    DataModel,
}

impl ResourceKind {
    /// The endpoint name on the remote service.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Space => "spaces",
            ResourceKind::Container => "containers",
            ResourceKind::View => "views",
            ResourceKind::DataModel => "datamodels",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// The desired ("request") form of a resource — the shape the caller
/// declares and the engine writes back to the remote service.
pub trait WriteResource:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Stable identity for this kind.
    type Ref: Clone
        + Eq
        + Hash
        + Debug
        + Display
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    const KIND: ResourceKind;

    fn reference(&self) -> Self::Ref;
}

/// The observed ("response") form of a resource. Responses carry
/// read-only fields the request form lacks and convert back to a request
/// for diffing and planning.
pub trait ReadResource: Clone + Debug + Send + Sync + 'static {
    type Request: WriteResource;

    fn reference(&self) -> <Self::Request as WriteResource>::Ref;

    /// Strip the read-only fields, leaving the writable value.
    fn as_request(&self) -> Self::Request;
}
