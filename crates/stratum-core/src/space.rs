use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::refs::SpaceRef;
use crate::resource::{ReadResource, ResourceKind, WriteResource};

/// Desired state of a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRequest {
    pub space: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WriteResource for SpaceRequest {
    type Ref = SpaceRef;
    const KIND: ResourceKind = ResourceKind::Space;

    fn reference(&self) -> SpaceRef {
        SpaceRef::new(&self.space)
    }
}

/// Observed state of a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
    pub space: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_global: bool,
    pub created_time: Timestamp,
    pub last_updated_time: Timestamp,
}

impl ReadResource for SpaceResponse {
    type Request = SpaceRequest;

    fn reference(&self) -> SpaceRef {
        SpaceRef::new(&self.space)
    }

    fn as_request(&self) -> SpaceRequest {
        SpaceRequest {
            space: self.space.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}
