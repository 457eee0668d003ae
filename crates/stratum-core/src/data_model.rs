use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::refs::{DataModelRef, ViewRef};
use crate::resource::{ReadResource, ResourceKind, WriteResource};

/// Desired state of a data model. `views` is the ordered list of view
/// references the model exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelRequest {
    pub space: String,
    pub external_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub views: Vec<ViewRef>,
}

impl WriteResource for DataModelRequest {
    type Ref = DataModelRef;
    const KIND: ResourceKind = ResourceKind::DataModel;

    fn reference(&self) -> DataModelRef {
        DataModelRef::new(&self.space, &self.external_id, &self.version)
    }
}

/// Observed state of a data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelResponse {
    pub space: String,
    pub external_id: String,
    pub version: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub views: Vec<ViewRef>,
    #[serde(default)]
    pub is_global: bool,
    pub created_time: Timestamp,
    pub last_updated_time: Timestamp,
}

impl ReadResource for DataModelResponse {
    type Request = DataModelRequest;

    fn reference(&self) -> DataModelRef {
        DataModelRef::new(&self.space, &self.external_id, &self.version)
    }

    fn as_request(&self) -> DataModelRequest {
        DataModelRequest {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            version: self.version.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            views: self.views.clone(),
        }
    }
}
