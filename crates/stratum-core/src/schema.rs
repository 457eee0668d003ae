use serde::{Deserialize, Serialize};

use crate::container::ContainerRequest;
use crate::data_model::DataModelRequest;
use crate::refs::{ContainerRef, DataModelRef, SpaceRef, ViewRef};
use crate::resource::WriteResource;
use crate::space::SpaceRequest;
use crate::view::ViewRequest;

/// The desired schema handed to the engine: spaces, containers, views
/// and exactly one data model referencing the views.
///
/// This is the single source of truth for a deployment — snapshot
/// fetching, planning and skip criteria all read from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSet {
    #[serde(default)]
    pub spaces: Vec<SpaceRequest>,
    #[serde(default)]
    pub containers: Vec<ContainerRequest>,
    #[serde(default)]
    pub views: Vec<ViewRequest>,
    pub data_model: DataModelRequest,
}

impl SchemaSet {
    pub fn space_refs(&self) -> Vec<SpaceRef> {
        self.spaces.iter().map(WriteResource::reference).collect()
    }

    pub fn container_refs(&self) -> Vec<ContainerRef> {
        self.containers.iter().map(WriteResource::reference).collect()
    }

    pub fn view_refs(&self) -> Vec<ViewRef> {
        self.views.iter().map(WriteResource::reference).collect()
    }

    pub fn data_model_ref(&self) -> DataModelRef {
        self.data_model.reference()
    }
}
