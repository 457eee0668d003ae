use std::collections::HashMap;

use jiff::Timestamp;

use stratum_client::SchemaServices;
use stratum_core::container::ContainerResponse;
use stratum_core::data_model::DataModelResponse;
use stratum_core::refs::{ContainerRef, DataModelRef, SpaceRef, ViewRef};
use stratum_core::space::SpaceResponse;
use stratum_core::view::ViewResponse;
use stratum_core::{ReadResource, SchemaSet};

use crate::error::DeployError;

/// Point-in-time read of the remote state for every reference the
/// desired schema names. Read once per deploy; the fetch→apply staleness
/// window is compensated by the severity gate and dry-run review, not by
/// locking.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub taken_at: Timestamp,
    pub spaces: HashMap<SpaceRef, SpaceResponse>,
    pub containers: HashMap<ContainerRef, ContainerResponse>,
    pub views: HashMap<ViewRef, ViewResponse>,
    pub data_models: HashMap<DataModelRef, DataModelResponse>,
}

/// This is a pure read pass — no state required, no mutations.
pub async fn fetch_state(
    services: &SchemaServices,
    desired: &SchemaSet,
) -> Result<Snapshot, DeployError> {
    let spaces = index(services.spaces.retrieve(desired.space_refs()).await?);
    let containers = index(services.containers.retrieve(desired.container_refs()).await?);
    let views = index(services.views.retrieve(desired.view_refs()).await?);
    let data_models = index(
        services
            .data_models
            .retrieve(vec![desired.data_model_ref()])
            .await?,
    );

    tracing::debug!(
        spaces = spaces.len(),
        containers = containers.len(),
        views = views.len(),
        data_models = data_models.len(),
        "fetched remote state"
    );

    Ok(Snapshot {
        taken_at: Timestamp::now(),
        spaces,
        containers,
        views,
        data_models,
    })
}

fn index<T: ReadResource>(
    items: Vec<T>,
) -> HashMap<<T::Request as stratum_core::WriteResource>::Ref, T> {
    items
        .into_iter()
        .map(|item| (item.reference(), item))
        .collect()
}
