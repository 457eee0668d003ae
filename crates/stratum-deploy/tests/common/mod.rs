//! Shared test harness: an in-memory fake of the remote endpoints with
//! scriptable per-item outcomes and a call recorder, plus schema
//! fixtures.

// Each test binary uses a subset of this module.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use jiff::Timestamp;

use stratum_client::{
    BoxFuture, ClientError, ContainerEndpoint, ItemOutcome, ItemResult, SchemaEndpoint,
    SchemaServices,
};
use stratum_core::container::{
    ContainerProperty, ContainerRequest, ContainerResponse, PropertyType, PropertyTypeKind,
};
use stratum_core::data_model::{DataModelRequest, DataModelResponse};
use stratum_core::refs::{ConstraintRef, IndexRef, ViewRef};
use stratum_core::space::{SpaceRequest, SpaceResponse};
use stratum_core::view::{MappedProperty, ViewProperty, ViewRequest, ViewResponse};
use stratum_core::{ContainerRef, ReadResource, SchemaSet, WriteResource};
use stratum_deploy::Snapshot;

/// Per-endpoint record of every write batch, keyed by reference display
/// strings.
#[derive(Debug, Default)]
pub struct EndpointLog {
    pub applied: Vec<Vec<String>>,
    pub deleted: Vec<Vec<String>>,
    pub constraint_deletes: Vec<Vec<String>>,
    pub index_deletes: Vec<Vec<String>>,
}

pub struct FakeEndpoint<W: WriteResource, Rd> {
    existing: Vec<Rd>,
    fail: HashMap<String, ItemOutcome>,
    omit: HashSet<String>,
    pub log: Arc<Mutex<EndpointLog>>,
    ops: Arc<Mutex<Vec<String>>>,
    _marker: PhantomData<fn() -> W>,
}

impl<W: WriteResource, Rd> FakeEndpoint<W, Rd> {
    /// `ops` is the cross-endpoint sequence of write calls, shared by
    /// all fakes in a test.
    pub fn new(ops: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            existing: vec![],
            fail: HashMap::new(),
            omit: HashSet::new(),
            log: Arc::new(Mutex::new(EndpointLog::default())),
            ops,
            _marker: PhantomData,
        }
    }

    pub fn with_existing(mut self, items: Vec<Rd>) -> Self {
        self.existing = items;
        self
    }

    /// Script a non-success outcome for one reference (applies to both
    /// upserts and deletes).
    pub fn with_failure(mut self, reference: &str, outcome: ItemOutcome) -> Self {
        self.fail.insert(reference.to_string(), outcome);
        self
    }

    /// Drop the outcome for one reference entirely — a defective
    /// endpoint for the missing-outcome tests.
    pub fn with_omitted(mut self, reference: &str) -> Self {
        self.omit.insert(reference.to_string());
        self
    }

    fn outcome_for(&self, key: &str) -> ItemOutcome {
        self.fail.get(key).cloned().unwrap_or(ItemOutcome::Success)
    }

    fn record(&self, op: &str) {
        self.ops
            .lock()
            .unwrap()
            .push(format!("{op} {}", W::KIND));
    }

    fn results_for<Ref: Clone + std::fmt::Display>(&self, refs: &[Ref]) -> Vec<ItemResult<Ref>> {
        refs.iter()
            .filter(|r| !self.omit.contains(&r.to_string()))
            .map(|r| ItemResult {
                reference: r.clone(),
                outcome: self.outcome_for(&r.to_string()),
            })
            .collect()
    }
}

impl<W, Rd> SchemaEndpoint<W> for FakeEndpoint<W, Rd>
where
    W: WriteResource,
    Rd: ReadResource<Request = W>,
{
    type Read = Rd;

    fn retrieve(&self, refs: Vec<W::Ref>) -> BoxFuture<'_, Result<Vec<Rd>, ClientError>> {
        let hits: Vec<Rd> = self
            .existing
            .iter()
            .filter(|r| refs.contains(&ReadResource::reference(*r)))
            .cloned()
            .collect();
        Box::pin(async move { Ok(hits) })
    }

    fn apply(&self, items: Vec<W>) -> BoxFuture<'_, Result<Vec<ItemResult<W::Ref>>, ClientError>> {
        self.record("apply");
        let refs: Vec<W::Ref> = items.iter().map(WriteResource::reference).collect();
        self.log
            .lock()
            .unwrap()
            .applied
            .push(refs.iter().map(ToString::to_string).collect());
        let results = self.results_for(&refs);
        Box::pin(async move { Ok(results) })
    }

    fn delete(
        &self,
        refs: Vec<W::Ref>,
    ) -> BoxFuture<'_, Result<Vec<ItemResult<W::Ref>>, ClientError>> {
        self.record("delete");
        self.log
            .lock()
            .unwrap()
            .deleted
            .push(refs.iter().map(ToString::to_string).collect());
        let results = self.results_for(&refs);
        Box::pin(async move { Ok(results) })
    }
}

impl ContainerEndpoint for FakeEndpoint<ContainerRequest, ContainerResponse> {
    fn delete_constraints(
        &self,
        refs: Vec<ConstraintRef>,
    ) -> BoxFuture<'_, Result<Vec<ItemResult<ConstraintRef>>, ClientError>> {
        self.record("delete_constraints");
        self.log
            .lock()
            .unwrap()
            .constraint_deletes
            .push(refs.iter().map(ToString::to_string).collect());
        let results = self.results_for(&refs);
        Box::pin(async move { Ok(results) })
    }

    fn delete_indexes(
        &self,
        refs: Vec<IndexRef>,
    ) -> BoxFuture<'_, Result<Vec<ItemResult<IndexRef>>, ClientError>> {
        self.record("delete_indexes");
        self.log
            .lock()
            .unwrap()
            .index_deletes
            .push(refs.iter().map(ToString::to_string).collect());
        let results = self.results_for(&refs);
        Box::pin(async move { Ok(results) })
    }
}

pub fn services(
    spaces: FakeEndpoint<SpaceRequest, SpaceResponse>,
    containers: FakeEndpoint<ContainerRequest, ContainerResponse>,
    views: FakeEndpoint<ViewRequest, ViewResponse>,
    data_models: FakeEndpoint<DataModelRequest, DataModelResponse>,
) -> SchemaServices {
    SchemaServices::new(
        Box::new(spaces),
        Box::new(containers),
        Box::new(views),
        Box::new(data_models),
    )
}

// ── fixtures ──────────────────────────────────────────────────────────

pub fn space(name: &str) -> SpaceRequest {
    SpaceRequest {
        space: name.to_string(),
        name: None,
        description: None,
    }
}

pub fn space_response(req: &SpaceRequest) -> SpaceResponse {
    SpaceResponse {
        space: req.space.clone(),
        name: req.name.clone(),
        description: req.description.clone(),
        is_global: false,
        created_time: Timestamp::UNIX_EPOCH,
        last_updated_time: Timestamp::UNIX_EPOCH,
    }
}

pub fn property(kind: PropertyTypeKind) -> ContainerProperty {
    ContainerProperty {
        property_type: PropertyType::scalar(kind),
        nullable: Some(true),
        auto_increment: None,
        default_value: None,
        name: None,
        description: None,
    }
}

pub fn container(space: &str, id: &str, props: &[(&str, PropertyTypeKind)]) -> ContainerRequest {
    ContainerRequest {
        space: space.to_string(),
        external_id: id.to_string(),
        name: None,
        description: None,
        used_for: Default::default(),
        properties: props
            .iter()
            .map(|(name, kind)| (name.to_string(), property(*kind)))
            .collect(),
        constraints: Default::default(),
        indexes: Default::default(),
    }
}

pub fn container_response(req: &ContainerRequest) -> ContainerResponse {
    ContainerResponse {
        space: req.space.clone(),
        external_id: req.external_id.clone(),
        name: req.name.clone(),
        description: req.description.clone(),
        used_for: req.used_for,
        properties: req.properties.clone(),
        constraints: req.constraints.clone(),
        indexes: req.indexes.clone(),
        is_global: false,
        created_time: Timestamp::UNIX_EPOCH,
        last_updated_time: Timestamp::UNIX_EPOCH,
    }
}

pub fn mapped_property(container: ContainerRef, identifier: &str) -> ViewProperty {
    ViewProperty::Mapped(MappedProperty {
        container,
        container_property_identifier: identifier.to_string(),
        source: None,
        name: None,
        description: None,
    })
}

pub fn view(space: &str, id: &str, version: &str) -> ViewRequest {
    ViewRequest {
        space: space.to_string(),
        external_id: id.to_string(),
        version: version.to_string(),
        name: None,
        description: None,
        filter: None,
        implements: vec![],
        properties: Default::default(),
    }
}

pub fn view_response(req: &ViewRequest) -> ViewResponse {
    ViewResponse {
        space: req.space.clone(),
        external_id: req.external_id.clone(),
        version: req.version.clone(),
        name: req.name.clone(),
        description: req.description.clone(),
        filter: req.filter.clone(),
        implements: req.implements.clone(),
        properties: req.properties.clone(),
        is_global: false,
        created_time: Timestamp::UNIX_EPOCH,
        last_updated_time: Timestamp::UNIX_EPOCH,
    }
}

pub fn data_model(space: &str, id: &str, version: &str, views: Vec<ViewRef>) -> DataModelRequest {
    DataModelRequest {
        space: space.to_string(),
        external_id: id.to_string(),
        version: version.to_string(),
        name: None,
        description: None,
        views,
    }
}

pub fn data_model_response(req: &DataModelRequest) -> DataModelResponse {
    DataModelResponse {
        space: req.space.clone(),
        external_id: req.external_id.clone(),
        version: req.version.clone(),
        name: req.name.clone(),
        description: req.description.clone(),
        views: req.views.clone(),
        is_global: false,
        created_time: Timestamp::UNIX_EPOCH,
        last_updated_time: Timestamp::UNIX_EPOCH,
    }
}

pub fn snapshot(
    spaces: Vec<SpaceResponse>,
    containers: Vec<ContainerResponse>,
    views: Vec<ViewResponse>,
    data_models: Vec<DataModelResponse>,
) -> Snapshot {
    fn index<T: ReadResource>(
        items: Vec<T>,
    ) -> HashMap<<T::Request as WriteResource>::Ref, T> {
        items
            .into_iter()
            .map(|item| (item.reference(), item))
            .collect()
    }
    Snapshot {
        taken_at: Timestamp::UNIX_EPOCH,
        spaces: index(spaces),
        containers: index(containers),
        views: index(views),
        data_models: index(data_models),
    }
}

pub fn schema(
    spaces: Vec<SpaceRequest>,
    containers: Vec<ContainerRequest>,
    views: Vec<ViewRequest>,
    data_model: DataModelRequest,
) -> SchemaSet {
    SchemaSet {
        spaces,
        containers,
        views,
        data_model,
    }
}
