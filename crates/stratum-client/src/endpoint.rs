use std::future::Future;
use std::pin::Pin;

use stratum_core::container::{ContainerRequest, ContainerResponse};
use stratum_core::data_model::{DataModelRequest, DataModelResponse};
use stratum_core::refs::{ConstraintRef, IndexRef};
use stratum_core::space::{SpaceRequest, SpaceResponse};
use stratum_core::view::{ViewRequest, ViewResponse};
use stratum_core::{ReadResource, WriteResource};

use crate::error::ClientError;
use crate::outcome::ItemResult;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One batched endpoint per resource kind.
///
/// `apply` is an upsert: the remote creates missing items and updates
/// existing ones in the same call. All three methods operate per item;
/// partial success within a batch is expected.
///
/// Methods return boxed futures for dyn compatibility.
pub trait SchemaEndpoint<W: WriteResource>: Send + Sync {
    /// The observed form returned by `retrieve`.
    type Read: ReadResource<Request = W>;

    /// Fetch current state for the given references. References that do
    /// not exist are simply absent from the result.
    fn retrieve(&self, refs: Vec<W::Ref>) -> BoxFuture<'_, Result<Vec<Self::Read>, ClientError>>;

    /// Create-or-update the given items, one outcome per submitted
    /// reference.
    fn apply(&self, items: Vec<W>) -> BoxFuture<'_, Result<Vec<ItemResult<W::Ref>>, ClientError>>;

    /// Delete the given references, one outcome per submitted reference.
    fn delete(
        &self,
        refs: Vec<W::Ref>,
    ) -> BoxFuture<'_, Result<Vec<ItemResult<W::Ref>>, ClientError>>;
}

/// Container endpoint with the two extra delete-only sub-resource
/// endpoints. Constraints and indexes cannot be modified in place on the
/// remote — only deleted and recreated.
pub trait ContainerEndpoint:
    SchemaEndpoint<ContainerRequest, Read = ContainerResponse>
{
    fn delete_constraints(
        &self,
        refs: Vec<ConstraintRef>,
    ) -> BoxFuture<'_, Result<Vec<ItemResult<ConstraintRef>>, ClientError>>;

    fn delete_indexes(
        &self,
        refs: Vec<IndexRef>,
    ) -> BoxFuture<'_, Result<Vec<ItemResult<IndexRef>>, ClientError>>;
}

/// The four endpoints the deploy engine writes through, one trait object
/// per kind.
pub struct SchemaServices {
    pub spaces: Box<dyn SchemaEndpoint<SpaceRequest, Read = SpaceResponse>>,
    pub containers: Box<dyn ContainerEndpoint>,
    pub views: Box<dyn SchemaEndpoint<ViewRequest, Read = ViewResponse>>,
    pub data_models: Box<dyn SchemaEndpoint<DataModelRequest, Read = DataModelResponse>>,
}

impl SchemaServices {
    pub fn new(
        spaces: Box<dyn SchemaEndpoint<SpaceRequest, Read = SpaceResponse>>,
        containers: Box<dyn ContainerEndpoint>,
        views: Box<dyn SchemaEndpoint<ViewRequest, Read = ViewResponse>>,
        data_models: Box<dyn SchemaEndpoint<DataModelRequest, Read = DataModelResponse>>,
    ) -> Self {
        Self {
            spaces,
            containers,
            views,
            data_models,
        }
    }
}
