//! stratum-core
//!
//! Pure domain types for the data-modeling schema: references,
//! request/response values for spaces, containers, views and data models,
//! and the desired `SchemaSet`. No engine logic and no I/O — this is the
//! shared vocabulary of the Stratum system.

pub mod container;
pub mod data_model;
pub mod error;
pub mod refs;
pub mod resource;
pub mod schema;
pub mod space;
pub mod view;

pub use crate::error::CoreError;
pub use crate::refs::{
    ConstraintRef, ContainerRef, DataModelRef, DirectRelationRef, IndexRef, PropertyRef,
    SpaceRef, ViewRef,
};
pub use crate::resource::{ReadResource, ResourceKind, WriteResource};
pub use crate::schema::SchemaSet;
