use std::collections::BTreeMap;
use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::refs::ContainerRef;
use crate::resource::{ReadResource, ResourceKind, WriteResource};

/// Desired state of a container.
///
/// Properties, constraints and indexes are keyed maps; `BTreeMap` keeps
/// diff output deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRequest {
    pub space: String,
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub used_for: UsedFor,
    pub properties: BTreeMap<String, ContainerProperty>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<String, Constraint>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub indexes: BTreeMap<String, IndexDef>,
}

impl WriteResource for ContainerRequest {
    type Ref = ContainerRef;
    const KIND: ResourceKind = ResourceKind::Container;

    fn reference(&self) -> ContainerRef {
        ContainerRef::new(&self.space, &self.external_id)
    }
}

/// Observed state of a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerResponse {
    pub space: String,
    pub external_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub used_for: UsedFor,
    pub properties: BTreeMap<String, ContainerProperty>,
    #[serde(default)]
    pub constraints: BTreeMap<String, Constraint>,
    #[serde(default)]
    pub indexes: BTreeMap<String, IndexDef>,
    #[serde(default)]
    pub is_global: bool,
    pub created_time: Timestamp,
    pub last_updated_time: Timestamp,
}

impl ReadResource for ContainerResponse {
    type Request = ContainerRequest;

    fn reference(&self) -> ContainerRef {
        ContainerRef::new(&self.space, &self.external_id)
    }

    fn as_request(&self) -> ContainerRequest {
        ContainerRequest {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            used_for: self.used_for,
            properties: self.properties.clone(),
            constraints: self.constraints.clone(),
            indexes: self.indexes.clone(),
        }
    }
}

/// Whether instances stored in the container are nodes, edges or both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsedFor {
    #[default]
    Node,
    Edge,
    All,
}

impl fmt::Display for UsedFor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UsedFor::Node => f.write_str("node"),
            UsedFor::Edge => f.write_str("edge"),
            UsedFor::All => f.write_str("all"),
        }
    }
}

/// A single stored property on a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProperty {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The stored type of a container property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    #[serde(rename = "type")]
    pub kind: PropertyTypeKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub list: bool,
    /// Target container hint for direct relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerRef>,
}

impl PropertyType {
    pub fn scalar(kind: PropertyTypeKind) -> Self {
        Self {
            kind,
            list: false,
            container: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyTypeKind {
    Text,
    Boolean,
    Float32,
    Float64,
    Int32,
    Int64,
    Timestamp,
    Date,
    Json,
    DirectRelation,
}

/// A named constraint on a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "constraintType")]
pub enum Constraint {
    Uniqueness { properties: Vec<String> },
    Requires { require: ContainerRef },
}

/// A named index on a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "indexType")]
pub enum IndexDef {
    Btree {
        properties: Vec<String>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        cursorable: bool,
    },
    Inverted {
        properties: Vec<String>,
    },
}
