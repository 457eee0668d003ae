use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::refs::{ContainerRef, DirectRelationRef, PropertyRef, ViewRef};
use crate::resource::{ReadResource, ResourceKind, WriteResource};

/// Desired state of a view.
///
/// `implements` is order-significant: the service resolves property
/// collisions by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRequest {
    pub space: String,
    pub external_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<ViewRef>,
    pub properties: BTreeMap<String, ViewProperty>,
}

impl WriteResource for ViewRequest {
    type Ref = ViewRef;
    const KIND: ResourceKind = ResourceKind::View;

    fn reference(&self) -> ViewRef {
        ViewRef::new(&self.space, &self.external_id, &self.version)
    }
}

/// Observed state of a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub space: String,
    pub external_id: String,
    pub version: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filter: Option<serde_json::Value>,
    #[serde(default)]
    pub implements: Vec<ViewRef>,
    pub properties: BTreeMap<String, ViewProperty>,
    #[serde(default)]
    pub is_global: bool,
    pub created_time: Timestamp,
    pub last_updated_time: Timestamp,
}

impl ReadResource for ViewResponse {
    type Request = ViewRequest;

    fn reference(&self) -> ViewRef {
        ViewRef::new(&self.space, &self.external_id, &self.version)
    }

    fn as_request(&self) -> ViewRequest {
        ViewRequest {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            version: self.version.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            filter: self.filter.clone(),
            implements: self.implements.clone(),
            properties: self.properties.clone(),
        }
    }
}

/// A view property. Closed sum — the variant plus the edge/reverse
/// multiplicity is the property's connection type on the wire.
///
/// Untagged: edges carry `type`, reverse direct relations carry
/// `through`, mapped properties carry `container`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewProperty {
    Edge(EdgeProperty),
    ReverseDirectRelation(ReverseDirectRelationProperty),
    Mapped(MappedProperty),
}

impl ViewProperty {
    /// Wire-level connection type label. Differs compare this before
    /// descending into variant fields.
    pub fn connection_type(&self) -> &'static str {
        match self {
            ViewProperty::Mapped(_) => "direct",
            ViewProperty::Edge(p) => match p.connection {
                Multiplicity::Single => "single_edge_connection",
                Multiplicity::Multi => "multi_edge_connection",
            },
            ViewProperty::ReverseDirectRelation(p) => match p.connection {
                Multiplicity::Single => "single_reverse_direct_relation",
                Multiplicity::Multi => "multi_reverse_direct_relation",
            },
        }
    }
}

/// A property mapped straight onto a container property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedProperty {
    pub container: ContainerRef,
    pub container_property_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ViewRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A property materialized by traversing edges of a given type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeProperty {
    pub source: ViewRef,
    #[serde(rename = "type")]
    pub edge_type: DirectRelationRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_source: Option<ViewRef>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub connection: Multiplicity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A property resolved by following a direct relation backwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseDirectRelationProperty {
    pub source: ViewRef,
    pub through: PropertyRef,
    #[serde(default)]
    pub connection: Multiplicity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Outwards,
    Inwards,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    Single,
    #[default]
    Multi,
}
