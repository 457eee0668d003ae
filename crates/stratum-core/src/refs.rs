use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identity of a space. Spaces are the top of the dependency order and
/// are addressed by name alone.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRef {
    pub space: String,
}

impl SpaceRef {
    pub fn new(space: impl Into<String>) -> Self {
        Self { space: space.into() }
    }
}

impl fmt::Display for SpaceRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.space)
    }
}

/// Identity of a container: space plus external id.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRef {
    pub space: String,
    pub external_id: String,
}

impl ContainerRef {
    pub fn new(space: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
        }
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.space, self.external_id)
    }
}

impl FromStr for ContainerRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((space, external_id)) if !space.is_empty() && !external_id.is_empty() => {
                Ok(Self::new(space, external_id))
            }
            _ => Err(CoreError::InvalidReference {
                kind: "container",
                value: s.to_string(),
            }),
        }
    }
}

/// Identity of a view: space, external id and version.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRef {
    pub space: String,
    pub external_id: String,
    pub version: String,
}

impl ViewRef {
    pub fn new(
        space: impl Into<String>,
        external_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}/{}", self.space, self.external_id, self.version)
    }
}

impl FromStr for ViewRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidReference {
            kind: "view",
            value: s.to_string(),
        };
        let (space, rest) = s.split_once(':').ok_or_else(invalid)?;
        let (external_id, version) = rest.split_once('/').ok_or_else(invalid)?;
        if space.is_empty() || external_id.is_empty() || version.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(space, external_id, version))
    }
}

/// Identity of a data model: space, external id and version.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelRef {
    pub space: String,
    pub external_id: String,
    pub version: String,
}

impl DataModelRef {
    pub fn new(
        space: impl Into<String>,
        external_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for DataModelRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}/{}", self.space, self.external_id, self.version)
    }
}

/// Node reference used as the `type` of an edge view property.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectRelationRef {
    pub space: String,
    pub external_id: String,
}

impl fmt::Display for DirectRelationRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.space, self.external_id)
    }
}

/// A container property addressed through its container, used by
/// reverse-direct-relation view properties.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRef {
    pub source: ContainerRef,
    pub identifier: String,
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.source, self.identifier)
    }
}

/// A named constraint on a container. Constraints have their own delete
/// endpoint and cannot be modified in place.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintRef {
    pub container: ContainerRef,
    pub identifier: String,
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.container, self.identifier)
    }
}

/// A named index on a container. Same delete-only endpoint contract as
/// constraints.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRef {
    pub container: ContainerRef,
    pub identifier: String,
}

impl fmt::Display for IndexRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.container, self.identifier)
    }
}
