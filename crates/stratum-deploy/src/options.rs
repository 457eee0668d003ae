use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeployError;
use crate::severity::Severity;

/// How the engine treats differences between desired and remote state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModusOperandi {
    /// Never remove anything from the remote target.
    #[default]
    Additive,
    /// Force breaking changes through via delete-and-recreate (or
    /// consolidation for containers holding data).
    Rebuild,
}

impl FromStr for ModusOperandi {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "additive" => Ok(ModusOperandi::Additive),
            "rebuild" => Ok(ModusOperandi::Rebuild),
            other => Err(DeployError::UnknownModusOperandi(other.to_string())),
        }
    }
}

impl fmt::Display for ModusOperandi {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModusOperandi::Additive => f.write_str("additive"),
            ModusOperandi::Rebuild => f.write_str("rebuild"),
        }
    }
}

/// Per-deployment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DeployOptions {
    /// Stop after planning and gating; perform no writes.
    pub dry_run: bool,
    /// Undo successfully-applied changes when the apply pass is not
    /// fully successful.
    pub auto_rollback: bool,
    /// Highest severity the gate lets through.
    pub max_severity: Severity,
    pub modus_operandi: ModusOperandi,
    /// In rebuild mode, allow delete-and-recreate of containers even
    /// though that destroys stored instances.
    pub drop_data: bool,
    /// Deploy containers and views living outside the data model's
    /// space instead of skipping them.
    pub multi_space: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            auto_rollback: false,
            max_severity: Severity::Safe,
            modus_operandi: ModusOperandi::Additive,
            drop_data: false,
            multi_space: false,
        }
    }
}
