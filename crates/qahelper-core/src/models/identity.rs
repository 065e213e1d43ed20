//! User identity and deployment variant

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current-user record. Which fields are populated depends on the deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Identity {
    pub fn with_account_id(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            ..Self::default()
        }
    }
}

/// Assignee field value. Serializes as `{"accountId": ..}`, `{"name": ..}` or `{"key": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssigneeRef {
    AccountId(String),
    Name(String),
    Key(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentType {
    Cloud,
    Server,
    DataCenter,
    Unknown,
}

impl DeploymentType {
    /// Map the server descriptor's `deploymentType` value; unrecognized values are `Unknown`.
    pub fn from_descriptor(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("cloud") => Self::Cloud,
            Some("server") => Self::Server,
            Some("datacenter") => Self::DataCenter,
            _ => Self::Unknown,
        }
    }

    /// Server and Data Center share the legacy identity scheme
    pub fn is_self_hosted(self) -> bool {
        matches!(self, Self::Server | Self::DataCenter)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Server => "server",
            Self::DataCenter => "datacenter",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cloud" => Ok(Self::Cloud),
            "server" => Ok(Self::Server),
            "datacenter" | "data-center" => Ok(Self::DataCenter),
            "unknown" => Ok(Self::Unknown),
            other => Err(Error::Validation(format!(
                "Invalid deployment type '{}'. Must be one of: cloud, server, datacenter, unknown",
                other
            ))),
        }
    }
}
