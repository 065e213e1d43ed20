//! Issue data model

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static EXACT_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]+-[0-9]+$").expect("invalid issue key regex"));

/// A `PROJECTCODE-NUMBER` issue key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueKey(String);

impl IssueKey {
    pub fn parse(value: &str) -> Result<Self> {
        if !EXACT_KEY.is_match(value) {
            return Err(Error::Validation(format!("'{}' is not an issue key", value)));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Project code part of the key (`PRJ` for `PRJ-10`)
    pub fn project(&self) -> &str {
        self.0.rsplit_once('-').map(|(project, _)| project).unwrap_or(&self.0)
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IssueKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<IssueKey> for String {
    fn from(key: IssueKey) -> Self {
        key.0
    }
}

/// Entry of a project's issue-type catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "subtask", default)]
    pub is_subtask: bool,
}

impl IssueTypeDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_subtask: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_subtask,
        }
    }

    pub(crate) fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Sub-issue as listed on its parent issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubIssue {
    pub id: String,
    pub key: Option<String>,
    pub summary: String,
}

impl SubIssue {
    pub fn new(key: impl Into<String>, summary: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            key: Some(key),
            summary: summary.into(),
        }
    }

    /// Key if the tracker returned one, otherwise the numeric id
    pub fn reference(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.id)
    }
}
