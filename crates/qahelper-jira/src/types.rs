//! JIRA API types

use qahelper_core::models::{AssigneeRef, IssueKey, IssueTypeDescriptor, SubIssue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssue {
    pub id: String,
    pub key: String,
    pub fields: JiraFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraFields {
    pub summary: String,
    pub project: JiraProject,
    #[serde(default)]
    pub subtasks: Vec<JiraSubtask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraProject {
    pub id: String,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraSubtask {
    pub id: String,
    pub key: Option<String>,
    /// Some deployments put the summary at the top level instead of under `fields`
    pub summary: Option<String>,
    pub fields: Option<JiraSubtaskFields>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraSubtaskFields {
    pub summary: Option<String>,
}

impl From<JiraSubtask> for SubIssue {
    fn from(subtask: JiraSubtask) -> Self {
        let summary = subtask
            .fields
            .and_then(|f| f.summary)
            .or(subtask.summary)
            .unwrap_or_default();
        SubIssue {
            id: subtask.id,
            key: subtask.key,
            summary,
        }
    }
}

/// Issue as the workflows see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDetails {
    pub key: String,
    pub summary: String,
    pub project_id: String,
    pub project_key: String,
    pub sub_issues: Vec<SubIssue>,
}

impl From<JiraIssue> for IssueDetails {
    fn from(issue: JiraIssue) -> Self {
        Self {
            key: issue.key,
            summary: issue.fields.summary,
            project_id: issue.fields.project.id,
            project_key: issue.fields.project.key,
            sub_issues: issue
                .fields
                .subtasks
                .into_iter()
                .map(SubIssue::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub deployment_type: Option<String>,
    pub version: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeta {
    #[serde(default)]
    pub projects: Vec<CreateMetaProject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMetaProject {
    pub key: String,
    #[serde(default)]
    pub issuetypes: Vec<IssueTypeDescriptor>,
}

/// Fields for a new sub-issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubIssue {
    pub project_id: String,
    pub parent: IssueKey,
    pub summary: String,
    pub issue_type_id: String,
    pub assignee: AssigneeRef,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
    pub fields: CreateIssueFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueFields<'a> {
    pub project: IdRef<'a>,
    pub parent: KeyRef<'a>,
    pub summary: &'a str,
    pub issuetype: IdRef<'a>,
    pub assignee: &'a AssigneeRef,
}

impl<'a> From<&'a NewSubIssue> for CreateIssueRequest<'a> {
    fn from(new: &'a NewSubIssue) -> Self {
        Self {
            fields: CreateIssueFields {
                project: IdRef {
                    id: &new.project_id,
                },
                parent: KeyRef {
                    key: new.parent.as_str(),
                },
                summary: &new.summary,
                issuetype: IdRef {
                    id: &new.issue_type_id,
                },
                assignee: &new.assignee,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: Option<String>,
}

impl CreatedIssue {
    /// Key if the tracker returned one, otherwise the id
    pub fn reference(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueTypeChange<'a> {
    pub issue_type_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueLinkRequest<'a> {
    #[serde(rename = "type")]
    pub link_type: NameRef<'a>,
    pub inward_issue: KeyRef<'a>,
    pub outward_issue: KeyRef<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct KeyRef<'a> {
    pub key: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameRef<'a> {
    pub name: &'a str,
}
