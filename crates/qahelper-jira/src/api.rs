//! Tracker operations the workflows depend on

use crate::types::{CreatedIssue, IssueDetails, NewSubIssue, ServerInfo};
use crate::Result;
use async_trait::async_trait;
use qahelper_core::models::{Identity, IssueKey, IssueTypeDescriptor};

#[async_trait]
pub trait TrackerApi: Send + Sync {
    /// Summary, project and sub-issue list of an issue
    async fn get_issue(&self, key: &IssueKey) -> Result<IssueDetails>;

    async fn get_current_user(&self) -> Result<Identity>;

    async fn get_server_info(&self) -> Result<ServerInfo>;

    /// Issue-type catalog of a project, each type flagged as sub-issue or not
    async fn get_issue_types(&self, project_key: &str) -> Result<Vec<IssueTypeDescriptor>>;

    async fn create_sub_issue(&self, new: &NewSubIssue) -> Result<CreatedIssue>;

    /// Change the type of `issue`; a sub-issue converted to a standard type loses its parent
    async fn change_issue_type(&self, issue: &str, issue_type_id: &str) -> Result<()>;

    /// Create a symmetric "Relates" link
    async fn link_relates(&self, inward: &str, outward: &str) -> Result<()>;
}
