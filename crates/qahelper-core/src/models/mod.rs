pub mod config;
pub mod identity;
pub mod issue;
pub mod target;

pub use config::{Config, JiraConfig, UiConfig};
pub use identity::{AssigneeRef, DeploymentType, Identity};
pub use issue::{IssueKey, IssueTypeDescriptor, SubIssue};
pub use target::{TargetSpec, TARGET_SUBTASKS};
