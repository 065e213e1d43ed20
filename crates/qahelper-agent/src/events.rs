//! Workflow events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflow::WorkflowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    CreateSubIssues,
    ConvertSubIssues,
}

/// Event emitted by a workflow run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowEvent {
    pub event_type: WorkflowEventType,
    pub run_id: String,
    pub kind: WorkflowKind,
    pub issue_key: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowEventType {
    /// Control disabled, run in progress
    Started,
    /// Run reached a terminal state
    Finished {
        state: WorkflowState,
        message: String,
    },
}

impl WorkflowEvent {
    pub fn new_run_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn started(run_id: String, kind: WorkflowKind, issue_key: Option<String>) -> Self {
        Self {
            event_type: WorkflowEventType::Started,
            run_id,
            kind,
            issue_key,
            timestamp: Utc::now(),
        }
    }

    pub fn finished(
        run_id: String,
        kind: WorkflowKind,
        issue_key: Option<String>,
        state: WorkflowState,
        message: String,
    ) -> Self {
        Self {
            event_type: WorkflowEventType::Finished { state, message },
            run_id,
            kind,
            issue_key,
            timestamp: Utc::now(),
        }
    }
}
