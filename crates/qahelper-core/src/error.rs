//! Core error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("no issue key found")]
    IssueKeyNotFound,

    #[error("multiple candidate keys found")]
    AmbiguousIssueKey(Vec<String>),

    #[error("QA sub-issue type not found")]
    QaSubtaskTypeNotFound,

    #[error("no non-sub-issue types found")]
    StandardTypeNotFound,

    #[error("cannot determine assignee")]
    AssigneeUnresolved,
}

pub type Result<T> = std::result::Result<T, Error>;
