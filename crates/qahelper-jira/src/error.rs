//! Error types for JIRA integration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// Non-success response; `body` is empty when the endpoint's text is not reported
    #[error("{}", api_message(.operation, .status, .body))]
    Api {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),
}

fn api_message(operation: &str, status: &u16, body: &str) -> String {
    if body.is_empty() {
        format!("failed to {}: {}", operation, status)
    } else {
        format!("failed to {}: {} - {}", operation, status, body)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
