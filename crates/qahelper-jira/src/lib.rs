//! QA Helper JIRA Integration
//!
//! REST client for the issue, identity, metadata, link and type-change endpoints the
//! QA workflows call, plus the [`TrackerApi`] seam they are written against.

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use api::TrackerApi;
pub use client::JiraClient;
pub use error::{Error, Result};
pub use types::*;
