pub mod assignee;
pub mod error;
pub mod issue_key;
pub mod issue_type;
pub mod models;
pub mod reconcile;
pub mod storage;

pub use error::{Error, Result};
