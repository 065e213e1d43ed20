//! Issue key detection from page locations
//!
//! Rules are tried in order and the first one that yields a key wins:
//!
//! 1. `/browse/<KEY>` path route
//! 2. `/issues/<KEY>` path route
//! 3. a key anywhere in the fragment
//! 4. exactly one distinct key across the path segments
//! 5. exactly one distinct key across the whole URL
//!
//! Rules 4 and 5 refuse to pick when several distinct keys are present.

use crate::models::IssueKey;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z0-9]+-[0-9]+").expect("invalid issue key regex"));
static BROWSE_ROUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/browse/([A-Z0-9]+-[0-9]+)(?:/|$)").expect("invalid browse regex"));
static ISSUES_ROUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/issues/([A-Z0-9]+-[0-9]+)(?:/|$)").expect("invalid issues regex"));

/// Location of the page being augmented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    pub href: String,
    pub path: String,
    pub fragment: String,
}

impl PageLocation {
    pub fn new(
        href: impl Into<String>,
        path: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            href: href.into(),
            path: path.into(),
            fragment: fragment.into(),
        }
    }

    /// Split a full URL into its location parts
    pub fn parse(href: &str) -> Result<Self> {
        let url = url::Url::parse(href.trim())
            .map_err(|e| Error::Validation(format!("Invalid page URL '{}': {}", href, e)))?;

        Ok(Self {
            href: url.as_str().to_string(),
            path: url.path().to_string(),
            fragment: url.fragment().unwrap_or_default().to_string(),
        })
    }

    /// Origin (`scheme://host[:port]`) of the page
    pub fn origin(&self) -> Option<String> {
        url::Url::parse(&self.href)
            .ok()
            .map(|url| url.origin().ascii_serialization())
            .filter(|origin| origin != "null")
    }
}

/// Detect the issue key of the page at `location`
pub fn extract(location: &PageLocation) -> Result<IssueKey> {
    for route in [&*BROWSE_ROUTE, &*ISSUES_ROUTE] {
        if let Some(captures) = route.captures(&location.path) {
            return IssueKey::parse(&captures[1]);
        }
    }

    if let Some(found) = KEY_PATTERN.find(&location.fragment) {
        return IssueKey::parse(found.as_str());
    }

    let segment_keys = distinct(
        location
            .path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| KEY_PATTERN.find(segment))
            .map(|found| found.as_str()),
    );
    if let Some(key) = single(segment_keys)? {
        return Ok(key);
    }

    let url_keys = distinct(
        KEY_PATTERN
            .find_iter(&location.href)
            .map(|found| found.as_str()),
    );
    single(url_keys)?.ok_or(Error::IssueKeyNotFound)
}

fn distinct<'a>(candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for candidate in candidates {
        if !keys.iter().any(|k| k == candidate) {
            keys.push(candidate.to_string());
        }
    }
    keys
}

fn single(mut keys: Vec<String>) -> Result<Option<IssueKey>> {
    match keys.len() {
        0 => Ok(None),
        1 => IssueKey::parse(&keys.remove(0)).map(Some),
        _ => Err(Error::AmbiguousIssueKey(keys)),
    }
}
