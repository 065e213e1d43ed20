//! Application configuration

use crate::issue_key::PageLocation;
use crate::models::DeploymentType;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    pub log_level: String,
    pub jira: JiraConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraConfig {
    /// Tracker root. Unset means "same origin as the issue page".
    #[serde(default)]
    pub base_url: Option<String>,
    pub username: Option<String>,
    /// Skips server descriptor detection when set
    pub deployment: Option<DeploymentType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub reload_delay_ms: u64,
    pub notification_dismiss_ms: u64,
    pub route_settle_ms: u64,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            )));
        }

        self.jira.validate()?;
        self.ui.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            log_level: "info".to_string(),
            jira: JiraConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl JiraConfig {
    /// Validate tracker connection settings
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url) = self.base_url {
            validate_base_url(url)?;
        }

        if let Some(ref username) = self.username {
            if username.trim().is_empty() {
                return Err(Error::Validation("Username cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    /// Tracker root for the page at `page`: the configured base URL, otherwise the page origin
    pub fn base_url_for(&self, page: &PageLocation) -> Result<String> {
        if let Some(ref url) = self.base_url {
            return Ok(url.trim().to_string());
        }

        let origin = page.origin().ok_or_else(|| {
            Error::Validation(format!("Cannot derive tracker URL from '{}'", page.href))
        })?;
        validate_base_url(&origin)?;
        Ok(origin)
    }
}

fn validate_base_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::Validation("Base URL cannot be empty".to_string()));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::Validation(
            "Base URL must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            deployment: None,
        }
    }
}

impl UiConfig {
    /// Validate delays
    pub fn validate(&self) -> Result<()> {
        if self.reload_delay_ms == 0 {
            return Err(Error::Validation(
                "Reload delay must be greater than 0".to_string(),
            ));
        }

        if self.notification_dismiss_ms == 0 {
            return Err(Error::Validation(
                "Notification dismiss delay must be greater than 0".to_string(),
            ));
        }

        if self.route_settle_ms == 0 {
            return Err(Error::Validation(
                "Route settle delay must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            reload_delay_ms: 1500,
            notification_dismiss_ms: 5000,
            route_settle_ms: 400,
        }
    }
}
