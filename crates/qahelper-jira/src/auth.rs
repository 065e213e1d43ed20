//! JIRA authentication

use crate::{Error, Result};

pub const KEYRING_SERVICE: &str = "qahelper";
pub const TOKEN_ENV_VAR: &str = "QAHELPER_API_TOKEN";

#[derive(Clone)]
pub struct JiraAuth {
    username: String,
    api_token: String,
}

impl JiraAuth {
    pub fn new(username: String, api_token: String) -> Self {
        Self {
            username,
            api_token,
        }
    }

    /// Token from `QAHELPER_API_TOKEN`, otherwise from the OS keyring
    pub fn resolve(username: &str) -> Result<Self> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                return Ok(Self::new(username.to_string(), token.trim().to_string()));
            }
        }
        Self::from_keyring(username)
    }

    pub fn from_keyring(username: &str) -> Result<Self> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, username)?;
        let api_token = entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => {
                Error::Auth(format!("No API token stored for '{}'", username))
            }
            other => Error::Keyring(other),
        })?;
        Ok(Self::new(username.to_string(), api_token))
    }

    pub fn store_in_keyring(&self) -> Result<()> {
        if self.api_token.trim().is_empty() {
            return Err(Error::Auth("API token cannot be empty".to_string()));
        }
        let entry = keyring::Entry::new(KEYRING_SERVICE, &self.username)?;
        entry.set_password(&self.api_token)?;
        Ok(())
    }

    pub fn to_basic_auth(&self) -> String {
        use base64::Engine;
        let credentials = format!("{}:{}", self.username, self.api_token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

impl std::fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraAuth")
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .finish()
    }
}
