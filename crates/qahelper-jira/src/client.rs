//! JIRA REST client

use async_trait::async_trait;
use qahelper_core::models::{Identity, IssueKey, IssueTypeDescriptor};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;

use crate::api::TrackerApi;
use crate::auth::JiraAuth;
use crate::types::{
    CreateIssueRequest, CreateMeta, CreatedIssue, IssueDetails, IssueLinkRequest,
    IssueTypeChange, JiraIssue, KeyRef, NameRef, NewSubIssue, ServerInfo,
};
use crate::{Error, Result};

const API_PREFIX: &str = "/rest/api/3";
const RELATES_LINK: &str = "Relates";

/// Whether a failing response's body goes into the error message
#[derive(Clone, Copy)]
enum Body {
    Report,
    Omit,
}

pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
}

impl JiraClient {
    /// Client for the tracker at `base_url`. Without `auth`, requests go out unauthenticated.
    pub fn new(base_url: &str, auth: Option<&JiraAuth>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(auth) = auth {
            let value = HeaderValue::from_str(&auth.to_basic_auth())
                .map_err(|e| Error::Auth(format!("Invalid credentials header: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("qahelper/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
        body: Body,
    ) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = match body {
            Body::Report => response.text().await.unwrap_or_default(),
            Body::Omit => String::new(),
        };
        tracing::debug!("JIRA {} failed with status {}", operation, status);
        Err(Error::Api {
            operation: operation.to_string(),
            status: status.as_u16(),
            body: text,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
        body: Body,
    ) -> Result<T> {
        let response = self.send(operation, request, body).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TrackerApi for JiraClient {
    async fn get_issue(&self, key: &IssueKey) -> Result<IssueDetails> {
        let request = self
            .http
            .get(self.url(&format!("/issue/{}", key)))
            .query(&[("fields", "summary,project,subtasks")]);
        let issue: JiraIssue = self.get_json("read issue", request, Body::Report).await?;
        Ok(issue.into())
    }

    async fn get_current_user(&self) -> Result<Identity> {
        let request = self.http.get(self.url("/myself"));
        self.get_json("read current user", request, Body::Omit).await
    }

    async fn get_server_info(&self) -> Result<ServerInfo> {
        let request = self.http.get(self.url("/serverInfo"));
        self.get_json("read server info", request, Body::Omit).await
    }

    async fn get_issue_types(&self, project_key: &str) -> Result<Vec<IssueTypeDescriptor>> {
        let request = self.http.get(self.url("/issue/createmeta")).query(&[
            ("projectKeys", project_key),
            ("expand", "projects.issuetypes"),
        ]);
        let meta: CreateMeta = self
            .get_json("read issue types", request, Body::Omit)
            .await?;

        meta.projects
            .into_iter()
            .next()
            .map(|project| project.issuetypes)
            .ok_or_else(|| Error::NotFound(format!("project {}", project_key)))
    }

    async fn create_sub_issue(&self, new: &NewSubIssue) -> Result<CreatedIssue> {
        let request = self
            .http
            .post(self.url("/issue"))
            .json(&CreateIssueRequest::from(new));
        let created: CreatedIssue = self
            .get_json("create sub-issue", request, Body::Report)
            .await?;
        tracing::info!("Created {} under {}", created.reference(), new.parent);
        Ok(created)
    }

    async fn change_issue_type(&self, issue: &str, issue_type_id: &str) -> Result<()> {
        let request = self
            .http
            .post(self.url(&format!("/issue/{}/issueType", issue)))
            .json(&IssueTypeChange { issue_type_id });
        self.send(&format!("convert {}", issue), request, Body::Report)
            .await?;
        Ok(())
    }

    async fn link_relates(&self, inward: &str, outward: &str) -> Result<()> {
        let request = self.http.post(self.url("/issueLink")).json(&IssueLinkRequest {
            link_type: NameRef { name: RELATES_LINK },
            inward_issue: KeyRef { key: inward },
            outward_issue: KeyRef { key: outward },
        });
        self.send(
            &format!("link {} and {}", inward, outward),
            request,
            Body::Report,
        )
        .await?;
        Ok(())
    }
}
