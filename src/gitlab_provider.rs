use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ConfigError};
use crate::integrations::{IntegrationConfig, ScmIntegrations};
use crate::provider::{BulkImport, MigrationApi, MigrationEntity, SourceConfig};

/// GitLab accepts personal/project access tokens and OAuth tokens through
/// different headers, so the kind travels with the token.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Sent as `PRIVATE-TOKEN`.
    Personal(String),
    /// Sent as `Authorization: Bearer`.
    OAuth(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Personal(_) => f.write_str("Personal(<redacted>)"),
            Credential::OAuth(_) => f.write_str("OAuth(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitlabClient {
    http: reqwest::Client,
    api_base_url: String,
    credential: Credential,
}

#[derive(Serialize)]
struct BulkImportRequest<'a> {
    configuration: &'a SourceConfig,
    entities: &'a [MigrationEntity],
}

impl GitlabClient {
    pub fn new(api_base_url: &str, credential: Credential) -> Self {
        GitlabClient {
            http: reqwest::Client::new(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            credential,
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Credential::Personal(token) => request.header("PRIVATE-TOKEN", token),
            Credential::OAuth(token) => request.bearer_auth(token),
        }
    }
}

#[async_trait]
impl MigrationApi for GitlabClient {
    async fn create_migration(
        &self,
        source: &SourceConfig,
        entities: &[MigrationEntity],
    ) -> Result<BulkImport, ApiError> {
        let url = format!("{}/bulk_imports", self.api_base_url);
        let body = BulkImportRequest {
            configuration: source,
            entities,
        };

        let response = self
            .authorize(self.http.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        response.json::<BulkImport>().await.map_err(ApiError::Decode)
    }
}

/// Host (with a non-default port, if any) of a repository location. Bare
/// locations such as `gitlab.com` are read as https.
pub fn target_host(repo_url: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: repo_url.to_string(),
        reason,
    };

    let with_scheme = if repo_url.contains("://") {
        repo_url.to_string()
    } else {
        format!("https://{}", repo_url)
    };

    let url = Url::parse(&with_scheme).map_err(|error| invalid(error.to_string()))?;
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| invalid("no host in url".to_string()))?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// An explicit token is an OAuth token; otherwise the integration's own
/// token is used as a personal access token.
pub fn resolve_credential(
    config: &IntegrationConfig,
    token: Option<&str>,
) -> Result<Credential, ConfigError> {
    match token.filter(|token| !token.trim().is_empty()) {
        Some(token) => Ok(Credential::OAuth(token.to_string())),
        None => config
            .token
            .clone()
            .map(Credential::Personal)
            .ok_or_else(|| ConfigError::NoToken {
                host: config.host.clone(),
            }),
    }
}

/// Builds a client for the GitLab instance serving `repo_url`, talking to
/// `{baseUrl}/api/v4` of the matching integration. No request is made.
pub fn create_gitlab_api(
    integrations: &ScmIntegrations,
    token: Option<&str>,
    repo_url: &str,
) -> Result<GitlabClient, ConfigError> {
    let host = target_host(repo_url)?;

    let config = integrations
        .by_host(&host)
        .ok_or_else(|| ConfigError::NoMatchingIntegration { host: host.clone() })?;

    let credential = resolve_credential(config, token)?;
    let api_url = format!("{}/api/v4", config.base_url);
    debug!(host = %host, api_url = %api_url, credential = ?credential, "resolved gitlab integration");

    Ok(GitlabClient::new(&api_url, credential))
}
