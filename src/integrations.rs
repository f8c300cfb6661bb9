//! Registry of configured GitLab instances, looked up by host name.

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

pub const GITLAB_HOST: &str = "gitlab.com";

/// One `integrations.gitlab` entry as written in the config file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitlabIntegrationEntry {
    pub host: Option<String>,
    pub token: Option<String>,
    pub api_base_url: Option<String>,
    pub base_url: Option<String>,
}

/// A validated GitLab instance: where its web UI and REST API live and the
/// token to use when the caller does not bring one.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegrationConfig {
    pub host: String,
    pub base_url: String,
    pub api_base_url: String,
    pub token: Option<String>,
}

impl IntegrationConfig {
    pub fn from_entry(entry: &GitlabIntegrationEntry) -> Result<Self, ConfigError> {
        let host = entry.host.clone().unwrap_or_else(|| GITLAB_HOST.to_string());
        validate_host(&host)?;

        let base_url = match &entry.base_url {
            Some(url) => trim_trailing_slashes(url),
            None => format!("https://{}", host),
        };
        validate_url(&host, "baseUrl", &base_url)?;

        let api_base_url = match &entry.api_base_url {
            Some(url) => trim_trailing_slashes(url),
            None => format!("{}/api/v4", base_url),
        };
        validate_url(&host, "apiBaseUrl", &api_base_url)?;

        let token = entry
            .token
            .as_ref()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(IntegrationConfig {
            host,
            base_url,
            api_base_url,
            token,
        })
    }
}

/// Immutable set of GitLab integrations, handed to the action when it is
/// built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScmIntegrations {
    gitlab: Vec<IntegrationConfig>,
}

impl ScmIntegrations {
    /// Validates every entry, rejects duplicate hosts and appends a tokenless
    /// `gitlab.com` entry when none was configured.
    pub fn from_entries(entries: &[GitlabIntegrationEntry]) -> Result<Self, ConfigError> {
        let mut gitlab: Vec<IntegrationConfig> = Vec::with_capacity(entries.len() + 1);

        for entry in entries {
            let config = IntegrationConfig::from_entry(entry)?;
            if gitlab.iter().any(|existing| existing.host == config.host) {
                return Err(ConfigError::InvalidIntegration {
                    host: config.host,
                    reason: "host is configured more than once".to_string(),
                });
            }
            gitlab.push(config);
        }

        if !gitlab.iter().any(|config| config.host == GITLAB_HOST) {
            gitlab.push(IntegrationConfig::from_entry(&GitlabIntegrationEntry::default())?);
        }

        debug!(hosts = ?gitlab.iter().map(|c| c.host.as_str()).collect::<Vec<_>>(), "loaded gitlab integrations");

        Ok(ScmIntegrations { gitlab })
    }

    pub fn by_host(&self, host: &str) -> Option<&IntegrationConfig> {
        self.gitlab.iter().find(|config| config.host == host)
    }

    pub fn gitlab(&self) -> &[IntegrationConfig] {
        &self.gitlab
    }
}

fn trim_trailing_slashes(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn validate_host(host: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidIntegration {
        host: host.to_string(),
        reason: reason.to_string(),
    };

    if host.is_empty() || host.contains("://") || host.contains('/') {
        return Err(invalid("host must be a bare host name, e.g. gitlab.com"));
    }

    match Url::parse(&format!("https://{}", host)) {
        Ok(url) if url.host_str().is_some() => Ok(()),
        _ => Err(invalid("host is not a valid host name")),
    }
}

fn validate_url(host: &str, field: &str, url: &str) -> Result<(), ConfigError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(ConfigError::InvalidIntegration {
            host: host.to_string(),
            reason: format!("{} `{}` must be an absolute http(s) url", field, url),
        }),
    }
}
