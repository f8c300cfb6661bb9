use reqwest::StatusCode;
use thiserror::Error;

/// Problems found before any request leaves the process: bad input, or an
/// integrations config that cannot serve the requested host.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No matching integration configuration for host {host}, please check your integrations config")]
    NoMatchingIntegration { host: String },

    #[error("No token available for host {host}")]
    NoToken { host: String },

    #[error("Invalid repository location `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid gitlab integration config for host {host}: {reason}")]
    InvalidIntegration { host: String, reason: String },

    #[error("Source type {0} is not implemented, only project_entity can be imported")]
    UnsupportedSourceType(String),
}

/// Failure of a call against the GitLab REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GitLab responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request to GitLab failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("could not decode GitLab response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// A 404 from the bulk import endpoint is accepted as a submitted import.
pub fn is_ignorable(error: &ApiError) -> bool {
    matches!(error, ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to transfer repo {source_full_path}. Make sure that {source_full_path} exists in {source_repo_url} {source}")]
    ImportFailed {
        source_full_path: String,
        source_repo_url: String,
        #[source]
        source: ApiError,
    },
}
