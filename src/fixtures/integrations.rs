use crate::integrations::{GitlabIntegrationEntry, ScmIntegrations};

/// `gitlab.com` with a default token served from `base_url`, plus a
/// tokenless `hosted.gitlab.com` served from `{base_url}/hosted`. The
/// `apiBaseUrl` of `gitlab.com` points at a different host.
pub fn create_integrations(base_url: &str) -> ScmIntegrations {
    ScmIntegrations::from_entries(&[
        GitlabIntegrationEntry {
            host: Some("gitlab.com".to_string()),
            token: Some("token".to_string()),
            api_base_url: Some("https://api.gitlab.com".to_string()),
            base_url: Some(base_url.to_string()),
        },
        GitlabIntegrationEntry {
            host: Some("hosted.gitlab.com".to_string()),
            base_url: Some(format!("{}/hosted", base_url)),
            ..Default::default()
        },
    ])
    .expect("test integrations must be valid")
}
