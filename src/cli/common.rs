use serde::Deserialize;

use crate::integrations::GitlabIntegrationEntry;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Integrations {
    #[serde(default)]
    pub gitlab: Vec<GitlabIntegrationEntry>,
}
