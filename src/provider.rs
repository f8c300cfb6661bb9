use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    ProjectEntity,
    /// Accepted by the schema, rejected by the action.
    GroupEntity,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::ProjectEntity => "project_entity",
            SourceType::GroupEntity => "group_entity",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the target instance reaches back to the source instance.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SourceConfig {
    pub url: String,
    pub access_token: String,
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("url", &self.url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// One entity of a bulk import: what to pull and where it lands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MigrationEntity {
    pub source_type: SourceType,
    pub source_full_path: String,
    pub destination_slug: String,
    pub destination_namespace: String,
}

/// The bulk import record GitLab answers with. The import itself runs
/// asynchronously on the target instance.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BulkImport {
    pub id: u64,
    pub status: String,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[async_trait]
pub trait MigrationApi {
    /// Starts a migration of `entities` from the instance described by
    /// `source` into the instance this client talks to.
    async fn create_migration(
        &self,
        source: &SourceConfig,
        entities: &[MigrationEntity],
    ) -> Result<BulkImport, ApiError>;
}
