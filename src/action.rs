//! The `gitlab:repo:import` scaffolder action.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::error::{is_ignorable, ActionError, ConfigError};
use crate::gitlab_provider::create_gitlab_api;
use crate::integrations::ScmIntegrations;
use crate::provider::{MigrationApi, MigrationEntity, SourceConfig, SourceType};

pub const ACTION_ID: &str = "gitlab:repo:import";
pub const OUTPUT_IMPORTED_REPO_URL: &str = "importedRepoUrl";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoImportInput {
    /// Source GitLab instance, e.g. `https://gitlab.com/`.
    pub source_repo_url: String,
    pub source_repo_access_token: String,
    /// Target GitLab instance, the one whose API is called.
    pub target_repo_url: String,
    pub target_repo_access_token: String,
    pub source_full_path: String,
    pub source_type: SourceType,
    pub destination_slug: String,
    /// Must exist before the import starts.
    pub destination_namespace: String,
}

impl RepoImportInput {
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            url: self.source_repo_url.clone(),
            access_token: self.source_repo_access_token.clone(),
        }
    }

    pub fn migration_entities(&self) -> Vec<MigrationEntity> {
        vec![MigrationEntity {
            source_type: self.source_type,
            source_full_path: self.source_full_path.clone(),
            destination_slug: self.destination_slug.clone(),
            destination_namespace: self.destination_namespace.clone(),
        }]
    }
}

/// What the task runner hands to an action: its input, and a place to put
/// named outputs.
#[derive(Debug)]
pub struct ActionContext<I> {
    pub input: I,
    outputs: Map<String, Value>,
}

impl<I> ActionContext<I> {
    pub fn new(input: I) -> Self {
        ActionContext {
            input,
            outputs: Map::new(),
        }
    }

    pub fn output(&mut self, name: &str, value: impl Into<Value>) {
        self.outputs.insert(name.to_string(), value.into());
    }

    pub fn outputs(&self) -> &Map<String, Value> {
        &self.outputs
    }

    pub fn into_outputs(self) -> Map<String, Value> {
        self.outputs
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionExample {
    pub description: &'static str,
    pub example: &'static str,
}

pub struct RepoImportAction {
    integrations: ScmIntegrations,
}

impl RepoImportAction {
    pub fn new(integrations: ScmIntegrations) -> Self {
        RepoImportAction { integrations }
    }

    pub fn id(&self) -> &'static str {
        ACTION_ID
    }

    pub async fn handler(&self, ctx: &mut ActionContext<RepoImportInput>) -> Result<(), ActionError> {
        let input = &ctx.input;

        if input.source_type != SourceType::ProjectEntity {
            return Err(ConfigError::UnsupportedSourceType(input.source_type.to_string()).into());
        }

        let api = create_gitlab_api(
            &self.integrations,
            Some(input.target_repo_access_token.as_str()),
            &input.target_repo_url,
        )?;

        let imported = import_repo(&api, input).await?;
        ctx.output(OUTPUT_IMPORTED_REPO_URL, imported);

        Ok(())
    }

    pub fn schema(&self) -> Value {
        json!({
            "input": {
                "required": [
                    "sourceRepoUrl",
                    "sourceRepoAccessToken",
                    "targetRepoUrl",
                    "targetRepoAccessToken",
                    "sourceFullPath",
                    "sourceType",
                    "destinationSlug",
                    "destinationNamespace",
                ],
                "type": "object",
                "properties": {
                    "sourceRepoUrl": {
                        "type": "string",
                        "title": "Source Repository Location",
                        "description": "Accepts the format 'https://gitlab.com/'",
                    },
                    "sourceRepoAccessToken": {
                        "type": "string",
                        "title": "Source Repository Access Token",
                        "description": "The token to use for authorization to the source GitLab",
                    },
                    "targetRepoUrl": {
                        "type": "string",
                        "title": "Target Repository Location",
                        "description": "Accepts the format 'https://gitlab.com/'",
                    },
                    "targetRepoAccessToken": {
                        "type": "string",
                        "title": "Target Repository Access Token",
                        "description": "The token to use for authorization to the target GitLab",
                    },
                    "sourceFullPath": {
                        "type": "string",
                        "title": "Repository Full Path",
                        "description": "Full path to the repository in the source Gitlab instance",
                    },
                    "sourceType": {
                        "type": "string",
                        "title": "Source Entity Type",
                        "enum": ["project_entity", "group_entity"],
                        "description": "Can be either project_entity or group_entity (not implemented)",
                    },
                    "destinationSlug": {
                        "type": "string",
                        "title": "Destination Repo Slug",
                        "description": "Slug to be used for the import repo in the target Gitlab",
                    },
                    "destinationNamespace": {
                        "type": "string",
                        "title": "Target Group Name",
                        "description": "Group name under which the imported repo will be located (must exist prior to import)",
                    },
                },
            },
            "output": {
                "type": "object",
                "properties": {
                    "importedRepoUrl": {
                        "title": "URL to the newly imported repo",
                        "type": "string",
                    },
                },
            },
        })
    }

    pub fn examples(&self) -> Vec<ActionExample> {
        vec![ActionExample {
            description: "Import a project from a self-hosted GitLab into gitlab.com.",
            example: r#"steps:
  - id: importRepo
    name: Import repository
    action: gitlab:repo:import
    input:
      sourceRepoUrl: https://gitlab.remote.com
      sourceRepoAccessToken: ${{ secrets.SOURCE_GITLAB_TOKEN }}
      targetRepoUrl: gitlab.com
      targetRepoAccessToken: ${{ secrets.TARGET_GITLAB_TOKEN }}
      sourceFullPath: foo/bar/go-lang
      sourceType: project_entity
      destinationSlug: migrated-go-lang
      destinationNamespace: migrated/foo/bar
"#,
        }]
    }
}

/// Submits the single bulk import for `input` and returns the value reported
/// as `importedRepoUrl`, which is the source path: GitLab only accepts the
/// import here and finishes it later.
pub async fn import_repo<A>(api: &A, input: &RepoImportInput) -> Result<String, ActionError>
where
    A: MigrationApi + Sync,
{
    let source = input.source_config();
    let entities = input.migration_entities();

    match api.create_migration(&source, &entities).await {
        Ok(bulk_import) => {
            info!(
                bulk_import_id = bulk_import.id,
                status = %bulk_import.status,
                source_full_path = %input.source_full_path,
                "gitlab accepted repository import"
            );
        }
        Err(error) if is_ignorable(&error) => {
            warn!(
                source_full_path = %input.source_full_path,
                error = %error,
                "gitlab answered 404 to the import request, treating it as submitted"
            );
        }
        Err(error) => {
            return Err(ActionError::ImportFailed {
                source_full_path: input.source_full_path.clone(),
                source_repo_url: input.source_repo_url.clone(),
                source: error,
            });
        }
    }

    Ok(input.source_full_path.clone())
}
