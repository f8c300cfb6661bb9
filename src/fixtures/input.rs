use crate::action::RepoImportInput;
use crate::provider::SourceType;

pub fn sample_input() -> RepoImportInput {
    RepoImportInput {
        source_repo_url: "https://gitlab.remote.com".to_string(),
        source_repo_access_token: "lolstoken".to_string(),
        target_repo_url: "gitlab.com".to_string(),
        target_repo_access_token: "moreLOLsToken".to_string(),
        source_full_path: "foo/bar/go-lang".to_string(),
        source_type: SourceType::ProjectEntity,
        destination_slug: "migrated-go-lang".to_string(),
        destination_namespace: "migrated/foo/bar".to_string(),
    }
}
