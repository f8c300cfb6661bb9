use crate::mocks::gitlab::{
    bulk_import_response, create_migration_mock, create_migration_mock_for, expected_request_body,
};

use serde_json::json;
use gitlab_repo_import::action::{ActionContext, RepoImportAction};
use gitlab_repo_import::error::{ActionError, ApiError, ConfigError};
use gitlab_repo_import::fixtures::{input::sample_input, integrations::create_integrations};
use gitlab_repo_import::integrations::{GitlabIntegrationEntry, ScmIntegrations};
use wiremock::{MockServer, ResponseTemplate};

mod import_repo {

    use super::*;

    #[tokio::test]
    async fn default_repo_import() {
        let mock_server = MockServer::start().await;

        create_migration_mock_for(
            ("Authorization", "Bearer moreLOLsToken"),
            expected_request_body(),
            ResponseTemplate::new(201).set_body_json(bulk_import_response()),
        )
        .mount(&mock_server)
        .await;

        let action = RepoImportAction::new(create_integrations(&mock_server.uri()));
        let mut ctx = ActionContext::new(sample_input());

        action.handler(&mut ctx).await.unwrap();

        assert_eq!(
            serde_json::Value::Object(ctx.into_outputs()),
            json!({ "importedRepoUrl": "foo/bar/go-lang" })
        );
    }

    #[tokio::test]
    async fn posts_to_base_url_api_ignoring_api_base_url() {
        let mock_server = MockServer::start().await;

        create_migration_mock(
            None,
            ResponseTemplate::new(201).set_body_json(bulk_import_response()),
            1,
        )
        .mount(&mock_server)
        .await;

        let integrations = ScmIntegrations::from_entries(&[GitlabIntegrationEntry {
            host: Some("gitlab.com".to_string()),
            token: None,
            api_base_url: Some("http://127.0.0.1:1".to_string()),
            base_url: Some(mock_server.uri()),
        }])
        .unwrap();
        let action = RepoImportAction::new(integrations);
        let mut ctx = ActionContext::new(sample_input());

        action.handler(&mut ctx).await.unwrap();

        assert_eq!(ctx.outputs()["importedRepoUrl"], json!("foo/bar/go-lang"));
    }

    #[tokio::test]
    async fn not_found_is_accepted() {
        let mock_server = MockServer::start().await;

        create_migration_mock(
            None,
            ResponseTemplate::new(404).set_body_json(json!({ "message": "404 Not Found" })),
            1,
        )
        .mount(&mock_server)
        .await;

        let action = RepoImportAction::new(create_integrations(&mock_server.uri()));
        let mut ctx = ActionContext::new(sample_input());

        action.handler(&mut ctx).await.unwrap();

        assert_eq!(ctx.outputs()["importedRepoUrl"], json!("foo/bar/go-lang"));
    }

    #[tokio::test]
    async fn server_error_fails() {
        let mock_server = MockServer::start().await;

        create_migration_mock(
            None,
            ResponseTemplate::new(500).set_body_string("Internal Server Error"),
            1,
        )
        .mount(&mock_server)
        .await;

        let action = RepoImportAction::new(create_integrations(&mock_server.uri()));
        let mut ctx = ActionContext::new(sample_input());

        let error = action.handler(&mut ctx).await.unwrap_err();

        let message = error.to_string();
        assert!(message.contains("Failed to transfer repo foo/bar/go-lang"));
        assert!(message.contains("https://gitlab.remote.com"));
        assert!(matches!(
            error,
            ActionError::ImportFailed {
                source: ApiError::Status { .. },
                ..
            }
        ));
        assert!(ctx.outputs().is_empty());
    }

    #[tokio::test]
    async fn unreadable_response_fails() {
        let mock_server = MockServer::start().await;

        create_migration_mock(
            None,
            ResponseTemplate::new(201).set_body_string("<html>gateway</html>"),
            1,
        )
        .mount(&mock_server)
        .await;

        let action = RepoImportAction::new(create_integrations(&mock_server.uri()));
        let mut ctx = ActionContext::new(sample_input());

        let error = action.handler(&mut ctx).await.unwrap_err();

        assert!(matches!(
            error,
            ActionError::ImportFailed {
                source: ApiError::Decode(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unreachable_gitlab_fails() {
        // nothing listens on port 1
        let action = RepoImportAction::new(create_integrations("http://127.0.0.1:1"));
        let mut ctx = ActionContext::new(sample_input());

        let error = action.handler(&mut ctx).await.unwrap_err();

        assert!(error.to_string().contains("foo/bar/go-lang"));
        assert!(matches!(
            error,
            ActionError::ImportFailed {
                source: ApiError::Transport(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unknown_host_makes_no_request() {
        let mock_server = MockServer::start().await;

        create_migration_mock(None, ResponseTemplate::new(201), 0)
            .mount(&mock_server)
            .await;

        let action = RepoImportAction::new(create_integrations(&mock_server.uri()));
        let mut input = sample_input();
        input.target_repo_url = "https://gitlab.unknown.com".to_string();
        let mut ctx = ActionContext::new(input);

        let error = action.handler(&mut ctx).await.unwrap_err();

        assert!(matches!(
            error,
            ActionError::Config(ConfigError::NoMatchingIntegration { .. })
        ));
    }

    #[tokio::test]
    async fn missing_token_makes_no_request() {
        let mock_server = MockServer::start().await;

        create_migration_mock(Some("/hosted"), ResponseTemplate::new(201), 0)
            .mount(&mock_server)
            .await;

        let action = RepoImportAction::new(create_integrations(&mock_server.uri()));
        let mut input = sample_input();
        input.target_repo_url = "hosted.gitlab.com".to_string();
        input.target_repo_access_token = "".to_string();
        let mut ctx = ActionContext::new(input);

        let error = action.handler(&mut ctx).await.unwrap_err();

        assert_eq!(error.to_string(), "No token available for host hosted.gitlab.com");
    }
}
