use anyhow::Result;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use gitlab_repo_import::action::{ActionContext, RepoImportAction};
use gitlab_repo_import::cli::{self, Command};
use gitlab_repo_import::integrations::ScmIntegrations;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gitlab_repo_import=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::run()? {
        Command::Schema => {
            let action = RepoImportAction::new(ScmIntegrations::default());
            let description = json!({
                "id": action.id(),
                "schema": action.schema(),
                "examples": action.examples(),
            });
            println!("{}", serde_json::to_string_pretty(&description)?);
        }
        Command::Import {
            integrations,
            input,
        } => {
            let action = RepoImportAction::new(integrations);
            let mut ctx = ActionContext::new(input);

            action.handler(&mut ctx).await?;

            println!("{}", serde_json::to_string_pretty(ctx.outputs())?);
        }
    }

    Ok(())
}
