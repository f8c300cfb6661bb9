pub mod common;
pub mod reader;

pub use common::*;
pub use reader::{read_config, read_input, Config};

use anyhow::{Context, Result};
use clap::Parser;

use crate::action::RepoImportInput;
use crate::integrations::ScmIntegrations;

/// Runs the `gitlab:repo:import` action once, outside of a scaffolder.
#[derive(Parser)]
#[clap(name = "gitlab-repo-import", version)]
pub struct Args {
    /// YAML file with an `integrations.gitlab` list
    #[clap(short, long, parse(from_os_str), required_unless_present = "schema")]
    config: Option<std::path::PathBuf>,

    /// YAML file with the action input
    #[clap(short, long, parse(from_os_str), required_unless_present = "schema")]
    input: Option<std::path::PathBuf>,

    /// Print the action schema and examples and exit
    #[clap(long)]
    schema: bool,
}

pub enum Command {
    Schema,
    Import {
        integrations: ScmIntegrations,
        input: RepoImportInput,
    },
}

pub fn run() -> Result<Command> {
    command(Args::parse())
}

fn command(args: Args) -> Result<Command> {
    if args.schema {
        return Ok(Command::Schema);
    }

    let (config_path, input_path) = match (args.config, args.input) {
        (Some(config), Some(input)) => (config, input),
        _ => anyhow::bail!("both --config and --input are required"),
    };

    let config_content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("could not read file `{:?}`", &config_path))?;
    let config = read_config(&config_content)
        .with_context(|| format!("could not parse config `{:?}`", &config_path))?;
    let integrations = ScmIntegrations::from_entries(&config.integrations.gitlab)?;

    let input_content = std::fs::read_to_string(&input_path)
        .with_context(|| format!("could not read file `{:?}`", &input_path))?;
    let input = read_input(&input_content)
        .with_context(|| format!("could not parse input `{:?}`", &input_path))?;

    Ok(Command::Import {
        integrations,
        input,
    })
}
