use anyhow::Result;
use serde::Deserialize;
use serde_yaml;

use super::common::Integrations;
use crate::action::RepoImportInput;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub integrations: Integrations,
}

pub fn read_config(config: &str) -> Result<Config> {
    let deserialized_config: Config = serde_yaml::from_str(config)?;

    Ok(deserialized_config)
}

/// Reads the action input. Accepts both a bare input mapping and a step with
/// an `input:` key.
pub fn read_input(input: &str) -> Result<RepoImportInput> {
    let value: serde_yaml::Value = serde_yaml::from_str(input)?;

    let value = match value.get("input") {
        Some(step_input) => step_input.clone(),
        None => value,
    };

    Ok(serde_yaml::from_value(value)?)
}
