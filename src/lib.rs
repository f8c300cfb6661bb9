pub mod action;
pub mod cli;
pub mod error;
#[doc(hidden)]
pub mod fixtures;
pub mod gitlab_provider;
pub mod integrations;
pub mod provider;
