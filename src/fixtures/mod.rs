pub mod input;
pub mod integrations;
