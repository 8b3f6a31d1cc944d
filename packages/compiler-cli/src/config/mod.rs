//! Project configuration.

pub mod project;

pub use project::{ProjectConfig, PROJECT_FILE};
