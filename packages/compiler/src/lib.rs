#![deny(clippy::all)]

/**
 * Block Compiler
 *
 * Renders visual block programs as Rust source for the Mynewt embedded OS.
 */

// Core modules
pub mod config;
pub mod definitions;
pub mod error;
pub mod generator;
pub mod names;
pub mod output;
mod rules;
pub mod templates;
pub mod util;
pub mod workspace;

// Re-exports
pub use config::GeneratorConfig;
pub use definitions::DefinitionKind;
pub use error::{GenerationError, Result};
pub use generator::{Code, CodeGenerator, Session};
pub use output::Order;
pub use workspace::Workspace;

/// Parse a serialized workspace and generate its source file.
pub fn generate(json: &str, config: GeneratorConfig) -> Result<String> {
    let workspace = Workspace::from_json(json)?;
    CodeGenerator::new(config).workspace_to_code(&workspace)
}
