#![deny(clippy::all)]

/**
 * Block Compiler CLI
 *
 * Batch compilation of saved block workspaces into Rust source files
 */
pub use block_compiler as compiler;

pub mod config;
pub mod logging;
pub mod perform_compile;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
