//! Generation Errors
//!
//! Failures that abort a generation run. Missing optional inputs and name
//! collisions are not errors; they are resolved by the generator itself.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerationError>;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The workspace contains a block type with no translation rule.
    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),

    /// A dropdown or enumerated field holds a value the rule does not know.
    #[error("block `{block_id}` ({kind}): unknown option `{option}` for field `{field}`")]
    UnknownOption {
        block_id: String,
        kind: &'static str,
        field: String,
        option: String,
    },

    /// A field the rule cannot do without is absent.
    #[error("block `{block_id}` ({kind}): missing field `{field}`")]
    MissingField {
        block_id: String,
        kind: &'static str,
        field: String,
    },

    /// A block sits in a socket its shape does not fit.
    #[error("block `{block_id}` ({kind}): {message}")]
    InvalidConnection {
        block_id: String,
        kind: &'static str,
        message: String,
    },

    /// A variable field references an id missing from the workspace.
    #[error("variable id `{0}` is not declared in the workspace")]
    UnknownVariable(String),

    #[error("malformed workspace: {0}")]
    Workspace(#[from] serde_json::Error),
}
