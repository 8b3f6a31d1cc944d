//! Blocks
//!
//! A block is one node of the program graph. Blocks are owned by the
//! [`Workspace`](super::Workspace) arena and refer to each other by [`BlockId`].

use indexmap::IndexMap;
use serde::Deserialize;
use smallvec::SmallVec;
use std::borrow::Cow;

use super::kind::BlockKind;
use crate::error::{GenerationError, Result};

/// Index of a block inside its workspace arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) usize);

impl BlockId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Literal data stored in a block field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Reference to a workspace variable.
    Variable { id: String },
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Value,
    Statement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input {
    pub kind: InputKind,
    pub target: BlockId,
}

/// How a block is attached to the block above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Plugged into a value input of `parent`; the block is inline.
    Value { parent: BlockId },
    /// First block of a statement input of `parent`.
    Statement { parent: BlockId },
    /// Follows `previous` in a statement chain.
    Next { previous: BlockId },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcedureParam {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// Editor state that changes the shape of a block (item counts, branches,
/// procedure signatures).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtraState {
    pub item_count: Option<usize>,
    pub else_if_count: usize,
    pub has_else: bool,
    pub name: Option<String>,
    pub params: SmallVec<[ProcedureParam; 4]>,
    pub has_return_value: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub fields: IndexMap<String, FieldValue>,
    pub inputs: IndexMap<String, Input>,
    pub next: Option<BlockId>,
    pub attachment: Option<Attachment>,
    pub comment: Option<String>,
    pub enabled: bool,
    pub extra: ExtraState,
}

impl Block {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Field rendered as text, the way the editor reports field values.
    pub fn field_text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.field(name).map(|value| match value {
            FieldValue::Text(text) => Cow::Borrowed(text.as_str()),
            FieldValue::Variable { id } => Cow::Borrowed(id.as_str()),
            FieldValue::Number(number) => Cow::Owned(number.to_string()),
            FieldValue::Bool(true) => Cow::Borrowed("TRUE"),
            FieldValue::Bool(false) => Cow::Borrowed("FALSE"),
        })
    }

    pub fn require_field(&self, name: &str) -> Result<Cow<'_, str>> {
        self.field_text(name).ok_or_else(|| GenerationError::MissingField {
            block_id: self.id.clone(),
            kind: self.kind.tag(),
            field: name.to_string(),
        })
    }

    pub fn unknown_option(&self, field: &str, option: impl Into<String>) -> GenerationError {
        GenerationError::UnknownOption {
            block_id: self.id.clone(),
            kind: self.kind.tag(),
            field: field.to_string(),
            option: option.into(),
        }
    }

    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.get(name)
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    pub fn input_target(&self, name: &str) -> Option<BlockId> {
        self.input(name).map(|input| input.target)
    }

    pub fn value_inputs(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.inputs
            .values()
            .filter(|input| input.kind == InputKind::Value)
            .map(|input| input.target)
    }

    /// True when the block's output is plugged into another block's input.
    pub fn is_inline(&self) -> bool {
        matches!(self.attachment, Some(Attachment::Value { .. }))
    }

    pub fn item_count(&self) -> usize {
        self.extra.item_count.unwrap_or(0)
    }

    /// Procedure-definition capability; `None` for every other kind.
    pub fn as_procedure(&self) -> Option<ProcedureDef<'_>> {
        if self.kind.is_procedure_definition() {
            Some(ProcedureDef { block: self })
        } else {
            None
        }
    }
}

/// View over a block that defines a procedure.
#[derive(Debug, Clone, Copy)]
pub struct ProcedureDef<'a> {
    block: &'a Block,
}

impl<'a> ProcedureDef<'a> {
    pub fn name(&self) -> Cow<'a, str> {
        self.block
            .field_text("NAME")
            .unwrap_or(Cow::Borrowed("do_something"))
    }

    pub fn params(&self) -> impl Iterator<Item = &'a str> {
        self.block.extra.params.iter().map(|param| param.name.as_str())
    }

    pub fn has_return(&self) -> bool {
        self.block.kind == BlockKind::ProceduresDefReturn
    }
}
