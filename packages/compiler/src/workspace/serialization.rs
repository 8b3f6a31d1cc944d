//! Workspace Serialization
//!
//! Deserializes the editor's JSON save format and flattens the nested block
//! tree into the workspace arena.

use indexmap::IndexMap;
use serde::Deserialize;
use smallvec::SmallVec;

use super::block::{
    Attachment, Block, BlockId, ExtraState, FieldValue, Input, InputKind, ProcedureParam,
};
use super::kind::{BlockKind, BlockShape};
use super::{VariableModel, WorkspaceOptions};
use crate::error::{GenerationError, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct RawWorkspace {
    #[serde(default)]
    pub options: WorkspaceOptions,
    #[serde(default)]
    pub variables: Vec<VariableModel>,
    #[serde(default)]
    pub blocks: RawBlocks,
}

/// Top blocks are either a bare list or wrapped as `{"languageVersion": 0, "blocks": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawBlocks {
    List(Vec<RawBlock>),
    Wrapped {
        #[serde(default)]
        blocks: Vec<RawBlock>,
    },
}

impl Default for RawBlocks {
    fn default() -> Self {
        RawBlocks::List(Vec::new())
    }
}

impl RawBlocks {
    fn into_vec(self) -> Vec<RawBlock> {
        match self {
            RawBlocks::List(blocks) | RawBlocks::Wrapped { blocks } => blocks,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldValue>,
    #[serde(default)]
    pub inputs: IndexMap<String, RawConnection>,
    #[serde(default)]
    pub next: Option<RawConnection>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub icons: Option<RawIcons>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub disabled: Option<bool>,
    #[serde(default)]
    pub extra_state: Option<RawExtraState>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawConnection {
    #[serde(default)]
    pub block: Option<Box<RawBlock>>,
    #[serde(default)]
    pub shadow: Option<Box<RawBlock>>,
}

impl RawConnection {
    /// Real blocks cover shadows; a lone shadow still generates code.
    fn into_block(self) -> Option<RawBlock> {
        self.block.or(self.shadow).map(|block| *block)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawIcons {
    #[serde(default)]
    pub comment: Option<RawCommentIcon>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCommentIcon {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawExtraState {
    pub item_count: Option<usize>,
    pub else_if_count: usize,
    pub has_else: bool,
    pub name: Option<String>,
    pub params: Vec<RawParam>,
    pub has_return_value: Option<bool>,
}

/// Definition blocks save `{name, id}` pairs, call blocks save bare names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawParam {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        id: Option<String>,
    },
}

impl From<RawParam> for ProcedureParam {
    fn from(raw: RawParam) -> Self {
        match raw {
            RawParam::Name(name) => ProcedureParam { name, id: None },
            RawParam::Full { name, id } => ProcedureParam { name, id },
        }
    }
}

impl From<RawExtraState> for ExtraState {
    fn from(raw: RawExtraState) -> Self {
        ExtraState {
            item_count: raw.item_count,
            else_if_count: raw.else_if_count,
            has_else: raw.has_else,
            name: raw.name,
            params: raw.params.into_iter().map(ProcedureParam::from).collect::<SmallVec<_>>(),
            has_return_value: raw.has_return_value,
        }
    }
}

/// Builds the block arena from the raw tree.
pub(crate) struct ArenaBuilder<'v> {
    pub blocks: Vec<Block>,
    pub variables: &'v mut Vec<VariableModel>,
    next_generated_id: usize,
}

impl<'v> ArenaBuilder<'v> {
    pub fn new(variables: &'v mut Vec<VariableModel>) -> Self {
        ArenaBuilder {
            blocks: Vec::new(),
            variables,
            next_generated_id: 0,
        }
    }

    pub fn push_top_blocks(&mut self, raw: RawBlocks) -> Result<Vec<BlockId>> {
        raw.into_vec()
            .into_iter()
            .map(|block| self.push(block, None))
            .collect()
    }

    fn push(&mut self, raw: RawBlock, attachment: Option<Attachment>) -> Result<BlockId> {
        let kind: BlockKind = raw.kind.parse()?;
        let handle = BlockId(self.blocks.len());
        let id = match raw.id {
            Some(id) => id,
            None => self.generated_id(),
        };
        let fields = self.resolve_fields(raw.fields)?;
        let comment = raw
            .comment
            .or_else(|| raw.icons.and_then(|icons| icons.comment).map(|c| c.text))
            .filter(|text| !text.is_empty());
        let enabled = raw.enabled.unwrap_or(true) && !raw.disabled.unwrap_or(false);

        self.blocks.push(Block {
            id,
            kind,
            fields,
            inputs: IndexMap::new(),
            next: None,
            attachment,
            comment,
            enabled,
            extra: raw.extra_state.map(ExtraState::from).unwrap_or_default(),
        });

        for (name, connection) in raw.inputs {
            let Some(child) = connection.into_block() else {
                continue;
            };
            let child_kind: BlockKind = child.kind.parse()?;
            let shape = child_kind.shape();
            let (input_kind, child_attachment) = if shape.contains(BlockShape::OUTPUT) {
                (InputKind::Value, Attachment::Value { parent: handle })
            } else if shape.contains(BlockShape::PREVIOUS) {
                (InputKind::Statement, Attachment::Statement { parent: handle })
            } else {
                return Err(self.invalid_connection(
                    handle,
                    format!("input `{}` cannot hold a `{}` block", name, child_kind),
                ));
            };
            let target = self.push(child, Some(child_attachment))?;
            self.blocks[handle.0].inputs.insert(
                name,
                Input {
                    kind: input_kind,
                    target,
                },
            );
        }

        if let Some(child) = raw.next.and_then(RawConnection::into_block) {
            let child_kind: BlockKind = child.kind.parse()?;
            if !kind.shape().contains(BlockShape::NEXT)
                || !child_kind.shape().contains(BlockShape::PREVIOUS)
            {
                return Err(self.invalid_connection(
                    handle,
                    format!("a `{}` block cannot follow it", child_kind),
                ));
            }
            let next = self.push(child, Some(Attachment::Next { previous: handle }))?;
            self.blocks[handle.0].next = Some(next);
        }

        Ok(handle)
    }

    /// Variable fields saved by name are bound to a workspace variable,
    /// creating it when the save file omitted the declaration.
    fn resolve_fields(
        &mut self,
        fields: IndexMap<String, FieldValue>,
    ) -> Result<IndexMap<String, FieldValue>> {
        fields
            .into_iter()
            .map(|(name, value)| {
                let value = match value {
                    FieldValue::Variable { id } => {
                        if !self.variables.iter().any(|v| v.id == id) {
                            return Err(GenerationError::UnknownVariable(id));
                        }
                        FieldValue::Variable { id }
                    }
                    FieldValue::Text(var_name) if name == "VAR" => FieldValue::Variable {
                        id: self.variable_id_for(&var_name),
                    },
                    other => other,
                };
                Ok((name, value))
            })
            .collect()
    }

    fn variable_id_for(&mut self, name: &str) -> String {
        if let Some(existing) = self.variables.iter().find(|v| v.name == name) {
            return existing.id.clone();
        }
        let id = self.generated_id();
        self.variables.push(VariableModel {
            id: id.clone(),
            name: name.to_string(),
            developer: false,
        });
        id
    }

    fn generated_id(&mut self) -> String {
        self.next_generated_id += 1;
        format!("#{}", self.next_generated_id)
    }

    fn invalid_connection(&self, handle: BlockId, message: String) -> GenerationError {
        let block = &self.blocks[handle.0];
        GenerationError::InvalidConnection {
            block_id: block.id.clone(),
            kind: block.kind.tag(),
            message,
        }
    }
}
