//! Workspace
//!
//! Read-only block graph handed to the generator: top blocks, the block
//! arena, the variable list and the workspace options.

pub mod block;
pub mod kind;
mod serialization;

pub use block::{Attachment, Block, BlockId, ExtraState, FieldValue, Input, InputKind, ProcedureDef};
pub use kind::{BlockKind, BlockShape};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use serialization::{ArenaBuilder, RawWorkspace};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceOptions {
    /// Index blocks count from 1 instead of 0.
    pub one_based_index: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableModel {
    pub id: String,
    pub name: String,
    /// Declared by the program author rather than created in the editor.
    #[serde(default)]
    pub developer: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    options: WorkspaceOptions,
    variables: Vec<VariableModel>,
    blocks: Vec<Block>,
    top_blocks: Vec<BlockId>,
}

impl Workspace {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawWorkspace = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawWorkspace = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawWorkspace) -> Result<Self> {
        let mut variables = raw.variables;
        let mut builder = ArenaBuilder::new(&mut variables);
        let top_blocks = builder.push_top_blocks(raw.blocks)?;
        let blocks = builder.blocks;
        Ok(Workspace {
            options: raw.options,
            variables,
            blocks,
            top_blocks,
        })
    }

    pub fn options(&self) -> &WorkspaceOptions {
        &self.options
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn top_blocks(&self) -> impl Iterator<Item = &Block> {
        self.top_blocks.iter().map(move |id| self.block(*id))
    }

    pub fn variables(&self) -> &[VariableModel] {
        &self.variables
    }

    pub fn variable(&self, id: &str) -> Option<&VariableModel> {
        self.variables.iter().find(|v| v.id == id)
    }

    pub fn developer_variables(&self) -> impl Iterator<Item = &VariableModel> {
        self.variables.iter().filter(|v| v.developer)
    }

    /// User variables referenced by at least one block, in order of first use.
    pub fn used_variables(&self) -> Vec<&VariableModel> {
        let mut used: Vec<&VariableModel> = Vec::new();
        for block in &self.blocks {
            for value in block.fields.values() {
                if let FieldValue::Variable { id } = value {
                    if let Some(model) = self.variable(id) {
                        if !model.developer && !used.iter().any(|u| u.id == model.id) {
                            used.push(model);
                        }
                    }
                }
            }
        }
        used
    }

    /// Every block below `root` reached through inputs and `next`, root
    /// included, in depth-first order.
    pub fn descendants<'a>(&'a self, root: &'a Block) -> Vec<&'a Block> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(block) = stack.pop() {
            out.push(block);
            if let Some(next) = block.next {
                stack.push(self.block(next));
            }
            for input in block.inputs.values().rev() {
                stack.push(self.block(input.target));
            }
        }
        out
    }
}
