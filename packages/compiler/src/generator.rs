//! Code Generator
//!
//! Walks a [`Workspace`] and renders it as one Rust source file for Mynewt.
//!
//! Generation happens inside a [`Session`] created by [`CodeGenerator::init`]
//! and consumed by [`Session::finish`]. The session owns everything a run
//! accumulates (hoisted definitions, staged widgets, handed-out names), so
//! runs never observe each other's state.
//!
//! Block rules live in [`crate::rules`]; they call back into the session to
//! render their inputs with [`Session::value_to_code`] and
//! [`Session::statement_to_code`], and to hoist text with
//! [`Session::define`] and [`Session::provide_function`].

use indexmap::IndexMap;

use crate::config::GeneratorConfig;
use crate::definitions::{DefinitionKind, DefinitionRegistry};
use crate::error::{GenerationError, Result};
use crate::names::{NameCategory, NameRegistry};
use crate::output::{format_comment, needs_parens, CommentStyle, Order};
use crate::rules;
use crate::util::{collapse_blank_lines, is_number, prefix_lines, strip_trailing_whitespace};
use crate::workspace::{Block, BlockId, Workspace};

/// Registry key of the program state declaration.
pub const STATE_KEY: &str = "variables";

/// Text produced by a block rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    /// Statement text, newline terminated.
    Statement(String),
    /// Expression text and the precedence it was produced at.
    Expression(String, Order),
    /// The rule moved its text into the definition registry.
    Hoisted,
}

impl Code {
    pub fn statement(text: impl Into<String>) -> Self {
        Code::Statement(text.into())
    }

    pub fn expression(text: impl Into<String>, order: Order) -> Self {
        Code::Expression(text.into(), order)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    config: GeneratorConfig,
}

impl CodeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        CodeGenerator { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Start a generation run over `workspace`.
    ///
    /// The returned session has an empty definition registry except for the
    /// program state, which declares the developer variables and every user
    /// variable a block refers to.
    pub fn init<'w>(&'w self, workspace: &'w Workspace) -> Session<'w> {
        let mut names = NameRegistry::new();
        names.reset();
        names.set_variable_map(workspace.variables());

        let mut fields: Vec<String> = workspace
            .developer_variables()
            .map(|v| names.get_name(&v.id, NameCategory::DeveloperVariable))
            .collect();
        fields.extend(
            workspace
                .used_variables()
                .into_iter()
                .map(|v| names.get_name(&v.id, NameCategory::Variable)),
        );

        let mut definitions = DefinitionRegistry::new();
        if !fields.is_empty() {
            definitions.define(
                STATE_KEY,
                DefinitionKind::State,
                render_state(&fields, &self.config.indent),
            );
        }

        Session {
            workspace,
            config: &self.config,
            definitions,
            widgets: IndexMap::new(),
            names,
        }
    }

    /// Generate the complete source file for `workspace`.
    pub fn workspace_to_code(&self, workspace: &Workspace) -> Result<String> {
        let mut session = self.init(workspace);
        let mut body = Vec::new();
        for block in workspace.top_blocks() {
            let line = match session.block_to_code(Some(block))? {
                Code::Statement(text) => text,
                Code::Expression(text, _) if text.is_empty() => text,
                Code::Expression(text, _) => scrub_naked_value(&text),
                Code::Hoisted => String::new(),
            };
            if !line.is_empty() {
                body.push(line);
            }
        }
        tracing::debug!(top_blocks = body.len(), "workspace rendered");
        Ok(session.finish(&body.join("\n")))
    }
}

/// `at` shifted by `delta` and optionally negated, when `at` is a literal
/// whose result is exactly representable. Anything else is left to the
/// caller to adjust in the generated code.
fn fold_literal_index(at: &str, delta: i64, negate: bool) -> Option<i64> {
    // Largest magnitude below which every integer is an exact f64.
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

    if !is_number(at) {
        return None;
    }
    let literal = at.trim().parse::<f64>().ok()?.trunc();
    if literal.abs() >= EXACT_LIMIT {
        return None;
    }
    let shifted = (literal as i64).checked_add(delta)?;
    if negate {
        shifted.checked_neg()
    } else {
        Some(shifted)
    }
}

/// Declaration of the program state: one inferred-type field per variable.
fn render_state(fields: &[String], indent: &str) -> String {
    let mut text = String::from(
        "/// Variables used by the program\n\
         #[mynewt_macros::infer_type(attr)]  //  Infer the missing types\n\
         struct State {\n",
    );
    for field in fields {
        text.push_str(&format!("{}{}: _,\n", indent, field));
    }
    text.push('}');
    text
}

/// Terminate a value left at the top level so it forms a statement. The
/// terminator is added exactly once.
pub fn scrub_naked_value(line: &str) -> String {
    let trimmed = line.trim_end();
    if trimmed.ends_with(';') {
        format!("{}\n", trimmed)
    } else {
        format!("{};\n", trimmed)
    }
}

/// State of one generation run.
pub struct Session<'w> {
    workspace: &'w Workspace,
    config: &'w GeneratorConfig,
    pub definitions: DefinitionRegistry,
    /// Widget construction text staged by widget blocks for the enclosing
    /// app block, keyed by widget name.
    pub widgets: IndexMap<String, String>,
    pub names: NameRegistry,
}

impl<'w> Session<'w> {
    pub fn workspace(&self) -> &'w Workspace {
        self.workspace
    }

    pub fn config(&self) -> &'w GeneratorConfig {
        self.config
    }

    pub fn indent(&self) -> &'w str {
        &self.config.indent
    }

    pub fn one_based_index(&self) -> bool {
        self.config
            .one_based_index
            .unwrap_or(self.workspace.options().one_based_index)
    }

    /// Render `block` and the statements chained after it. Disabled blocks
    /// are skipped over.
    pub fn block_to_code(&mut self, block: Option<&'w Block>) -> Result<Code> {
        let mut current = match block {
            Some(block) => block,
            None => return Ok(Code::Statement(String::new())),
        };
        while !current.enabled {
            match current.next {
                Some(next) => current = self.workspace.block(next),
                None => return Ok(Code::Statement(String::new())),
            }
        }

        match rules::generate(self, current)? {
            Code::Statement(text) => Ok(Code::Statement(self.scrub(current, &text)?)),
            Code::Expression(text, order) => Ok(Code::Expression(self.scrub(current, &text)?, order)),
            Code::Hoisted => Ok(Code::Hoisted),
        }
    }

    /// Text of the block plugged into value input `name`, parenthesized if
    /// it binds no tighter than `order`. Empty when nothing is plugged in;
    /// the caller substitutes its own default.
    pub fn value_to_code(&mut self, block: &'w Block, name: &str, order: Order) -> Result<String> {
        let Some(target) = block.input_target(name) else {
            return Ok(String::new());
        };
        let child = self.workspace.block(target);
        match self.block_to_code(Some(child))? {
            Code::Expression(text, inner) => {
                if text.is_empty() {
                    Ok(text)
                } else if needs_parens(inner, order) {
                    Ok(format!("({})", text))
                } else {
                    Ok(text)
                }
            }
            Code::Statement(text) if text.is_empty() => Ok(text),
            Code::Hoisted => Ok(String::new()),
            Code::Statement(_) => Err(GenerationError::InvalidConnection {
                block_id: child.id.clone(),
                kind: child.kind.tag(),
                message: format!("statement block plugged into value input `{}`", name),
            }),
        }
    }

    /// Text of the statement chain in statement input `name`, indented one
    /// level.
    pub fn statement_to_code(&mut self, block: &'w Block, name: &str) -> Result<String> {
        let Some(target) = block.input_target(name) else {
            return Ok(String::new());
        };
        let child = self.workspace.block(target);
        match self.block_to_code(Some(child))? {
            Code::Statement(text) => Ok(prefix_lines(&text, self.indent())),
            Code::Hoisted => Ok(String::new()),
            Code::Expression(..) => Err(GenerationError::InvalidConnection {
                block_id: child.id.clone(),
                kind: child.kind.tag(),
                message: format!("value block plugged into statement input `{}`", name),
            }),
        }
    }

    /// Attach comments to `code` and append the chain of following
    /// statements. Comments are only collected for blocks that are not
    /// plugged into another block's value input.
    pub fn scrub(&mut self, block: &'w Block, code: &str) -> Result<String> {
        let mut comment_code = String::new();
        if !block.is_inline() {
            if let Some(comment) = &block.comment {
                let style = if block.as_procedure().is_some() {
                    CommentStyle::Doc
                } else {
                    CommentStyle::Line
                };
                let width = self.config.comment_wrap.saturating_sub(3);
                comment_code.push_str(&format_comment(comment, width, style));
            }
            for child in block.value_inputs() {
                let nested = self.all_nested_comments(child);
                if !nested.is_empty() {
                    comment_code.push_str(&prefix_lines(&nested, CommentStyle::Line.prefix()));
                }
            }
        }

        let next_code = match block.next {
            Some(next) => {
                let next_block = self.workspace.block(next);
                match self.block_to_code(Some(next_block))? {
                    Code::Statement(text) => text,
                    _ => String::new(),
                }
            }
            None => String::new(),
        };
        Ok(format!("{}{}{}", comment_code, code, next_code))
    }

    /// Comments of `root` and every block below it, one per line.
    pub fn all_nested_comments(&self, root: BlockId) -> String {
        let comments: Vec<&str> = self
            .workspace
            .descendants(self.workspace.block(root))
            .into_iter()
            .filter_map(|block| block.comment.as_deref())
            .collect();
        if comments.is_empty() {
            String::new()
        } else {
            format!("{}\n", comments.join("\n"))
        }
    }

    /// Index input `name` shifted by `delta`, optionally negated, accounting
    /// for one-based indexing. Literal indices are folded; computed indices
    /// get the arithmetic appended and are parenthesized when the result
    /// binds no tighter than `order`.
    pub fn get_adjusted(
        &mut self,
        block: &'w Block,
        name: &str,
        delta: i64,
        negate: bool,
        order: Order,
    ) -> Result<String> {
        let one_based = self.one_based_index();
        let delta = if one_based { delta - 1 } else { delta };
        let default_at = if one_based { "1" } else { "0" };

        let request = if delta != 0 {
            Order::Additive
        } else if negate {
            Order::UnaryPrefix
        } else {
            order
        };
        let mut at = self.value_to_code(block, name, request)?;
        if at.is_empty() {
            at = default_at.to_string();
        }

        if let Some(folded) = fold_literal_index(&at, delta, negate) {
            return Ok(folded.to_string());
        }

        let mut inner = None;
        if delta > 0 {
            at = format!("{} + {}", at, delta);
            inner = Some(Order::Additive);
        } else if delta < 0 {
            at = format!("{} - {}", at, -delta);
            inner = Some(Order::Additive);
        }
        if negate {
            at = if delta != 0 {
                format!("-({})", at)
            } else {
                format!("-{}", at)
            };
            inner = Some(Order::UnaryPrefix);
        }
        match inner {
            Some(inner) if needs_parens(inner, order) => Ok(format!("({})", at)),
            _ => Ok(at),
        }
    }

    /// Hoist `text` into the section `kind` under `key`. The first
    /// registration of a key wins.
    pub fn define(&mut self, key: impl Into<String>, kind: DefinitionKind, text: impl Into<String>) -> bool {
        self.definitions.define(key, kind, text)
    }

    /// Register a shared helper built from two-space indented `lines` and
    /// return the name to call it by. See
    /// [`DefinitionRegistry::provide_function`].
    pub fn provide_function(&mut self, desired_name: &str, lines: &[&str]) -> String {
        let template = lines.join("\n");
        let config = self.config;
        let indent = config.indent.as_str();
        self.definitions
            .provide_function(&mut self.names, desired_name, &template, indent)
    }

    /// Identifier of the variable selected in field `field`.
    pub fn variable_name(&mut self, block: &Block, field: &str) -> Result<String> {
        let key = block.require_field(field)?;
        Ok(self.names.get_name(&key, NameCategory::Variable))
    }

    /// Assemble the file: header, imports, state, body, helpers, trailer,
    /// globals. Empty sections are dropped and blank-line runs collapsed.
    pub fn finish(self, body: &str) -> String {
        let imports: Vec<&str> = self.definitions.bucket(DefinitionKind::Import).collect();
        let state: Vec<&str> = self.definitions.bucket(DefinitionKind::State).collect();
        let helpers: Vec<&str> = self.definitions.bucket(DefinitionKind::Helper).collect();
        let globals: Vec<&str> = self.definitions.bucket(DefinitionKind::Global).collect();
        tracing::debug!(
            imports = imports.len(),
            state = state.len(),
            helpers = helpers.len(),
            globals = globals.len(),
            "assembling output"
        );

        let sections = [
            self.config.header().to_string(),
            imports.join("\n"),
            state.join("\n\n"),
            body.to_string(),
            helpers.join("\n\n"),
            self.config.trailer().to_string(),
            globals.join("\n"),
        ];
        let joined = sections
            .iter()
            .map(|section| section.trim_start_matches('\n').trim_end())
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        let text = strip_trailing_whitespace(&collapse_blank_lines(&joined));
        format!("{}\n", text.trim_start_matches('\n').trim_end())
    }
}
