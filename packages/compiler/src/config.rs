//! Generator Configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_INDENT: &str = "    ";
pub const DEFAULT_COMMENT_WRAP: usize = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// One level of indentation in generated code.
    pub indent: String,
    /// Column at which block comments are wrapped.
    pub comment_wrap: usize,
    /// Overrides the workspace's own indexing option when set.
    pub one_based_index: Option<bool>,
    /// Replaces the built-in file header.
    pub header: Option<String>,
    /// Replaces the built-in runtime trailer.
    pub trailer: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            indent: DEFAULT_INDENT.to_string(),
            comment_wrap: DEFAULT_COMMENT_WRAP,
            one_based_index: None,
            header: None,
            trailer: None,
        }
    }
}

impl GeneratorConfig {
    pub fn header(&self) -> &str {
        self.header.as_deref().unwrap_or(crate::templates::HEADER)
    }

    pub fn trailer(&self) -> &str {
        self.trailer.as_deref().unwrap_or(crate::templates::TRAILER)
    }
}
