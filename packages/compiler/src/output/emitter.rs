//! Emitter helpers
//!
//! Literal encoding and comment formatting for generated source.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::util::{prefix_lines, wrap};

static LEGAL_IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][0-9a-zA-Z_]*$").unwrap());

/// Encode `text` as a double-quoted string literal.
pub fn quote(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}

pub fn is_legal_identifier(text: &str) -> bool {
    LEGAL_IDENTIFIER_RE.is_match(text)
}

/// Line-comment style used when attaching block comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// `
    Line,
    /// `/// ` on items that take doc comments.
    Doc,
}

impl CommentStyle {
    pub fn prefix(self) -> &'static str {
        match self {
            CommentStyle::Line => "// ",
            CommentStyle::Doc => "/// ",
        }
    }
}

/// Wrap `comment` at `width` columns and turn each line into a comment line.
/// The result ends with a newline; an empty comment yields empty text.
pub fn format_comment(comment: &str, width: usize, style: CommentStyle) -> String {
    let wrapped = wrap(comment, width);
    if wrapped.is_empty() {
        return String::new();
    }
    prefix_lines(&format!("{}\n", wrapped), style.prefix())
}
