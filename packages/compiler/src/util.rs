//! Utility Functions
//!
//! Text helpers shared by the generator and the block rules.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-?(\d+(\.\d+)?|\.\d+)([eE][-+]?\d+)?\s*$").unwrap());

static BLANK_RUN_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static TRAILING_SPACE_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());

/// Leading run of two-space indentation units on each line.
static TWO_SPACE_INDENT_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^((?:  )+)").unwrap());

/// True when `text` is a plain numeric literal such as `3`, `-2.5` or `1e3`.
pub fn is_number(text: &str) -> bool {
    NUMBER_REGEXP.is_match(text)
}

/// Prefix every line of `text` with `prefix`. A trailing newline does not
/// start a new line.
pub fn prefix_lines(text: &str, prefix: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(text.len() + prefix.len() * 4);
    let (body, trailing_newline) = match text.strip_suffix('\n') {
        Some(body) => (body, true),
        None => (text, false),
    };
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(prefix);
        out.push_str(line);
    }
    if trailing_newline {
        out.push('\n');
    }
    out
}

/// Greedy word wrap. Existing line breaks are kept; words longer than
/// `limit` are left whole on their own line.
pub fn wrap(text: &str, limit: usize) -> String {
    if limit == 0 {
        return text.to_string();
    }
    text.split('\n')
        .map(|paragraph| wrap_line(paragraph, limit))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, limit: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > limit {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);
    lines.join("\n")
}

/// Collapse runs of three or more newlines to a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_REGEXP.replace_all(text, "\n\n").into_owned()
}

pub fn strip_trailing_whitespace(text: &str) -> String {
    TRAILING_SPACE_REGEXP.replace_all(text, "\n").into_owned()
}

/// Rewrite two-space indentation to `indent` per level.
pub fn normalize_indent(text: &str, indent: &str) -> String {
    if indent == "  " {
        return text.to_string();
    }
    TWO_SPACE_INDENT_REGEXP
        .replace_all(text, |caps: &regex::Captures| {
            indent.repeat(caps[1].len() / 2)
        })
        .into_owned()
}

// Tests are in test/ directory
