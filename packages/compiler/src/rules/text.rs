//! Text blocks.

use super::{item_count, value_or};
use crate::error::Result;
use crate::generator::{Code, Session};
use crate::output::{quote, Order};
use crate::workspace::Block;

const EMPTY: &str = "\"\"";

pub(super) fn text<'w>(_session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let text = block.field_text("TEXT").unwrap_or_default();
    Ok(Code::expression(quote(&text), Order::Atomic))
}

pub(super) fn join<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    match item_count(block, "ADD") {
        0 => Ok(Code::expression(EMPTY, Order::Atomic)),
        1 => {
            let element = value_or(session, block, "ADD0", Order::UnaryPostfix, EMPTY)?;
            Ok(Code::expression(format!("{}.to_string()", element), Order::UnaryPostfix))
        }
        count => {
            let mut elements = Vec::with_capacity(count);
            for i in 0..count {
                elements.push(value_or(session, block, &format!("ADD{}", i), Order::None, EMPTY)?);
            }
            Ok(Code::expression(
                format!("[{}].concat()", elements.join(", ")),
                Order::UnaryPostfix,
            ))
        }
    }
}

pub(super) fn append<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let name = session.variable_name(block, "VAR")?;
    let value = value_or(session, block, "TEXT", Order::None, EMPTY)?;
    Ok(Code::statement(format!("{n} = [{n}, {v}].concat();\n", n = name, v = value)))
}

pub(super) fn length<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let text = value_or(session, block, "VALUE", Order::UnaryPostfix, EMPTY)?;
    Ok(Code::expression(format!("{}.len()", text), Order::UnaryPostfix))
}

pub(super) fn is_empty<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let text = value_or(session, block, "VALUE", Order::UnaryPostfix, EMPTY)?;
    Ok(Code::expression(format!("{}.is_empty()", text), Order::UnaryPostfix))
}

const GET_FROM_END: &[&str] = &[
    "fn {{FUNCTION_NAME}}(text: &str, x: usize) -> Option<char> {",
    "  text.chars().rev().nth(x - 1)",
    "}",
];

const RANDOM_LETTER: &[&str] = &[
    "fn {{FUNCTION_NAME}}(text: &str) -> Option<char> {",
    "  let count = text.chars().count();",
    "  if count == 0 {",
    "    return None;",
    "  }",
    "  let roll = unsafe { os::os_time_get() } as usize;",
    "  text.chars().nth(roll % count)",
    "}",
];

/// Letter at a position. `FROM_START` and `FROM_END` positions go through
/// index adjustment so one-based workspaces index correctly.
pub(super) fn char_at<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let where_ = block
        .field_text("WHERE")
        .map(|w| w.into_owned())
        .unwrap_or_else(|| "FROM_START".to_string());
    let text = value_or(session, block, "VALUE", Order::UnaryPostfix, EMPTY)?;
    let code = match where_.as_str() {
        "FIRST" => format!("{}.chars().next()", text),
        "LAST" => format!("{}.chars().last()", text),
        "FROM_START" => {
            let at = session.get_adjusted(block, "AT", 0, false, Order::None)?;
            format!("{}.chars().nth({})", text, at)
        }
        "FROM_END" => {
            let at = session.get_adjusted(block, "AT", 1, false, Order::None)?;
            let name = session.provide_function("text_get_from_end", GET_FROM_END);
            format!("{}({}, {})", name, text, at)
        }
        "RANDOM" => {
            let name = session.provide_function("text_random_letter", RANDOM_LETTER);
            format!("{}({})", name, text)
        }
        other => return Err(block.unknown_option("WHERE", other)),
    };
    Ok(Code::expression(code, Order::UnaryPostfix))
}

const TITLE_CASE: &[&str] = &[
    "fn {{FUNCTION_NAME}}(text: &str) -> String {",
    "  let mut title = String::with_capacity(text.len());",
    "  let mut start_of_word = true;",
    "  for ch in text.chars() {",
    "    if ch.is_whitespace() {",
    "      start_of_word = true;",
    "      title.push(ch);",
    "    } else if start_of_word {",
    "      start_of_word = false;",
    "      title.extend(ch.to_uppercase());",
    "    } else {",
    "      title.extend(ch.to_lowercase());",
    "    }",
    "  }",
    "  title",
    "}",
];

pub(super) fn change_case<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let case = block.require_field("CASE")?;
    let method = match case.as_ref() {
        "UPPERCASE" => Some("to_uppercase"),
        "LOWERCASE" => Some("to_lowercase"),
        "TITLECASE" => None,
        other => return Err(block.unknown_option("CASE", other)),
    };
    let code = match method {
        Some(method) => {
            let text = value_or(session, block, "TEXT", Order::UnaryPostfix, EMPTY)?;
            format!("{}.{}()", text, method)
        }
        None => {
            let text = value_or(session, block, "TEXT", Order::None, EMPTY)?;
            let name = session.provide_function("text_to_title_case", TITLE_CASE);
            format!("{}({})", name, text)
        }
    };
    Ok(Code::expression(code, Order::UnaryPostfix))
}

const COUNT: &[&str] = &[
    "fn {{FUNCTION_NAME}}(haystack: &str, needle: &str) -> usize {",
    "  if needle.is_empty() {",
    "    return haystack.chars().count() + 1;",
    "  }",
    "  haystack.matches(needle).count()",
    "}",
];

pub(super) fn count<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let text = value_or(session, block, "TEXT", Order::None, EMPTY)?;
    let sub = value_or(session, block, "SUB", Order::None, EMPTY)?;
    let name = session.provide_function("text_count", COUNT);
    Ok(Code::expression(format!("{}({}, {})", name, text, sub), Order::UnaryPostfix))
}

pub(super) fn print<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let message = value_or(session, block, "TEXT", Order::None, EMPTY)?;
    Ok(Code::statement(format!("console::print({});\n", message)))
}
