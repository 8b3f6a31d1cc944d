//! Logic blocks.

use super::value_or;
use crate::error::Result;
use crate::generator::{Code, Session};
use crate::output::Order;
use crate::workspace::{Block, BlockKind};

/// `if` / `else if` / `else` chain. Branch count comes from the editor
/// state, widened to cover any plugged `IFn` input.
pub(super) fn controls_if<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let else_ifs = block
        .inputs
        .keys()
        .filter_map(|key| key.strip_prefix("IF")?.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
        .max(block.extra.else_if_count);
    let has_else = block.kind == BlockKind::ControlsIfElse
        || block.extra.has_else
        || block.has_input("ELSE");

    let mut code = String::new();
    for n in 0..=else_ifs {
        let condition = value_or(session, block, &format!("IF{}", n), Order::None, "false")?;
        let branch = session.statement_to_code(block, &format!("DO{}", n))?;
        if n > 0 {
            code.push_str(" else ");
        }
        code.push_str(&format!("if {} {{\n{}}}", condition, branch));
    }
    if has_else {
        let branch = session.statement_to_code(block, "ELSE")?;
        code.push_str(&format!(" else {{\n{}}}", branch));
    }
    code.push('\n');
    Ok(Code::statement(code))
}

pub(super) fn compare<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let op = block.require_field("OP")?;
    let operator = match op.as_ref() {
        "EQ" => "==",
        "NEQ" => "!=",
        "LT" => "<",
        "LTE" => "<=",
        "GT" => ">",
        "GTE" => ">=",
        other => return Err(block.unknown_option("OP", other)),
    };
    let order = if matches!(operator, "==" | "!=") {
        Order::Equality
    } else {
        Order::Relational
    };
    let a = value_or(session, block, "A", order, "0")?;
    let b = value_or(session, block, "B", order, "0")?;
    Ok(Code::expression(format!("{} {} {}", a, operator, b), order))
}

pub(super) fn operation<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let op = block.require_field("OP")?;
    let (operator, order) = match op.as_ref() {
        "AND" => ("&&", Order::LogicalAnd),
        "OR" => ("||", Order::LogicalOr),
        other => return Err(block.unknown_option("OP", other)),
    };
    let mut a = session.value_to_code(block, "A", order)?;
    let mut b = session.value_to_code(block, "B", order)?;
    if a.is_empty() && b.is_empty() {
        a = "false".to_string();
        b = "false".to_string();
    } else {
        // A single missing operand must not change the result.
        let neutral = if operator == "&&" { "true" } else { "false" };
        if a.is_empty() {
            a = neutral.to_string();
        }
        if b.is_empty() {
            b = neutral.to_string();
        }
    }
    Ok(Code::expression(format!("{} {} {}", a, operator, b), order))
}

pub(super) fn negate<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let arg = value_or(session, block, "BOOL", Order::UnaryPrefix, "true")?;
    Ok(Code::expression(format!("!{}", arg), Order::UnaryPrefix))
}

pub(super) fn boolean<'w>(_session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let value = block.require_field("BOOL")?;
    let code = match value.as_ref() {
        "TRUE" => "true",
        "FALSE" => "false",
        other => return Err(block.unknown_option("BOOL", other)),
    };
    Ok(Code::expression(code, Order::Atomic))
}

pub(super) fn null<'w>(_session: &mut Session<'w>, _block: &'w Block) -> Result<Code> {
    Ok(Code::expression("null_mut()", Order::Atomic))
}

/// Conditional value, rendered as an `if` expression.
pub(super) fn ternary<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let condition = value_or(session, block, "IF", Order::None, "false")?;
    let then = value_or(session, block, "THEN", Order::None, "null_mut()")?;
    let otherwise = value_or(session, block, "ELSE", Order::None, "null_mut()")?;
    Ok(Code::expression(
        format!("if {} {{ {} }} else {{ {} }}", condition, then, otherwise),
        Order::Conditional,
    ))
}
