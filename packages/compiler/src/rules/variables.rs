//! Variable blocks.

use super::value_or;
use crate::error::Result;
use crate::generator::{Code, Session};
use crate::output::Order;
use crate::workspace::Block;

pub(super) fn get<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let name = session.variable_name(block, "VAR")?;
    Ok(Code::expression(name, Order::Atomic))
}

/// `let` binding. String literals become `strn!` values so they carry the
/// terminating null the Mynewt APIs expect.
pub(super) fn set<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let mut value = value_or(session, block, "VALUE", Order::Assignment, "0")?;
    let name = session.variable_name(block, "VAR")?;
    if value.starts_with('"') {
        value = format!("strn!( {} )", value);
    }
    Ok(Code::statement(format!("let {} = {};\n", name, value)))
}
