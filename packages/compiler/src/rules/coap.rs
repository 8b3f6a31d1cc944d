//! CoAP payload blocks.

use super::{item_count, value_or};
use crate::error::Result;
use crate::generator::{Code, Session};
use crate::output::{quote, Order};
use crate::util::prefix_lines;
use crate::workspace::Block;

/// `coap!( @json { ... })` payload built from the `ADDn` items.
pub(super) fn coap<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let count = item_count(block, "ADD");
    let mut elements = Vec::with_capacity(count);
    for i in 0..count {
        elements.push(value_or(session, block, &format!("ADD{}", i), Order::None, "\"\"")?);
    }
    let code = [
        "coap!( @json {".to_string(),
        prefix_lines(&elements.join(",\n"), session.indent()),
        "})".to_string(),
    ]
    .join("\n");
    Ok(Code::expression(code, Order::UnaryPostfix))
}

/// One `"name": value` entry of a payload.
pub(super) fn field<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let name = block.require_field("NAME")?;
    let value = value_or(session, block, "name", Order::None, "0")?;
    Ok(Code::expression(format!("{}: {}", quote(&name), value), Order::None))
}
