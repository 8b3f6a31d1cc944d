//! Block Rules
//!
//! One translation rule per [`BlockKind`]. A rule renders a single block and
//! returns statement text, expression text with its precedence, or
//! [`Code::Hoisted`] when it moved its output into the definition registry.
//! Inputs are always rendered through the session so precedence and comment
//! handling stay in one place. Unplugged inputs fall back to a default
//! literal chosen at each call site.

mod app;
mod coap;
mod logic;
mod math;
mod mynewt;
mod procedures;
mod text;
mod variables;

use crate::error::Result;
use crate::generator::{Code, Session};
use crate::output::Order;
use crate::workspace::{Block, BlockKind};

pub fn generate<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    use BlockKind::*;
    match block.kind {
        OnStart => mynewt::on_start(session, block),
        Forever => mynewt::forever(session, block),
        Wait => mynewt::wait(session, block),
        DigitalTogglePin => mynewt::digital_toggle_pin(session, block),
        DigitalReadPin => mynewt::digital_read_pin(session, block),
        DigitalWritePin => mynewt::digital_write_pin(session, block),

        Coap => coap::coap(session, block),
        Field => coap::field(session, block),

        App => app::app(session, block),
        Label => app::label(session, block),
        Button => app::button(session, block),

        ControlsIf | ControlsIfElse => logic::controls_if(session, block),
        LogicCompare => logic::compare(session, block),
        LogicOperation => logic::operation(session, block),
        LogicNegate => logic::negate(session, block),
        LogicBoolean => logic::boolean(session, block),
        LogicNull => logic::null(session, block),
        LogicTernary => logic::ternary(session, block),

        MathNumber => math::number(session, block),
        MathArithmetic => math::arithmetic(session, block),
        MathSingle | MathRound | MathTrig => math::single(session, block),
        MathConstant => math::constant(session, block),
        MathNumberProperty => math::number_property(session, block),
        MathChange => math::change(session, block),
        MathModulo => math::modulo(session, block),
        MathConstrain => math::constrain(session, block),
        MathRandomInt => math::random_int(session, block),
        MathOnList => math::on_list(session, block),

        Text => text::text(session, block),
        TextJoin => text::join(session, block),
        TextAppend => text::append(session, block),
        TextLength => text::length(session, block),
        TextIsEmpty => text::is_empty(session, block),
        TextCharAt => text::char_at(session, block),
        TextChangeCase => text::change_case(session, block),
        TextCount => text::count(session, block),
        TextPrint => text::print(session, block),

        VariablesGet => variables::get(session, block),
        VariablesSet => variables::set(session, block),

        ProceduresDefReturn | ProceduresDefNoReturn => procedures::define(session, block),
        ProceduresCallReturn => procedures::call_return(session, block),
        ProceduresCallNoReturn => procedures::call_no_return(session, block),
        ProceduresIfReturn => procedures::if_return(session, block),
    }
}

/// Value of input `name`, or `default` when the input is empty.
pub(crate) fn value_or<'w>(
    session: &mut Session<'w>,
    block: &'w Block,
    name: &str,
    order: Order,
    default: &str,
) -> Result<String> {
    let code = session.value_to_code(block, name, order)?;
    Ok(if code.is_empty() {
        default.to_string()
    } else {
        code
    })
}

/// Number of `ADD0..ADDn` style items on a block with a variable item list.
/// Plugged inputs past the saved count still count.
pub(crate) fn item_count(block: &Block, prefix: &str) -> usize {
    let highest_plugged = block
        .inputs
        .keys()
        .filter_map(|key| key.strip_prefix(prefix)?.parse::<usize>().ok())
        .map(|index| index + 1)
        .max()
        .unwrap_or(0);
    block.item_count().max(highest_plugged)
}
