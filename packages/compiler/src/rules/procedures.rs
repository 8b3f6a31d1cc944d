//! Procedure blocks.
//!
//! Definitions are hoisted into the helper section under `%name` so they
//! never collide with helpers handed out by `provide_function`. A procedure
//! named `sensor__func` stands for the system function `sensor::func`; its
//! definition only records an import comment.

use super::value_or;
use crate::definitions::DefinitionKind;
use crate::error::Result;
use crate::generator::{Code, Session};
use crate::names::NameCategory;
use crate::output::Order;
use crate::workspace::Block;

fn system_path(name: &str) -> String {
    name.split("__").collect::<Vec<_>>().join("::")
}

pub(super) fn define<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let Some(procedure) = block.as_procedure() else {
        return Ok(Code::Hoisted);
    };
    let name = session.names.get_name(&procedure.name(), NameCategory::Procedure);
    let name = system_path(&name);

    let code = if name.contains("::") {
        format!("//  Import {}", name)
    } else {
        let branch = session.statement_to_code(block, "STACK")?;
        let returned = if procedure.has_return() {
            session.value_to_code(block, "RETURN", Order::None)?
        } else {
            String::new()
        };
        let return_type = if returned.is_empty() { "()" } else { "_" };
        let return_line = format!(
            "{}Ok({})\n",
            session.indent(),
            if returned.is_empty() { "()" } else { returned.as_str() }
        );
        let args: Vec<String> = procedure
            .params()
            .map(|param| format!("{}: _", session.names.get_name(param, NameCategory::Variable)))
            .collect();
        format!(
            "#[mynewt_macros::infer_type(attr)]  //  Infer the missing types\n\
             fn {}({}) -> MynewtResult<{}> {{\n{}{}}}",
            name,
            args.join(", "),
            return_type,
            branch,
            return_line,
        )
    };

    let code = session.scrub(block, &code)?;
    session.define(format!("%{}", name), DefinitionKind::Helper, code);
    Ok(Code::Hoisted)
}

/// Callee name and rendered arguments of a call block. The signature comes
/// from the editor state; plugged `ARGn` inputs past it still count.
fn call<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<String> {
    let callee = match &block.extra.name {
        Some(name) => name.clone(),
        None => block.require_field("NAME")?.into_owned(),
    };
    let name = system_path(&session.names.get_name(&callee, NameCategory::Procedure));

    let plugged = block
        .inputs
        .keys()
        .filter_map(|key| key.strip_prefix("ARG")?.parse::<usize>().ok())
        .map(|index| index + 1)
        .max()
        .unwrap_or(0);
    let count = block.extra.params.len().max(plugged);
    let mut args = Vec::with_capacity(count);
    for i in 0..count {
        args.push(value_or(session, block, &format!("ARG{}", i), Order::None, "null_mut()")?);
    }
    Ok(format!("{}({})", name, args.join(", ")))
}

pub(super) fn call_return<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let call = call(session, block)?;
    Ok(Code::expression(format!("{} ?", call), Order::UnaryPostfix))
}

pub(super) fn call_no_return<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let call = call(session, block)?;
    Ok(Code::statement(format!("{} ? ;\n", call)))
}

/// Early return guarded by `CONDITION`. Procedures return `MynewtResult`,
/// so the value is wrapped in `Ok`.
pub(super) fn if_return<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let condition = value_or(session, block, "CONDITION", Order::None, "false")?;
    let has_value = block
        .extra
        .has_return_value
        .unwrap_or_else(|| block.has_input("VALUE"));
    let returned = if has_value {
        let value = value_or(session, block, "VALUE", Order::None, "null_mut()")?;
        format!("return Ok({});", value)
    } else {
        "return Ok(());".to_string()
    };
    Ok(Code::statement(format!(
        "if {} {{\n{}{}\n}}\n",
        condition,
        session.indent(),
        returned
    )))
}
