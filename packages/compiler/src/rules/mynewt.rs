//! Mynewt device blocks: program entry, background task, delays and GPIO.

use crate::definitions::DefinitionKind;
use crate::error::Result;
use crate::generator::{Code, Session};
use crate::output::Order;
use crate::util::prefix_lines;
use crate::workspace::Block;

/// Pins offered by the pin dropdowns, by label and by macro.
const PINS: &[(&str, &str)] = &[
    ("PA1", "MCU_GPIO_PORTA!(1)"),
    ("PB1", "MCU_GPIO_PORTB!(1)"),
    ("PC13", "MCU_GPIO_PORTC!(13)"),
];

fn pin(block: &Block) -> Result<&'static str> {
    let selected = block.require_field("PIN")?;
    PINS.iter()
        .find(|(label, value)| *label == selected || *value == selected)
        .map(|(_, value)| *value)
        .ok_or_else(|| block.unknown_option("PIN", selected.as_ref()))
}

fn pin_level(block: &Block) -> Result<&'static str> {
    let selected = block.require_field("VALUE")?;
    match selected.as_ref() {
        "0" | "LOW" => Ok("0"),
        "1" | "HIGH" => Ok("1"),
        other => Err(block.unknown_option("VALUE", other)),
    }
}

pub(super) fn on_start<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let statements = session.statement_to_code(block, "STMTS")?;
    let statements = statements.trim_end_matches('\n').to_string();
    let indent = session.indent();
    let mut code = vec![
        "/// Will be run upon startup to initialise the app".to_string(),
        "fn on_start() -> MynewtResult<()> {".to_string(),
    ];
    if !statements.is_empty() {
        code.push(statements);
    }
    code.extend([
        format!("{}//  Return success to `main()`.", indent),
        format!("{}Ok(())", indent),
        "}".to_string(),
        String::new(),
    ]);
    Ok(Code::statement(code.join("\n")))
}

pub(super) fn forever<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let statements = session.statement_to_code(block, "STMTS")?;
    let indent = session.indent();
    let body = prefix_lines(statements.trim_end_matches('\n'), indent);

    session.define(
        "TASK_STACK_SIZE",
        DefinitionKind::Global,
        "/// Size of the stack (in 4-byte units) for the background task\n\
         const TASK_STACK_SIZE: usize = 256;",
    );
    session.define(
        "TASK_STACK",
        DefinitionKind::Global,
        "/// Stack space for the background task\n\
         static mut TASK_STACK: [os::os_stack_t; TASK_STACK_SIZE] = [0; TASK_STACK_SIZE];",
    );
    session.define(
        "TASK_OBJ",
        DefinitionKind::Global,
        "/// Task object for the background task\n\
         static mut TASK_OBJ: os::os_task = fill_zero!(os::os_task);",
    );

    let mut code = vec![
        "/// Will be run as Background Task that never terminates".to_string(),
        "fn task_func(_arg: Ptr) -> MynewtResult<()> {".to_string(),
        format!("{}//  Loop forever", indent),
        format!("{}loop {{", indent),
    ];
    if !body.is_empty() {
        code.push(body);
    }
    code.extend([
        format!("{}}}", indent),
        "}".to_string(),
        String::new(),
        "/// Start the Background Task".to_string(),
        "fn start_task() -> MynewtResult<()> {".to_string(),
        format!("{i}os::task_init(          //  Create a new task and start it...", i = indent),
        format!("{i}{i}out!( TASK_OBJ ),   //  Task object will be saved here", i = indent),
        format!("{i}{i}strn!( \"forever\" ), //  Name of task", i = indent),
        format!("{i}{i}Some( task_func ),  //  Function to execute when task starts", i = indent),
        format!("{i}{i}NULL,  //  Argument to be passed to above function", i = indent),
        format!("{i}{i}10,    //  Task priority: highest is 0, lowest is 255 (main task is 127)", i = indent),
        format!("{i}{i}os::OS_WAIT_FOREVER as u32, //  Don't do sanity / watchdog checking", i = indent),
        format!("{i}{i}out!( TASK_STACK ),         //  Stack space for the task", i = indent),
        format!("{i}{i}TASK_STACK_SIZE as u16      //  Size of the stack (in 4-byte units)", i = indent),
        format!("{i}) ? ;                           //  `?` means check for error", i = indent),
        format!("{}//  Return success to `main()`.", indent),
        format!("{}Ok(())", indent),
        "}".to_string(),
        String::new(),
    ]);
    Ok(Code::statement(code.join("\n")))
}

pub(super) fn wait<'w>(_session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let duration = block.require_field("DURATION")?;
    if duration.trim().parse::<f64>().is_err() {
        return Err(block.unknown_option("DURATION", duration.as_ref()));
    }
    Ok(Code::statement(format!(
        "// Wait {d} second(s)\nos::time_delay({d} * OS_TICKS_PER_SEC) ? ;\n",
        d = duration
    )))
}

pub(super) fn digital_toggle_pin<'w>(_session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let pin = pin(block)?;
    Ok(Code::statement(format!(
        "//  Toggle the GPIO pin\ngpio::toggle({}) ? ;\n",
        pin
    )))
}

pub(super) fn digital_read_pin<'w>(_session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let pin = pin(block)?;
    Ok(Code::expression(format!("gpio::read({})", pin), Order::UnaryPostfix))
}

pub(super) fn digital_write_pin<'w>(_session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let pin = pin(block)?;
    let level = pin_level(block)?;
    Ok(Code::statement(format!(
        "//  Configure the GPIO pin for output and set the value.\n\
         gpio::init_out({p}, {v}) ? ;\n\
         gpio::write({p}, {v}) ? ;\n",
        p = pin,
        v = level
    )))
}
