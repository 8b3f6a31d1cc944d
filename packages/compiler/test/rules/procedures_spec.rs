//! Procedure Block Tests

#[path = "util.rs"]
mod util;

use serde_json::{json, Value};
use util::*;

fn toggle() -> Value {
    plug(node("digital_toggle_pin", json!({ "PIN": "PC13" }), json!({})))
}

#[test]
fn should_hoist_procedures_without_return_values() {
    let code = generate_blocks(json!([node(
        "procedures_defnoreturn",
        json!({ "NAME": "blink" }),
        json!({ "STACK": toggle() })
    )]));
    assert_eq!(
        code,
        "#[mynewt_macros::infer_type(attr)]  //  Infer the missing types\n\
         fn blink() -> MynewtResult<()> {\n    \
         //  Toggle the GPIO pin\n    \
         gpio::toggle(MCU_GPIO_PORTC!(13)) ? ;\n    \
         Ok(())\n\
         }\n"
    );
}

#[test]
fn should_hoist_procedures_with_parameters_and_return_values() {
    let sum = plug(node(
        "math_arithmetic",
        json!({ "OP": "ADD" }),
        json!({ "A": var("a"), "B": var("b") }),
    ));
    let code = generate_blocks(json!([{
        "type": "procedures_defreturn",
        "fields": { "NAME": "add" },
        "extraState": { "params": [{ "name": "a", "id": "pa" }, { "name": "b", "id": "pb" }] },
        "inputs": { "RETURN": sum }
    }]));
    assert!(code.ends_with(
        "fn add(a: _, b: _) -> MynewtResult<_> {\n    \
         Ok(a + b)\n\
         }\n"
    ));
}

#[test]
fn should_place_procedures_with_helpers_after_the_body() {
    let code = generate_blocks(json!([
        node("procedures_defnoreturn", json!({ "NAME": "blink" }), json!({ "STACK": toggle() })),
        { "type": "procedures_callnoreturn", "extraState": { "name": "blink" } }
    ]));
    let call = code.find("blink() ? ;\n").unwrap();
    let def = code.find("fn blink()").unwrap();
    assert!(call < def);
    assert!(code.starts_with("blink() ? ;\n\n"));
}

#[test]
fn should_call_procedures_with_default_arguments() {
    let call = plug(json!({
        "type": "procedures_callreturn",
        "extraState": { "name": "area", "params": ["w", "h"] },
        "inputs": { "ARG0": num(3.0) }
    }));
    assert_eq!(print_expr(call), "area(3, null_mut()) ?");
}

#[test]
fn should_read_the_callee_from_the_name_field() {
    let call = plug(json!({
        "type": "procedures_callreturn",
        "fields": { "NAME": "measure" },
        "inputs": { "ARG0": num(1.0) }
    }));
    assert_eq!(print_expr(call), "measure(1) ?");
}

#[test]
fn should_map_double_underscores_to_system_paths() {
    let code = generate_blocks(json!([
        { "type": "procedures_defreturn", "fields": { "NAME": "sensor__read" } },
        print(plug(json!({ "type": "procedures_callreturn", "extraState": { "name": "sensor__read" } })))
    ]));
    assert_eq!(code, "console::print(sensor::read() ?);\n\n//  Import sensor::read\n");
}

#[test]
fn should_give_procedures_and_variables_distinct_names() {
    let code = generate_blocks(json!([
        node("procedures_defnoreturn", json!({ "NAME": "level" }), json!({})),
        node("variables_set", json!({ "VAR": "level" }), json!({ "VALUE": num(1.0) })),
        { "type": "procedures_callnoreturn", "extraState": { "name": "level" } }
    ]));
    assert!(code.contains("    level: _,\n"));
    assert!(code.contains("let level = 1;\n"));
    assert!(code.contains("level2() ? ;\n"));
    assert!(code.contains("fn level2() -> MynewtResult<()> {"));
}

#[test]
fn should_render_early_returns() {
    let code = generate_blocks(json!([node(
        "procedures_defreturn",
        json!({ "NAME": "check" }),
        json!({
            "STACK": plug(json!({
                "type": "procedures_ifreturn",
                "extraState": { "hasReturnValue": true },
                "inputs": { "CONDITION": boolean(true), "VALUE": num(1.0) }
            })),
            "RETURN": num(0.0)
        })
    )]));
    assert!(code.contains(
        "fn check() -> MynewtResult<_> {\n    \
         if true {\n        \
         return Ok(1);\n    \
         }\n    \
         Ok(0)\n\
         }\n"
    ));
}

#[test]
fn should_return_unit_without_a_value() {
    let code = generate_blocks(json!([node(
        "procedures_defnoreturn",
        json!({ "NAME": "stop" }),
        json!({ "STACK": plug(json!({ "type": "procedures_ifreturn", "extraState": { "hasReturnValue": false } })) })
    )]));
    assert!(code.contains("    if false {\n        return Ok(());\n    }\n"));
}

#[test]
fn should_attach_doc_comments_to_procedures() {
    let code = generate_blocks(json!([{
        "type": "procedures_defnoreturn",
        "fields": { "NAME": "blink" },
        "comment": "Flash the LED"
    }]));
    assert!(code.starts_with("/// Flash the LED\n#[mynewt_macros::infer_type(attr)]"));
}
