//! Logic and Math Block Tests

#[path = "util.rs"]
mod util;

use block_compiler::GenerationError;
use serde_json::json;
use util::*;

fn compare(op: &str, a: serde_json::Value, b: serde_json::Value) -> serde_json::Value {
    plug(node("logic_compare", json!({ "OP": op }), json!({ "A": a, "B": b })))
}

fn arithmetic(op: &str, a: serde_json::Value, b: serde_json::Value) -> serde_json::Value {
    plug(node("math_arithmetic", json!({ "OP": op }), json!({ "A": a, "B": b })))
}

fn logic(op: &str, a: Option<serde_json::Value>, b: Option<serde_json::Value>) -> serde_json::Value {
    let mut inputs = serde_json::Map::new();
    if let Some(a) = a {
        inputs.insert("A".to_string(), a);
    }
    if let Some(b) = b {
        inputs.insert("B".to_string(), b);
    }
    plug(node("logic_operation", json!({ "OP": op }), serde_json::Value::Object(inputs)))
}

// controls_if
#[test]
fn should_render_if_chain() {
    let code = generate_blocks(json!([{
        "type": "controls_if",
        "extraState": { "elseIfCount": 1, "hasElse": true },
        "inputs": {
            "IF0": boolean(true),
            "DO0": plug(print(text("a"))),
            "IF1": boolean(false),
            "DO1": plug(print(text("b"))),
            "ELSE": plug(print(text("c")))
        }
    }]));
    assert_eq!(
        code,
        "if true {\n    console::print(\"a\");\n} else if false {\n    console::print(\"b\");\n} else {\n    console::print(\"c\");\n}\n"
    );
}

#[test]
fn should_default_missing_condition_to_false() {
    let code = generate_blocks(json!([{ "type": "controls_if" }]));
    assert_eq!(code, "if false {\n}\n");
}

#[test]
fn should_render_else_for_ifelse_blocks() {
    let code = generate_blocks(json!([{
        "type": "controls_ifelse",
        "inputs": { "IF0": boolean(true), "ELSE": plug(print(text("no"))) }
    }]));
    assert_eq!(code, "if true {\n} else {\n    console::print(\"no\");\n}\n");
}

// logic expressions
#[test]
fn should_render_comparisons() {
    assert_eq!(print_expr(compare("EQ", num(1.0), num(2.0))), "1 == 2");
    assert_eq!(print_expr(compare("GTE", num(3.0), num(2.0))), "3 >= 2");
}

#[test]
fn should_parenthesize_looser_operands() {
    let or = logic("OR", Some(boolean(true)), Some(boolean(false)));
    assert_eq!(print_expr(logic("AND", Some(or), Some(boolean(true)))), "(true || false) && true");

    let and = logic("AND", Some(boolean(true)), Some(boolean(false)));
    assert_eq!(print_expr(logic("OR", Some(and), Some(boolean(true)))), "true && false || true");
}

#[test]
fn should_fill_missing_logic_operands_with_neutral_values() {
    assert_eq!(print_expr(logic("AND", Some(boolean(false)), None)), "false && true");
    assert_eq!(print_expr(logic("OR", None, Some(boolean(true)))), "false || true");
    assert_eq!(print_expr(logic("AND", None, None)), "false && false");
}

#[test]
fn should_negate_with_parentheses() {
    let negated = plug(node("logic_negate", json!({}), json!({ "BOOL": compare("EQ", num(1.0), num(2.0)) })));
    assert_eq!(print_expr(negated), "!(1 == 2)");
    let bare = plug(node("logic_negate", json!({}), json!({})));
    assert_eq!(print_expr(bare), "!true");
}

#[test]
fn should_render_null_and_ternary() {
    assert_eq!(print_expr(plug(node("logic_null", json!({}), json!({})))), "null_mut()");
    let ternary = plug(node(
        "logic_ternary",
        json!({}),
        json!({ "IF": boolean(true), "THEN": num(1.0), "ELSE": num(2.0) }),
    ));
    assert_eq!(print_expr(ternary), "if true { 1 } else { 2 }");
    let empty = plug(node("logic_ternary", json!({}), json!({})));
    assert_eq!(print_expr(empty), "if false { null_mut() } else { null_mut() }");
}

// math_number
#[test]
fn should_render_numbers() {
    assert_eq!(print_expr(num(3.5)), "3.5");
    assert_eq!(print_expr(num(-2.0)), "-2");
    let infinite = plug(node("math_number", json!({ "NUM": "Infinity" }), json!({})));
    assert_eq!(print_expr(infinite), "f64::INFINITY");
}

#[test]
fn should_render_negative_zero_and_nan_as_valid_literals() {
    let literal = |text: &str| plug(node("math_number", json!({ "NUM": text }), json!({})));
    assert_eq!(print_expr(literal("-0")), "0");
    assert_eq!(print_expr(arithmetic("POWER", literal("-0"), num(0.0))), "0.powf(0)");
    let abs = plug(node("math_single", json!({ "OP": "ABS" }), json!({ "NUM": literal("-0") })));
    assert_eq!(print_expr(abs), "0.abs()");
    assert_eq!(print_expr(literal("NaN")), "f64::NAN");
}

#[test]
fn should_reject_non_numeric_numbers() {
    let err = try_generate(json!({
        "blocks": [print(plug(node("math_number", json!({ "NUM": "ten" }), json!({}))))]
    }))
    .unwrap_err();
    assert!(matches!(err, GenerationError::UnknownOption { field, .. } if field == "NUM"));
}

// math_arithmetic
#[test]
fn should_respect_arithmetic_precedence() {
    let product = arithmetic("MULTIPLY", num(2.0), num(3.0));
    assert_eq!(print_expr(arithmetic("ADD", product, num(4.0))), "2 * 3 + 4");

    let sum = arithmetic("ADD", num(1.0), num(2.0));
    assert_eq!(print_expr(arithmetic("MULTIPLY", sum, num(3.0))), "(1 + 2) * 3");

    let difference = arithmetic("MINUS", num(5.0), num(1.0));
    assert_eq!(print_expr(arithmetic("MINUS", num(10.0), difference)), "10 - (5 - 1)");
}

#[test]
fn should_render_powers_as_method_calls() {
    assert_eq!(print_expr(arithmetic("POWER", num(2.0), num(8.0))), "2.powf(8)");
    let sum = arithmetic("ADD", num(1.0), num(1.0));
    assert_eq!(print_expr(arithmetic("POWER", sum, num(2.0))), "(1 + 1).powf(2)");
}

#[test]
fn should_reject_unknown_arithmetic_operators() {
    let err = try_generate(json!({
        "blocks": [print(arithmetic("XOR", num(1.0), num(2.0)))]
    }))
    .unwrap_err();
    assert!(matches!(err, GenerationError::UnknownOption { option, .. } if option == "XOR"));
}

// math_single, math_round, math_trig
#[test]
fn should_render_single_operand_functions() {
    let single = |op: &str, kind: &str, arg| plug(node(kind, json!({ "OP": op }), json!({ "NUM": arg })));
    assert_eq!(print_expr(single("ABS", "math_single", num(4.0))), "4.abs()");
    assert_eq!(
        print_expr(single("ROOT", "math_single", arithmetic("ADD", num(1.0), num(2.0)))),
        "(1 + 2).sqrt()"
    );
    assert_eq!(print_expr(single("ROUNDUP", "math_round", num(1.5))), "1.5.ceil()");
    assert_eq!(print_expr(single("NEG", "math_single", num(-5.0))), "-(-5)");
    assert_eq!(print_expr(single("POW10", "math_single", num(2.0))), "10f64.powf(2)");
}

#[test]
fn should_convert_degrees_for_trig_and_import_consts() {
    let trig = plug(node("math_trig", json!({ "OP": "SIN" }), json!({ "NUM": num(30.0) })));
    let code = generate_blocks(json!([print(trig)]));
    assert!(code.starts_with("use core::f64::consts;\n\n"));
    assert!(code.contains("console::print((30 / 180.0 * consts::PI).sin());"));

    let inverse = plug(node("math_trig", json!({ "OP": "ACOS" }), json!({ "NUM": num(0.5) })));
    assert_eq!(print_expr(inverse), "0.5.acos() / consts::PI * 180.0");
}

#[test]
fn should_render_constants() {
    let constant = |name: &str| plug(node("math_constant", json!({ "CONSTANT": name }), json!({})));
    assert_eq!(print_expr(constant("PI")), "consts::PI");
    assert_eq!(print_expr(constant("GOLDEN_RATIO")), "(1.0 + 5f64.sqrt()) / 2.0");
    assert_eq!(print_expr(constant("INFINITY")), "f64::INFINITY");
}

// math_number_property
#[test]
fn should_check_number_properties() {
    let property = |name: &str| {
        plug(node(
            "math_number_property",
            json!({ "PROPERTY": name }),
            json!({ "NUMBER_TO_CHECK": num(4.0), "DIVISOR": num(2.0) }),
        ))
    };
    assert_eq!(print_expr(property("EVEN")), "4 % 2 == 0");
    assert_eq!(print_expr(property("NEGATIVE")), "4 < 0");
    assert_eq!(print_expr(property("DIVISIBLE_BY")), "4 % 2 == 0");
}

#[test]
fn should_test_primes_with_a_shared_helper() {
    let prime = |n: f64| {
        plug(node(
            "math_number_property",
            json!({ "PROPERTY": "PRIME" }),
            json!({ "NUMBER_TO_CHECK": num(n) }),
        ))
    };
    let code = generate_blocks(json!([print(prime(7.0)), print(prime(9.0))]));
    assert!(code.contains("console::print(math_is_prime(7));"));
    assert!(code.contains("console::print(math_is_prime(9));"));
    assert_eq!(code.matches("fn math_is_prime(n: f64) -> bool {").count(), 1);
    assert!(code.contains("\n    if n == 2.0 || n == 3.0 {\n        return true;\n    }\n"));
}

// math_change, math_modulo, math_constrain
#[test]
fn should_change_variables_in_place() {
    let code = generate_blocks(json!([node(
        "math_change",
        json!({ "VAR": "total" }),
        json!({ "DELTA": arithmetic("ADD", num(1.0), num(2.0)) })
    )]));
    assert_eq!(without_state(&code), "total = total + (1 + 2);\n");
}

#[test]
fn should_render_modulo_and_constrain() {
    let modulo = plug(node("math_modulo", json!({}), json!({ "DIVIDEND": num(7.0), "DIVISOR": num(3.0) })));
    assert_eq!(print_expr(modulo), "7 % 3");
    let constrain = plug(node(
        "math_constrain",
        json!({}),
        json!({ "VALUE": num(5.0), "LOW": num(1.0), "HIGH": num(10.0) }),
    ));
    assert_eq!(print_expr(constrain), "5.max(1).min(10)");
}

// math_random_int, math_on_list
#[test]
fn should_share_random_int_helper() {
    let random = || plug(node("math_random_int", json!({}), json!({ "FROM": num(1.0), "TO": num(6.0) })));
    let code = generate_blocks(json!([print(random()), print(random())]));
    assert_eq!(code.matches("math_random_int(1, 6)").count(), 2);
    assert_eq!(code.matches("fn math_random_int(").count(), 1);
}

#[test]
fn should_summarize_lists_with_helpers() {
    let on_list = |op: &str| plug(node("math_on_list", json!({ "OP": op }), json!({ "LIST": var("samples") })));
    let code = generate_blocks(json!([print(on_list("MAX")), print(on_list("AVERAGE"))]));
    assert!(code.contains("console::print(math_max(samples));"));
    assert!(code.contains("console::print(math_mean(samples));"));
    assert!(code.contains("fn math_max(my_list: &[f64]) -> f64 {"));
    assert!(code.contains("fn math_mean(my_list: &[f64]) -> f64 {"));

    let empty = plug(node("math_on_list", json!({ "OP": "MIN" }), json!({})));
    assert_eq!(print_expr(empty), "math_min(&[])");
}

#[test]
fn should_reject_unsupported_list_operations() {
    let err = try_generate(json!({
        "blocks": [print(plug(node("math_on_list", json!({ "OP": "MODE" }), json!({}))))]
    }))
    .unwrap_err();
    assert!(matches!(err, GenerationError::UnknownOption { option, .. } if option == "MODE"));
}
