//! Helpers shared by the block rule tests.

#![allow(dead_code)]

use block_compiler::{CodeGenerator, GenerationError, GeneratorConfig, Workspace};
use serde_json::{json, Value};

pub fn bare_config() -> GeneratorConfig {
    GeneratorConfig {
        header: Some(String::new()),
        trailer: Some(String::new()),
        ..GeneratorConfig::default()
    }
}

pub fn try_generate(workspace: Value) -> Result<String, GenerationError> {
    let workspace = Workspace::from_value(workspace)?;
    CodeGenerator::new(bare_config()).workspace_to_code(&workspace)
}

pub fn generate(workspace: Value) -> String {
    try_generate(workspace).unwrap()
}

pub fn generate_blocks(blocks: Value) -> String {
    generate(json!({ "blocks": blocks }))
}

/// Block object of type `kind`.
pub fn node(kind: &str, fields: Value, inputs: Value) -> Value {
    json!({ "type": kind, "fields": fields, "inputs": inputs })
}

/// Connection holding `block`, for use as an input or `next`.
pub fn plug(block: Value) -> Value {
    json!({ "block": block })
}

pub fn num(n: f64) -> Value {
    plug(node("math_number", json!({ "NUM": n }), json!({})))
}

pub fn text(s: &str) -> Value {
    plug(node("text", json!({ "TEXT": s }), json!({})))
}

pub fn boolean(b: bool) -> Value {
    plug(node("logic_boolean", json!({ "BOOL": if b { "TRUE" } else { "FALSE" } }), json!({})))
}

pub fn var(name: &str) -> Value {
    plug(node("variables_get", json!({ "VAR": name }), json!({})))
}

pub fn print(value: Value) -> Value {
    node("text_print", json!({}), json!({ "TEXT": value }))
}

/// Generated text without the program state declaration.
pub fn without_state(code: &str) -> &str {
    if code.starts_with("/// Variables used by the program") {
        code.find("}\n\n").map(|i| &code[i + 3..]).unwrap_or(code)
    } else {
        code
    }
}

/// Text a value block renders as when printed.
pub fn print_expr(value: Value) -> String {
    print_expr_with(json!({}), value)
}

pub fn print_expr_with(options: Value, value: Value) -> String {
    let code = generate(json!({ "options": options, "blocks": [print(value)] }));
    let start = code.find("console::print(").unwrap() + "console::print(".len();
    let end = start + code[start..].find(");\n").unwrap();
    code[start..end].to_string()
}
