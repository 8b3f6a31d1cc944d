//! Text and Variable Block Tests

#[path = "util.rs"]
mod util;

use serde_json::{json, Value};
use util::*;

fn char_at(where_: &str, at: Option<Value>) -> Value {
    let mut inputs = json!({ "VALUE": text("abc") });
    if let Some(at) = at {
        inputs["AT"] = at;
    }
    plug(node("text_charAt", json!({ "WHERE": where_ }), inputs))
}

// text
#[test]
fn should_quote_text_literals() {
    assert_eq!(print_expr(text("say \"hi\"")), r#""say \"hi\"""#);
    assert_eq!(print_expr(text("two\nlines")), r#""two\nlines""#);
}

// text_join
#[test]
fn should_join_by_item_count() {
    let join = |count: usize, inputs: Value| {
        plug(json!({ "type": "text_join", "extraState": { "itemCount": count }, "inputs": inputs }))
    };
    assert_eq!(print_expr(join(0, json!({}))), r#""""#);
    assert_eq!(print_expr(join(1, json!({ "ADD0": text("a") }))), r#""a".to_string()"#);
    assert_eq!(
        print_expr(join(3, json!({ "ADD0": text("a"), "ADD2": var("name") }))),
        r#"["a", "", name].concat()"#
    );
}

#[test]
fn should_count_plugged_items_past_the_saved_count() {
    let join = plug(json!({
        "type": "text_join",
        "inputs": { "ADD0": text("x"), "ADD1": text("y") }
    }));
    assert_eq!(print_expr(join), r#"["x", "y"].concat()"#);
}

// text_append
#[test]
fn should_append_to_variables() {
    let code = generate_blocks(json!([node(
        "text_append",
        json!({ "VAR": "message" }),
        json!({ "TEXT": text("!") })
    )]));
    assert_eq!(without_state(&code), "message = [message, \"!\"].concat();\n");
}

// text_length, text_isEmpty
#[test]
fn should_measure_text() {
    let length = plug(node("text_length", json!({}), json!({ "VALUE": text("abc") })));
    assert_eq!(print_expr(length), r#""abc".len()"#);
    let empty = plug(node("text_isEmpty", json!({}), json!({})));
    assert_eq!(print_expr(empty), r#""".is_empty()"#);
}

// text_charAt
#[test]
fn should_index_letters_from_zero() {
    assert_eq!(print_expr(char_at("FROM_START", Some(num(2.0)))), r#""abc".chars().nth(2)"#);
    assert_eq!(print_expr(char_at("FIRST", None)), r#""abc".chars().next()"#);
    assert_eq!(print_expr(char_at("LAST", None)), r#""abc".chars().last()"#);
}

#[test]
fn should_fold_one_based_literal_indices() {
    let options = json!({ "oneBasedIndex": true });
    assert_eq!(
        print_expr_with(options.clone(), char_at("FROM_START", Some(num(2.0)))),
        r#""abc".chars().nth(1)"#
    );
    assert_eq!(
        print_expr_with(options, char_at("FROM_START", None)),
        r#""abc".chars().nth(0)"#
    );
}

#[test]
fn should_leave_unrepresentable_literal_indices_to_runtime() {
    assert_eq!(
        print_expr(char_at("FROM_END", Some(num(1e19)))),
        r#"text_get_from_end("abc", 10000000000000000000 + 1)"#
    );
    assert_eq!(
        print_expr(char_at("FROM_END", Some(num(41.0)))),
        r#"text_get_from_end("abc", 42)"#
    );
}

#[test]
fn should_adjust_computed_indices() {
    let options = json!({ "oneBasedIndex": true });
    assert_eq!(
        print_expr_with(options, char_at("FROM_START", Some(var("i")))),
        r#""abc".chars().nth(i - 1)"#
    );
    let sum = plug(node(
        "math_arithmetic",
        json!({ "OP": "ADD" }),
        json!({ "A": var("i"), "B": num(1.0) }),
    ));
    assert_eq!(
        print_expr(char_at("FROM_END", Some(sum))),
        r#"text_get_from_end("abc", (i + 1) + 1)"#
    );
}

#[test]
fn should_use_helpers_for_letters_from_the_end_and_random_letters() {
    let code = generate_blocks(json!([
        print(char_at("FROM_END", Some(num(0.0)))),
        print(char_at("RANDOM", None))
    ]));
    assert!(code.contains("console::print(text_get_from_end(\"abc\", 1));"));
    assert!(code.contains("console::print(text_random_letter(\"abc\"));"));
    assert!(code.contains("fn text_get_from_end(text: &str, x: usize) -> Option<char> {"));
    assert!(code.contains("fn text_random_letter(text: &str) -> Option<char> {"));
}

#[test]
fn should_honor_the_config_index_override() {
    let mut config = bare_config();
    config.one_based_index = Some(true);
    let workspace = block_compiler::Workspace::from_value(json!({
        "blocks": [print(char_at("FROM_START", Some(num(3.0))))]
    }))
    .unwrap();
    let code = block_compiler::CodeGenerator::new(config)
        .workspace_to_code(&workspace)
        .unwrap();
    assert_eq!(code, "console::print(\"abc\".chars().nth(2));\n");
}

// text_changeCase, text_count, text_print
#[test]
fn should_change_case() {
    let case = |c: &str| plug(node("text_changeCase", json!({ "CASE": c }), json!({ "TEXT": text("hi there") })));
    assert_eq!(print_expr(case("UPPERCASE")), r#""hi there".to_uppercase()"#);
    assert_eq!(print_expr(case("LOWERCASE")), r#""hi there".to_lowercase()"#);
    let code = generate_blocks(json!([print(case("TITLECASE"))]));
    assert!(code.contains(r#"console::print(text_to_title_case("hi there"));"#));
    assert!(code.contains("fn text_to_title_case(text: &str) -> String {"));
}

#[test]
fn should_count_substrings_with_a_helper() {
    let count = plug(node("text_count", json!({}), json!({ "TEXT": text("banana"), "SUB": text("an") })));
    let code = generate_blocks(json!([print(count)]));
    assert!(code.contains(r#"console::print(text_count("banana", "an"));"#));
    assert!(code.contains("fn text_count(haystack: &str, needle: &str) -> usize {"));
}

#[test]
fn should_print_empty_text_by_default() {
    let code = generate_blocks(json!([node("text_print", json!({}), json!({}))]));
    assert_eq!(code, "console::print(\"\");\n");
}

// variables_get, variables_set
#[test]
fn should_declare_and_bind_variables() {
    let code = generate(json!({
        "variables": [{ "id": "v1", "name": "greeting" }, { "id": "v2", "name": "count" }],
        "blocks": [
            node("variables_set", json!({ "VAR": { "id": "v1" } }), json!({ "VALUE": text("hi") })),
            node("variables_set", json!({ "VAR": { "id": "v2" } }), json!({ "VALUE": num(5.0) })),
            node("variables_set", json!({ "VAR": { "id": "v2" } }), json!({}))
        ]
    }));
    assert!(code.contains("struct State {\n    greeting: _,\n    count: _,\n}"));
    assert_eq!(
        without_state(&code),
        "let greeting = strn!( \"hi\" );\n\nlet count = 5;\n\nlet count = 0;\n"
    );
}

#[test]
fn should_read_variables() {
    assert_eq!(print_expr(var("speed")), "speed");
}

#[test]
fn should_rename_variables_that_clash_with_reserved_words() {
    let code = generate_blocks(json!([print(var("loop"))]));
    assert!(code.contains("    loop2: _,\n"));
    assert!(code.contains("console::print(loop2);"));
}

#[test]
fn should_declare_developer_variables_first() {
    let code = generate(json!({
        "variables": [
            { "id": "u1", "name": "user_var" },
            { "id": "d1", "name": "sensor_value", "developer": true }
        ],
        "blocks": [print(plug(node("variables_get", json!({ "VAR": { "id": "u1" } }), json!({}))))]
    }));
    assert!(code.starts_with(
        "/// Variables used by the program\n\
         #[mynewt_macros::infer_type(attr)]  //  Infer the missing types\n\
         struct State {\n    sensor_value: _,\n    user_var: _,\n}\n"
    ));
}
