//! Math blocks.

use super::value_or;
use crate::definitions::DefinitionKind;
use crate::error::Result;
use crate::generator::{Code, Session};
use crate::output::Order;
use crate::workspace::Block;

const CONSTS_IMPORT_KEY: &str = "use_f64_consts";
const CONSTS_IMPORT: &str = "use core::f64::consts;";

fn import_consts(session: &mut Session<'_>) {
    session.define(CONSTS_IMPORT_KEY, DefinitionKind::Import, CONSTS_IMPORT);
}

pub(super) fn number<'w>(_session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let raw = block.require_field("NUM")?;
    let value = match raw.trim() {
        "Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        text => text
            .parse::<f64>()
            .map_err(|_| block.unknown_option("NUM", text))?,
    };
    let code = if value.is_nan() {
        Code::expression("f64::NAN", Order::UnaryPostfix)
    } else if value == 0.0 {
        // Covers `-0`, which would otherwise print with its sign.
        Code::expression("0", Order::Atomic)
    } else if value == f64::INFINITY {
        Code::expression("f64::INFINITY", Order::UnaryPostfix)
    } else if value == f64::NEG_INFINITY {
        Code::expression("-f64::INFINITY", Order::UnaryPrefix)
    } else if value < 0.0 {
        // A negative literal is a negation applied to a number.
        Code::expression(value.to_string(), Order::UnaryPrefix)
    } else {
        Code::expression(value.to_string(), Order::Atomic)
    };
    Ok(code)
}

pub(super) fn arithmetic<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let op = block.require_field("OP")?;
    let (operator, order) = match op.as_ref() {
        "ADD" => (" + ", Order::Additive),
        "MINUS" => (" - ", Order::Additive),
        "MULTIPLY" => (" * ", Order::Multiplicative),
        "DIVIDE" => (" / ", Order::Multiplicative),
        "POWER" => {
            let base = value_or(session, block, "A", Order::UnaryPostfix, "0")?;
            let exponent = value_or(session, block, "B", Order::None, "0")?;
            return Ok(Code::expression(
                format!("{}.powf({})", base, exponent),
                Order::UnaryPostfix,
            ));
        }
        other => return Err(block.unknown_option("OP", other)),
    };
    let a = value_or(session, block, "A", order, "0")?;
    let b = value_or(session, block, "B", order, "0")?;
    Ok(Code::expression(format!("{}{}{}", a, operator, b), order))
}

/// Single-operand functions shared by the `math_single`, `math_round` and
/// `math_trig` blocks.
pub(super) fn single<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let op = block.require_field("OP")?.into_owned();
    if op == "NEG" {
        let mut arg = value_or(session, block, "NUM", Order::UnaryPrefix, "0")?;
        if arg.starts_with('-') {
            // Keep `- -x` from fusing into `--x`.
            arg.insert(0, ' ');
        }
        return Ok(Code::expression(format!("-{}", arg), Order::UnaryPrefix));
    }

    let arg_order = match op.as_str() {
        "SIN" | "COS" | "TAN" => Order::Multiplicative,
        _ => Order::UnaryPostfix,
    };
    let arg = value_or(session, block, "NUM", arg_order, "0")?;

    let method = |name: &str| Code::expression(format!("{}.{}()", arg, name), Order::UnaryPostfix);
    let code = match op.as_str() {
        "ABS" => method("abs"),
        "ROOT" => method("sqrt"),
        "LN" => method("ln"),
        "EXP" => method("exp"),
        "LOG10" => method("log10"),
        "ROUND" => method("round"),
        "ROUNDUP" => method("ceil"),
        "ROUNDDOWN" => method("floor"),
        "POW10" => Code::expression(format!("10f64.powf({})", arg), Order::UnaryPostfix),
        "SIN" | "COS" | "TAN" => {
            import_consts(session);
            Code::expression(
                format!("({} / 180.0 * consts::PI).{}()", arg, op.to_lowercase()),
                Order::UnaryPostfix,
            )
        }
        "ASIN" | "ACOS" | "ATAN" => {
            import_consts(session);
            Code::expression(
                format!("{}.{}() / consts::PI * 180.0", arg, op.to_lowercase()),
                Order::Multiplicative,
            )
        }
        other => return Err(block.unknown_option("OP", other)),
    };
    Ok(code)
}

pub(super) fn constant<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let constant = block.require_field("CONSTANT")?;
    let (code, order) = match constant.as_ref() {
        "PI" => ("consts::PI", Order::UnaryPostfix),
        "E" => ("consts::E", Order::UnaryPostfix),
        "GOLDEN_RATIO" => ("(1.0 + 5f64.sqrt()) / 2.0", Order::Multiplicative),
        "SQRT2" => ("consts::SQRT_2", Order::UnaryPostfix),
        "SQRT1_2" => ("consts::FRAC_1_SQRT_2", Order::UnaryPostfix),
        "INFINITY" => return Ok(Code::expression("f64::INFINITY", Order::Atomic)),
        other => return Err(block.unknown_option("CONSTANT", other)),
    };
    if code.contains("consts::") {
        import_consts(session);
    }
    Ok(Code::expression(code, order))
}

const IS_PRIME: &[&str] = &[
    "fn {{FUNCTION_NAME}}(n: f64) -> bool {",
    "  // https://en.wikipedia.org/wiki/Primality_test#Naive_methods",
    "  if n == 2.0 || n == 3.0 {",
    "    return true;",
    "  }",
    "  // False if n is negative, is 1, or not whole.",
    "  // And false if n is divisible by 2 or 3.",
    "  if n <= 1.0 || n % 1.0 != 0.0 || n % 2.0 == 0.0 || n % 3.0 == 0.0 {",
    "    return false;",
    "  }",
    "  // Check all the numbers of form 6k +/- 1, up to sqrt(n).",
    "  let mut x = 6.0;",
    "  while x <= n.sqrt() + 1.0 {",
    "    if n % (x - 1.0) == 0.0 || n % (x + 1.0) == 0.0 {",
    "      return false;",
    "    }",
    "    x += 6.0;",
    "  }",
    "  true",
    "}",
];

pub(super) fn number_property<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let number = session.value_to_code(block, "NUMBER_TO_CHECK", Order::Multiplicative)?;
    if number.is_empty() {
        return Ok(Code::expression("false", Order::Atomic));
    }
    let property = block.require_field("PROPERTY")?;
    let code = match property.as_ref() {
        "PRIME" => {
            let name = session.provide_function("math_is_prime", IS_PRIME);
            return Ok(Code::expression(format!("{}({})", name, number), Order::UnaryPostfix));
        }
        "EVEN" => format!("{} % 2 == 0", number),
        "ODD" => format!("{} % 2 == 1", number),
        "WHOLE" => format!("{} % 1 == 0", number),
        "POSITIVE" => format!("{} > 0", number),
        "NEGATIVE" => format!("{} < 0", number),
        "DIVISIBLE_BY" => {
            let divisor = session.value_to_code(block, "DIVISOR", Order::Multiplicative)?;
            if divisor.is_empty() {
                return Ok(Code::expression("false", Order::Atomic));
            }
            format!("{} % {} == 0", number, divisor)
        }
        other => return Err(block.unknown_option("PROPERTY", other)),
    };
    Ok(Code::expression(code, Order::Equality))
}

/// Add to a variable in place.
pub(super) fn change<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let delta = value_or(session, block, "DELTA", Order::Additive, "0")?;
    let name = session.variable_name(block, "VAR")?;
    Ok(Code::statement(format!("{n} = {n} + {d};\n", n = name, d = delta)))
}

pub(super) fn modulo<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let dividend = value_or(session, block, "DIVIDEND", Order::Multiplicative, "0")?;
    let divisor = value_or(session, block, "DIVISOR", Order::Multiplicative, "0")?;
    Ok(Code::expression(format!("{} % {}", dividend, divisor), Order::Multiplicative))
}

pub(super) fn constrain<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let value = value_or(session, block, "VALUE", Order::UnaryPostfix, "0")?;
    let low = value_or(session, block, "LOW", Order::None, "0")?;
    let high = value_or(session, block, "HIGH", Order::None, "f64::INFINITY")?;
    Ok(Code::expression(
        format!("{}.max({}).min({})", value, low, high),
        Order::UnaryPostfix,
    ))
}

const RANDOM_INT: &[&str] = &[
    "fn {{FUNCTION_NAME}}(a: i32, b: i32) -> i32 {",
    "  // Swap a and b to ensure a is smaller.",
    "  let (low, high) = if a > b { (b, a) } else { (a, b) };",
    "  let roll = unsafe { os::os_time_get() } as i32;",
    "  low + roll.rem_euclid(high - low + 1)",
    "}",
];

pub(super) fn random_int<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let from = value_or(session, block, "FROM", Order::None, "0")?;
    let to = value_or(session, block, "TO", Order::None, "0")?;
    let name = session.provide_function("math_random_int", RANDOM_INT);
    Ok(Code::expression(format!("{}({}, {})", name, from, to), Order::UnaryPostfix))
}

const LIST_SUM: &[&str] = &[
    "fn {{FUNCTION_NAME}}(my_list: &[f64]) -> f64 {",
    "  my_list.iter().sum()",
    "}",
];

const LIST_MIN: &[&str] = &[
    "fn {{FUNCTION_NAME}}(my_list: &[f64]) -> f64 {",
    "  my_list.iter().cloned().fold(f64::INFINITY, f64::min)",
    "}",
];

const LIST_MAX: &[&str] = &[
    "fn {{FUNCTION_NAME}}(my_list: &[f64]) -> f64 {",
    "  my_list.iter().cloned().fold(f64::NEG_INFINITY, f64::max)",
    "}",
];

const LIST_AVERAGE: &[&str] = &[
    "fn {{FUNCTION_NAME}}(my_list: &[f64]) -> f64 {",
    "  if my_list.is_empty() {",
    "    return 0.0;",
    "  }",
    "  my_list.iter().sum::<f64>() / my_list.len() as f64",
    "}",
];

pub(super) fn on_list<'w>(session: &mut Session<'w>, block: &'w Block) -> Result<Code> {
    let op = block.require_field("OP")?;
    let (desired, template) = match op.as_ref() {
        "SUM" => ("math_sum", LIST_SUM),
        "MIN" => ("math_min", LIST_MIN),
        "MAX" => ("math_max", LIST_MAX),
        "AVERAGE" => ("math_mean", LIST_AVERAGE),
        other => return Err(block.unknown_option("OP", other)),
    };
    let list = value_or(session, block, "LIST", Order::None, "&[]")?;
    let name = session.provide_function(desired, template);
    Ok(Code::expression(format!("{}({})", name, list), Order::UnaryPostfix))
}
