//! The built-in library: a fixed table of native procedures installed once
//! into the global frame by [`register_stdlib`].

use unicode_segmentation::UnicodeSegmentation;

use crate::environment::Environment;
use crate::error::Error;
use crate::interner::Symbol;
use crate::interpreter::apply;
use crate::language::{NativeFn, Value};
use crate::native::{
    check_arity_at_least, check_arity_exact, extract_index, extract_list, extract_number,
    extract_str,
};
use crate::numeric::Number;

// ============================================================================
// Arithmetic
// ============================================================================

fn fold_numeric(
    name: &str,
    args: &[Value],
    op: fn(&Number, &Number) -> Result<Number, Error>,
) -> Result<Value, Error> {
    check_arity_at_least(name, args, 1)?;

    let mut acc = extract_number(name, &args[0])?;
    for arg in &args[1..] {
        acc = op(&acc, &extract_number(name, arg)?)?;
    }
    Ok(Value::Number(acc))
}

fn add(args: &[Value]) -> Result<Value, Error> {
    fold_numeric("+", args, Number::add)
}

/// Folds left; with a single operand, negates.
fn sub(args: &[Value]) -> Result<Value, Error> {
    if let [operand] = args {
        return Ok(Value::Number(extract_number("-", operand)?.neg()?));
    }
    fold_numeric("-", args, Number::sub)
}

fn mul(args: &[Value]) -> Result<Value, Error> {
    fold_numeric("*", args, Number::mul)
}

/// Folds left; with a single operand, reciprocates.
fn div(args: &[Value]) -> Result<Value, Error> {
    if let [operand] = args {
        return Ok(Value::Number(extract_number("/", operand)?.recip()?));
    }
    fold_numeric("/", args, Number::div)
}

// ============================================================================
// Comparison
// ============================================================================

fn compare_chain(
    name: &str,
    args: &[Value],
    cmp: fn(&Number, &Number) -> bool,
) -> Result<Value, Error> {
    check_arity_at_least(name, args, 2)?;

    for pair in args.windows(2) {
        let a = extract_number(name, &pair[0])?;
        let b = extract_number(name, &pair[1])?;
        if !cmp(&a, &b) {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn gt(args: &[Value]) -> Result<Value, Error> {
    compare_chain(">", args, |a, b| a > b)
}

fn lt(args: &[Value]) -> Result<Value, Error> {
    compare_chain("<", args, |a, b| a < b)
}

fn gte(args: &[Value]) -> Result<Value, Error> {
    compare_chain(">=", args, |a, b| a >= b)
}

fn lte(args: &[Value]) -> Result<Value, Error> {
    compare_chain("<=", args, |a, b| a <= b)
}

fn num_eq(args: &[Value]) -> Result<Value, Error> {
    compare_chain("=", args, |a, b| a == b)
}

// ============================================================================
// List Primitives
// ============================================================================

fn car(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("car", args, 1)?;
    extract_list("car", &args[0])?
        .first()
        .cloned()
        .ok_or_else(|| Error::runtime("car: empty list"))
}

fn cdr(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("cdr", args, 1)?;
    let items = extract_list("cdr", &args[0])?;
    match items.split_first() {
        Some((_, rest)) => Ok(Value::list(rest.to_vec())),
        None => Err(Error::runtime("cdr: empty list")),
    }
}

fn cons_fn(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("cons", args, 2)?;
    let rest = extract_list("cons", &args[1])?;

    let mut items = Vec::with_capacity(rest.len() + 1);
    items.push(args[0].clone());
    items.extend_from_slice(rest);
    Ok(Value::list(items))
}

fn list_fn(args: &[Value]) -> Result<Value, Error> {
    Ok(Value::list(args.to_vec()))
}

fn length(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("length", args, 1)?;
    Ok(Value::from(extract_list("length", &args[0])?.len() as i64))
}

fn is_null(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("null?", args, 1)?;
    Ok(Value::Bool(matches!(&args[0], Value::List(items) if items.is_empty())))
}

fn is_list(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("list?", args, 1)?;
    Ok(Value::Bool(matches!(&args[0], Value::List(_))))
}

/// (map f list...) applies f across the lists, zipped to the shortest.
fn map_fn(args: &[Value]) -> Result<Value, Error> {
    check_arity_at_least("map", args, 2)?;

    let callee = &args[0];
    let lists = args[1..]
        .iter()
        .map(|arg| extract_list("map", arg))
        .collect::<Result<Vec<_>, _>>()?;
    let shortest = lists.iter().map(|list| list.len()).min().unwrap_or(0);

    let mut results = Vec::with_capacity(shortest);
    for i in 0..shortest {
        let row: Vec<Value> = lists.iter().map(|list| list[i].clone()).collect();
        results.push(apply(callee, &row)?);
    }
    Ok(Value::list(results))
}

fn append(args: &[Value]) -> Result<Value, Error> {
    let mut items = Vec::new();
    for arg in args {
        items.extend_from_slice(extract_list("append", arg)?);
    }
    Ok(Value::list(items))
}

// ============================================================================
// Type Predicates
// ============================================================================

fn is_number(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("number?", args, 1)?;
    Ok(Value::Bool(matches!(&args[0], Value::Number(_))))
}

fn is_symbol(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("symbol?", args, 1)?;
    Ok(Value::Bool(matches!(&args[0], Value::Symbol(_))))
}

fn is_procedure(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("procedure?", args, 1)?;
    Ok(Value::Bool(matches!(
        &args[0],
        Value::Lambda(_) | Value::Native(_)
    )))
}

fn is_string(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("string?", args, 1)?;
    Ok(Value::Bool(matches!(&args[0], Value::Str(_))))
}

// ============================================================================
// String Utilities
// ============================================================================

fn string_append(args: &[Value]) -> Result<Value, Error> {
    let mut result = String::new();
    for arg in args {
        result.push_str(extract_str("string-append", arg)?);
    }
    Ok(Value::Str(result.into()))
}

/// Length in user-perceived characters (grapheme clusters), not bytes.
fn string_length(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("string-length", args, 1)?;
    let s = extract_str("string-length", &args[0])?;
    Ok(Value::from(s.graphemes(true).count() as i64))
}

/// (substring s start end), grapheme-indexed, start inclusive and end
/// exclusive.
fn substring(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("substring", args, 3)?;
    let s = extract_str("substring", &args[0])?;
    let start = extract_index("substring", &args[1])?;
    let end = extract_index("substring", &args[2])?;

    let graphemes: Vec<&str> = s.graphemes(true).collect();
    if start > end || end > graphemes.len() {
        return Err(Error::runtime(format!(
            "substring: range {start}..{end} out of bounds for length {}",
            graphemes.len()
        )));
    }
    Ok(Value::Str(graphemes[start..end].concat().into()))
}

fn string_to_symbol(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("string->symbol", args, 1)?;
    let s = extract_str("string->symbol", &args[0])?;
    Ok(Value::Symbol(Symbol::intern(s)))
}

// ============================================================================
// Numeric Functions
// ============================================================================

fn unary_float(name: &str, args: &[Value], op: fn(f64) -> f64) -> Result<Value, Error> {
    check_arity_exact(name, args, 1)?;
    let n = extract_number(name, &args[0])?;
    Ok(Value::from(op(n.to_f64())))
}

fn sin(args: &[Value]) -> Result<Value, Error> {
    unary_float("sin", args, f64::sin)
}

fn cos(args: &[Value]) -> Result<Value, Error> {
    unary_float("cos", args, f64::cos)
}

fn tan(args: &[Value]) -> Result<Value, Error> {
    unary_float("tan", args, f64::tan)
}

fn asin(args: &[Value]) -> Result<Value, Error> {
    unary_float("asin", args, f64::asin)
}

fn acos(args: &[Value]) -> Result<Value, Error> {
    unary_float("acos", args, f64::acos)
}

fn atan(args: &[Value]) -> Result<Value, Error> {
    unary_float("atan", args, f64::atan)
}

fn exp(args: &[Value]) -> Result<Value, Error> {
    unary_float("exp", args, f64::exp)
}

/// Natural logarithm.
fn log(args: &[Value]) -> Result<Value, Error> {
    unary_float("log", args, f64::ln)
}

fn sqrt(args: &[Value]) -> Result<Value, Error> {
    unary_float("sqrt", args, f64::sqrt)
}

fn floor(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("floor", args, 1)?;
    Ok(Value::Number(extract_number("floor", &args[0])?.floor()))
}

fn ceiling(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("ceiling", args, 1)?;
    Ok(Value::Number(extract_number("ceiling", &args[0])?.ceiling()))
}

fn round(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("round", args, 1)?;
    Ok(Value::Number(extract_number("round", &args[0])?.round()))
}

fn abs(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("abs", args, 1)?;
    Ok(Value::Number(extract_number("abs", &args[0])?.abs()?))
}

fn modulo(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("modulo", args, 2)?;
    let a = extract_number("modulo", &args[0])?;
    let b = extract_number("modulo", &args[1])?;
    Ok(Value::Number(a.modulo(&b)?))
}

fn min_fn(args: &[Value]) -> Result<Value, Error> {
    check_arity_at_least("min", args, 1)?;
    let mut best = extract_number("min", &args[0])?;
    for arg in &args[1..] {
        let n = extract_number("min", arg)?;
        if n < best {
            best = n;
        }
    }
    Ok(Value::Number(best))
}

fn max_fn(args: &[Value]) -> Result<Value, Error> {
    check_arity_at_least("max", args, 1)?;
    let mut best = extract_number("max", &args[0])?;
    for arg in &args[1..] {
        let n = extract_number("max", arg)?;
        if n > best {
            best = n;
        }
    }
    Ok(Value::Number(best))
}

// ============================================================================
// Boolean Combinators
// ============================================================================

// Library procedures, so eager: their operands are already evaluated by the
// time they run. Short-circuiting belongs to `if` alone.

fn and_fn(args: &[Value]) -> Result<Value, Error> {
    for arg in args {
        if !arg.is_truthy() {
            return Ok(arg.clone());
        }
    }
    Ok(args.last().cloned().unwrap_or(Value::Bool(true)))
}

fn or_fn(args: &[Value]) -> Result<Value, Error> {
    for arg in args {
        if arg.is_truthy() {
            return Ok(arg.clone());
        }
    }
    Ok(Value::Bool(false))
}

fn not_fn(args: &[Value]) -> Result<Value, Error> {
    check_arity_exact("not", args, 1)?;
    Ok(Value::Bool(!args[0].is_truthy()))
}

// ============================================================================
// Errors
// ============================================================================

/// Raise a user-triggered failure carrying the rendered arguments.
fn error_fn(args: &[Value]) -> Result<Value, Error> {
    let message = args
        .iter()
        .map(|arg| match arg {
            // Strings render without quotes in an error message
            Value::Str(s) => s.to_string(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    Err(Error::User { message })
}

// ============================================================================
// Registration
// ============================================================================

/// Install the built-in library into `env`. Called once against the global
/// frame at startup.
pub fn register_stdlib(env: &Environment) {
    let define = |name: &str, func: NativeFn| {
        env.define(Symbol::intern(name), Value::Native(func));
    };

    // Arithmetic
    define("+", add);
    define("-", sub);
    define("*", mul);
    define("/", div);

    // Comparison
    define(">", gt);
    define("<", lt);
    define(">=", gte);
    define("<=", lte);
    define("=", num_eq);

    // List primitives
    define("car", car);
    define("cdr", cdr);
    define("cons", cons_fn);
    define("list", list_fn);
    define("length", length);
    define("null?", is_null);
    define("list?", is_list);
    define("map", map_fn);
    define("append", append);

    // Type predicates
    define("number?", is_number);
    define("symbol?", is_symbol);
    define("procedure?", is_procedure);
    define("string?", is_string);

    // String utilities
    define("string-append", string_append);
    define("string-length", string_length);
    define("substring", substring);
    define("string->symbol", string_to_symbol);

    // Numeric functions
    define("sin", sin);
    define("cos", cos);
    define("tan", tan);
    define("asin", asin);
    define("acos", acos);
    define("atan", atan);
    define("exp", exp);
    define("log", log);
    define("sqrt", sqrt);
    define("floor", floor);
    define("ceiling", ceiling);
    define("round", round);
    define("abs", abs);
    define("modulo", modulo);
    define("min", min_fn);
    define("max", max_fn);

    // Boolean combinators
    define("and", and_fn);
    define("or", or_fn);
    define("not", not_fn);

    // Failure
    define("error", error_fn);
}
