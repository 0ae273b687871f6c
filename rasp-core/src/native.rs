//! Helpers shared by the native procedures in the standard library.

use crate::error::Error;
use crate::interner::Symbol;
use crate::language::Value;
use crate::numeric::Number;

// ============================================================================
// Argument Checking
// ============================================================================

pub fn check_arity_exact(name: &str, args: &[Value], expected: usize) -> Result<(), Error> {
    if args.len() != expected {
        return Err(Error::runtime(format!(
            "{name}: expected {expected} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}

pub fn check_arity_at_least(name: &str, args: &[Value], min: usize) -> Result<(), Error> {
    if args.len() < min {
        return Err(Error::runtime(format!(
            "{name}: expected at least {min} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}

// ============================================================================
// Value Extraction
// ============================================================================

pub fn extract_number(name: &str, value: &Value) -> Result<Number, Error> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(Error::runtime(format!(
            "{name}: expected number, got {other}"
        ))),
    }
}

pub fn extract_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, Error> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(Error::runtime(format!(
            "{name}: expected string, got {other}"
        ))),
    }
}

pub fn extract_list<'a>(name: &str, value: &'a Value) -> Result<&'a [Value], Error> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(Error::runtime(format!(
            "{name}: expected list, got {other}"
        ))),
    }
}

pub fn extract_symbol(name: &str, value: &Value) -> Result<Symbol, Error> {
    match value {
        Value::Symbol(s) => Ok(*s),
        other => Err(Error::runtime(format!(
            "{name}: expected symbol, got {other}"
        ))),
    }
}

/// Extract a non-negative integer index.
pub fn extract_index(name: &str, value: &Value) -> Result<usize, Error> {
    match value {
        Value::Number(Number::Int(n)) if *n >= 0 => Ok(*n as usize),
        other => Err(Error::runtime(format!(
            "{name}: expected non-negative integer, got {other}"
        ))),
    }
}
