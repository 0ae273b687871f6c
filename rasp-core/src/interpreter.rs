//! The recursive evaluator.
//!
//! `eval` dispatches on value shape with one exhaustive match: atoms are
//! self-evaluating, symbols are looked up, and non-empty lists are either a
//! special form (dispatched on the head symbol) or a procedure application.
//! Evaluation is synchronous and purely recursive; depth is bounded by the
//! host stack.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::environment::Environment;
use crate::error::Error;
use crate::interner::Symbol;
use crate::language::{LambdaCell, Value};
use crate::parser::parse_program;

// Special-form head symbols, interned once so dispatch is a key compare.
static SYM_QUOTE: Lazy<Symbol> = Lazy::new(|| Symbol::intern("quote"));
static SYM_DEFINE: Lazy<Symbol> = Lazy::new(|| Symbol::intern("define"));
static SYM_LAMBDA: Lazy<Symbol> = Lazy::new(|| Symbol::intern("lambda"));
static SYM_IF: Lazy<Symbol> = Lazy::new(|| Symbol::intern("if"));

/// Evaluate one expression against `env`.
pub fn eval(expr: &Value, env: &Environment) -> Result<Value, Error> {
    match expr {
        // Self-evaluating forms
        Value::Number(_)
        | Value::Str(_)
        | Value::Bool(_)
        | Value::Lambda(_)
        | Value::Native(_) => Ok(expr.clone()),

        // Symbol lookup
        Value::Symbol(name) => env.lookup(*name).ok_or_else(|| Error::UnboundSymbol {
            name: name.resolve(),
        }),

        Value::List(items) => {
            let Some((head, rest)) = items.split_first() else {
                // () evaluates to itself
                return Ok(expr.clone());
            };

            if let Value::Symbol(name) = head {
                if *name == *SYM_QUOTE {
                    return eval_quote(rest);
                }
                if *name == *SYM_DEFINE {
                    return eval_define(rest, env);
                }
                if *name == *SYM_LAMBDA {
                    return eval_lambda(rest, env);
                }
                if *name == *SYM_IF {
                    return eval_if(rest, env);
                }
            }

            // Procedure application: head first, then arguments left-to-right
            let callee = eval(head, env)?;
            let mut args = Vec::with_capacity(rest.len());
            for item in rest {
                args.push(eval(item, env)?);
            }
            apply(&callee, &args)
        }
    }
}

// ============================================================================
// Special Forms
// ============================================================================

fn eval_quote(rest: &[Value]) -> Result<Value, Error> {
    match rest {
        [quoted] => Ok(quoted.clone()),
        _ => Err(Error::malformed(
            "quote",
            format!("expected 1 sub-form, got {}", rest.len()),
        )),
    }
}

fn eval_define(rest: &[Value], env: &Environment) -> Result<Value, Error> {
    let [name_expr, value_expr] = rest else {
        return Err(Error::malformed(
            "define",
            format!("expected a name and a value, got {} sub-forms", rest.len()),
        ));
    };
    let Value::Symbol(name) = name_expr else {
        return Err(Error::malformed(
            "define",
            format!("name must be a symbol, got {name_expr}"),
        ));
    };

    let value = eval(value_expr, env)?;
    env.define(*name, value.clone());
    Ok(value)
}

fn eval_lambda(rest: &[Value], env: &Environment) -> Result<Value, Error> {
    let [params_expr, body] = rest else {
        return Err(Error::malformed(
            "lambda",
            format!(
                "expected a parameter list and one body expression, got {} sub-forms",
                rest.len()
            ),
        ));
    };
    let Value::List(params_list) = params_expr else {
        return Err(Error::malformed(
            "lambda",
            format!("parameters must be a list, got {params_expr}"),
        ));
    };

    let mut params = Vec::with_capacity(params_list.len());
    for param in params_list.iter() {
        match param {
            Value::Symbol(name) => params.push(*name),
            other => {
                return Err(Error::malformed(
                    "lambda",
                    format!("parameter must be a symbol, got {other}"),
                ));
            }
        }
    }

    Ok(Value::Lambda(Arc::new(LambdaCell {
        params,
        body: body.clone(),
        env: env.clone(),
    })))
}

fn eval_if(rest: &[Value], env: &Environment) -> Result<Value, Error> {
    let (condition, then_branch, else_branch) = match rest {
        [c, t] => (c, t, None),
        [c, t, e] => (c, t, Some(e)),
        _ => {
            return Err(Error::malformed(
                "if",
                format!(
                    "expected a condition, a then-branch, and an optional else-branch, got {} sub-forms",
                    rest.len()
                ),
            ));
        }
    };

    // Only the taken branch is ever evaluated
    if eval(condition, env)?.is_truthy() {
        eval(then_branch, env)
    } else {
        match else_branch {
            Some(expr) => eval(expr, env),
            None => Ok(Value::unit()),
        }
    }
}

// ============================================================================
// Application
// ============================================================================

/// Invoke a callable with already-evaluated arguments.
///
/// A closure call extends the closure's captured frame, not the caller's:
/// that is the whole of lexical scoping here.
pub fn apply(callable: &Value, args: &[Value]) -> Result<Value, Error> {
    match callable {
        Value::Lambda(lambda) => {
            let frame = lambda.env.extend(&lambda.params, args);
            eval(&lambda.body, &frame)
        }
        Value::Native(func) => func(args),
        other => Err(Error::runtime(format!(
            "cannot apply non-procedure: {other}"
        ))),
    }
}

/// Evaluate a whole source unit against `env`, threading the shared global
/// frame through every top-level form and returning the value of the last
/// one (the empty list for empty input). The first error stops the run.
pub fn eval_program(source: &str, env: &Environment) -> Result<Value, Error> {
    let mut result = Value::unit();
    for form in parse_program(source)? {
        result = eval(&form, env)?;
    }
    Ok(result)
}
