use std::fmt;
use std::sync::Arc;

use crate::environment::Environment;
use crate::error::Error;
use crate::interner::Symbol;
use crate::numeric::Number;

// ============================================================================
// Core Type System
// ============================================================================

/// Native procedure: the representation of every built-in.
pub type NativeFn = fn(&[Value]) -> Result<Value, Error>;

/// A user-defined procedure: formal parameters, one unevaluated body
/// expression, and the defining environment captured by reference.
#[derive(Clone)]
pub struct LambdaCell {
    pub params: Vec<Symbol>,
    pub body: Value,
    pub env: Environment,
}

// Manual impls since Environment holds an RwLock
impl fmt::Debug for LambdaCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaCell")
            .field("params", &self.params)
            .field("body", &self.body)
            .field("env", &"<environment>")
            .finish()
    }
}

impl PartialEq for LambdaCell {
    fn eq(&self, other: &Self) -> bool {
        // Compare params and body only; two closures over different frames
        // would otherwise never compare equal.
        self.params == other.params && self.body == other.body
    }
}

/// A runtime value. Also the AST: the reader produces `Value`s and the
/// evaluator walks them, which is what makes the language homoiconic.
#[derive(Clone, Debug)]
pub enum Value {
    Number(Number),
    Symbol(Symbol),
    Str(Arc<str>),
    Bool(bool),
    /// Immutable-after-construction ordered sequence; the empty list doubles
    /// as the unit-like "no value" result.
    List(Arc<[Value]>),
    Lambda(Arc<LambdaCell>),
    Native(NativeFn),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(items.into())
    }

    /// The unit-like result: an empty list.
    pub fn unit() -> Value {
        Value::list(Vec::new())
    }

    /// Only `#f` is false; every other value, including `0` and the empty
    /// list, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(Number::Float(x))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Lambda(a), Value::Lambda(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

fn escape_string(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            c => result.push(c),
        }
    }
    result
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Str(s) => write!(f, "\"{}\"", escape_string(s)),
            Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Lambda(_) => write!(f, "<lambda>"),
            Value::Native(_) => write!(f, "<native-fn>"),
            Value::List(items) => {
                // (quote X) renders with its reader sugar
                if let [Value::Symbol(head), quoted] = items.as_ref()
                    && head.with_str(|name| name == "quote")
                {
                    return write!(f, "'{quoted}");
                }
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}
