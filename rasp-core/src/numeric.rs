use std::cmp::Ordering;
use std::fmt;

use crate::error::Error;

// ============================================================================
// Numeric Type
// ============================================================================

/// The one canonical numeric representation: an exact integer or an IEEE 754
/// double. Literals are converted into `Number` at the lexer boundary and
/// never circulate as bare host primitives.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => {
                if x.is_nan() {
                    write!(f, "NaN")
                } else if x.is_infinite() {
                    write!(f, "{}", if *x > 0.0 { "+Inf" } else { "-Inf" })
                } else {
                    // {:?} keeps a decimal point or exponent, so a printed
                    // float always reads back as a float.
                    write!(f, "{x:?}")
                }
            }
        }
    }
}

// ============================================================================
// Equality and Comparison
// ============================================================================

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.to_f64() == other.to_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.partial_cmp(b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

// ============================================================================
// Arithmetic Operations
// ============================================================================

impl Number {
    /// Convert to f64 (may lose precision for large integers).
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(x) => *x,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(n) => *n == 0,
            Number::Float(x) => *x == 0.0,
        }
    }

    /// Addition; Int + Int stays exact, any Float operand promotes.
    pub fn add(&self, other: &Number) -> Result<Number, Error> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(*b)
                .map(Number::Int)
                .ok_or_else(|| Error::runtime("integer overflow in +")),
            _ => Ok(Number::Float(self.to_f64() + other.to_f64())),
        }
    }

    pub fn sub(&self, other: &Number) -> Result<Number, Error> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_sub(*b)
                .map(Number::Int)
                .ok_or_else(|| Error::runtime("integer overflow in -")),
            _ => Ok(Number::Float(self.to_f64() - other.to_f64())),
        }
    }

    pub fn mul(&self, other: &Number) -> Result<Number, Error> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_mul(*b)
                .map(Number::Int)
                .ok_or_else(|| Error::runtime("integer overflow in *")),
            _ => Ok(Number::Float(self.to_f64() * other.to_f64())),
        }
    }

    /// Division. Int / Int yields an Int when evenly divisible, otherwise a
    /// Float. A zero divisor of either shape is an error.
    pub fn div(&self, other: &Number) -> Result<Number, Error> {
        if other.is_zero() {
            return Err(Error::runtime("division by zero"));
        }
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_rem(*b) {
                Some(0) => a
                    .checked_div(*b)
                    .map(Number::Int)
                    .ok_or_else(|| Error::runtime("integer overflow in /")),
                Some(_) => Ok(Number::Float(*a as f64 / *b as f64)),
                None => Err(Error::runtime("integer overflow in /")),
            },
            _ => Ok(Number::Float(self.to_f64() / other.to_f64())),
        }
    }

    /// Negation, the single-operand meaning of `-`.
    pub fn neg(&self) -> Result<Number, Error> {
        match self {
            Number::Int(n) => n
                .checked_neg()
                .map(Number::Int)
                .ok_or_else(|| Error::runtime("integer overflow in -")),
            Number::Float(x) => Ok(Number::Float(-x)),
        }
    }

    /// Reciprocal, the single-operand meaning of `/`.
    pub fn recip(&self) -> Result<Number, Error> {
        Number::Int(1).div(self)
    }

    /// Floored remainder: the result takes the sign of the divisor.
    pub fn modulo(&self, other: &Number) -> Result<Number, Error> {
        if other.is_zero() {
            return Err(Error::runtime("modulo: division by zero"));
        }
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => {
                let r = a
                    .checked_rem(*b)
                    .ok_or_else(|| Error::runtime("integer overflow in modulo"))?;
                if r != 0 && (r < 0) != (*b < 0) {
                    Ok(Number::Int(r + b))
                } else {
                    Ok(Number::Int(r))
                }
            }
            _ => {
                let (x, y) = (self.to_f64(), other.to_f64());
                Ok(Number::Float(x - y * (x / y).floor()))
            }
        }
    }

    /// Largest integral value not above the number; Int passes through.
    pub fn floor(&self) -> Number {
        match self {
            Number::Int(n) => Number::Int(*n),
            Number::Float(x) => Number::Float(x.floor()),
        }
    }

    pub fn ceiling(&self) -> Number {
        match self {
            Number::Int(n) => Number::Int(*n),
            Number::Float(x) => Number::Float(x.ceil()),
        }
    }

    pub fn round(&self) -> Number {
        match self {
            Number::Int(n) => Number::Int(*n),
            Number::Float(x) => Number::Float(x.round()),
        }
    }

    pub fn abs(&self) -> Result<Number, Error> {
        match self {
            Number::Int(n) => n
                .checked_abs()
                .map(Number::Int)
                .ok_or_else(|| Error::runtime("integer overflow in abs")),
            Number::Float(x) => Ok(Number::Float(x.abs())),
        }
    }
}
