use std::fmt;

/// Everything that can go wrong between source text and a final value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The reader hit malformed input: unbalanced parentheses, a truncated
    /// form, or a bad string literal.
    Syntax {
        /// Details about what the reader saw.
        message: String,
    },
    /// A symbol was looked up and no frame in the chain binds it.
    UnboundSymbol {
        /// The name that failed to resolve.
        name: String,
    },
    /// A special form was written with the wrong shape or arity.
    MalformedForm {
        /// The special form in question.
        form: &'static str,
        /// What was wrong with its shape.
        message: String,
    },
    /// An operation was applied to operands it cannot handle: wrong types,
    /// wrong argument counts, division by zero, integer overflow.
    Runtime {
        /// Details about the failing operation.
        message: String,
    },
    /// The `error` primitive was invoked from Lisp code.
    User {
        /// The message supplied by the caller.
        message: String,
    },
}

impl Error {
    pub fn syntax(message: impl Into<String>) -> Self {
        Error::Syntax {
            message: message.into(),
        }
    }

    pub fn malformed(form: &'static str, message: impl Into<String>) -> Self {
        Error::MalformedForm {
            form,
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Error::Runtime {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax { message } => write!(f, "syntax error: {message}"),
            Error::UnboundSymbol { name } => write!(f, "unbound symbol: {name}"),
            Error::MalformedForm { form, message } => write!(f, "malformed {form}: {message}"),
            Error::Runtime { message } => write!(f, "{message}"),
            Error::User { message } => write!(f, "error: {message}"),
        }
    }
}

impl std::error::Error for Error {}
