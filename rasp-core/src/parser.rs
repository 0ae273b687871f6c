use crate::error::Error;
use crate::interner::Symbol;
use crate::language::Value;
use crate::lexer::{Token, tokenize};

// ============================================================================
// Reader
// ============================================================================

/// Recursive-descent reader over an immutable token sequence with an
/// explicit cursor. Reading is all-or-nothing: a malformed form aborts the
/// whole parse and no partial AST escapes.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Read one expression from the cursor.
    pub fn read_expr(&mut self) -> Result<Value, Error> {
        match self.bump() {
            None | Some(Token::Eof) => Err(Error::syntax("unexpected end of input")),
            Some(Token::Number(n)) => Ok(Value::Number(n)),
            Some(Token::Str(s)) => Ok(Value::Str(s.into())),
            Some(Token::Symbol(name)) => Ok(match name.as_str() {
                "#t" => Value::Bool(true),
                "#f" => Value::Bool(false),
                _ => Value::Symbol(Symbol::intern(&name)),
            }),
            Some(Token::Quote) => {
                // 'X reads as (quote X)
                let quoted = self.read_expr()?;
                Ok(Value::list(vec![
                    Value::Symbol(Symbol::intern("quote")),
                    quoted,
                ]))
            }
            Some(Token::LParen) => {
                let mut items = Vec::new();
                loop {
                    match self.peek() {
                        None => return Err(Error::syntax("unexpected end of input")),
                        Some(Token::RParen) => {
                            self.bump();
                            return Ok(Value::list(items));
                        }
                        Some(_) => items.push(self.read_expr()?),
                    }
                }
            }
            Some(Token::RParen) => Err(Error::syntax("unexpected `)`")),
        }
    }
}

/// Read a single expression from source text.
pub fn parse(input: &str) -> Result<Value, Error> {
    Parser::new(tokenize(input)?).read_expr()
}

/// Read every top-level expression from one source unit, in order.
pub fn parse_program(input: &str) -> Result<Vec<Value>, Error> {
    let mut parser = Parser::new(tokenize(input)?);
    let mut forms = Vec::new();

    while !parser.is_exhausted() {
        forms.push(parser.read_expr()?);
    }

    Ok(forms)
}
