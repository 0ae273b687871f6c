use crate::error::Error;
use crate::numeric::Number;

// ============================================================================
// Lexer
// ============================================================================

/// Char-cursor tokenizer. Strips whitespace and line comments and emits a
/// flat token sequence with no location information.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> char {
        if self.position < self.input.len() {
            self.input[self.position]
        } else {
            '\0'
        }
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        loop {
            while !self.is_eof() && self.current_char().is_whitespace() {
                self.advance();
            }

            // Comments run from semicolon to end of line
            if self.current_char() == ';' {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while !self.is_eof() && self.current_char() != '\n' {
            self.advance();
        }
        if self.current_char() == '\n' {
            self.advance();
        }
    }

    // ========================================================================
    // String Parsing
    // ========================================================================

    fn read_string(&mut self) -> Result<Token, Error> {
        // Opening quote already seen by the caller
        self.advance();
        let mut content = String::new();

        while self.current_char() != '"' && !self.is_eof() {
            if self.current_char() == '\\' {
                self.advance();
                content.push(self.read_escape()?);
            } else {
                content.push(self.current_char());
                self.advance();
            }
        }

        if self.is_eof() {
            return Err(Error::syntax("unterminated string literal"));
        }

        self.advance();
        Ok(Token::Str(content))
    }

    fn read_escape(&mut self) -> Result<char, Error> {
        let c = self.current_char();
        self.advance();

        match c {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '\\' => Ok('\\'),
            '"' => Ok('"'),
            '\'' => Ok('\''),
            _ => Err(Error::syntax(format!("unknown escape sequence: \\{c}"))),
        }
    }

    // ========================================================================
    // Atom Parsing
    // ========================================================================

    fn read_atom(&mut self) -> Token {
        let mut text = String::new();

        while !self.is_eof() && !is_delimiter(self.current_char()) {
            text.push(self.current_char());
            self.advance();
        }

        classify_atom(text)
    }

    // ========================================================================
    // Main Tokenization
    // ========================================================================

    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_whitespace();

        if self.is_eof() {
            return Ok(Token::Eof);
        }

        match self.current_char() {
            '(' => {
                self.advance();
                Ok(Token::LParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RParen)
            }
            '\'' => {
                self.advance();
                Ok(Token::Quote)
            }
            '"' => self.read_string(),
            _ => Ok(self.read_atom()),
        }
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '\'' | '"' | ';')
}

/// Numbers become numbers (integer parse first, then float); every other
/// atom is symbol text.
fn classify_atom(text: String) -> Token {
    if let Ok(n) = text.parse::<i64>() {
        Token::Number(Number::Int(n))
    } else if let Ok(x) = text.parse::<f64>() {
        Token::Number(Number::Float(x))
    } else {
        Token::Symbol(text)
    }
}

/// Tokenize a whole source unit into the flat token sequence the reader
/// consumes.
pub fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::Eof => return Ok(tokens),
            token => tokens.push(token),
        }
    }
}

// ============================================================================
// Token Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Quote,
    Symbol(String),
    Number(Number),
    Str(String),
    Eof,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_parens_and_atoms() {
        let tokens = tokenize("(+ 1 2)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Symbol("+".to_string()),
                Token::Number(Number::Int(1)),
                Token::Number(Number::Int(2)),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn integer_parse_wins_over_float() {
        assert_eq!(tokenize("42").unwrap(), vec![Token::Number(Number::Int(42))]);
        assert_eq!(
            tokenize("42.5").unwrap(),
            vec![Token::Number(Number::Float(42.5))]
        );
        assert_eq!(
            tokenize("-3").unwrap(),
            vec![Token::Number(Number::Int(-3))]
        );
    }

    #[test]
    fn comments_are_stripped() {
        let tokens = tokenize("1 ; the rest of this line vanishes\n2").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(Number::Int(1)), Token::Number(Number::Int(2))]
        );
    }

    #[test]
    fn quote_marker_is_its_own_token() {
        let tokens = tokenize("'x").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Quote, Token::Symbol("x".to_string())]
        );
    }

    #[test]
    fn string_escapes_are_processed() {
        let tokens = tokenize(r#""a\nb""#).unwrap();
        assert_eq!(tokens, vec![Token::Str("a\nb".to_string())]);
    }

    #[test]
    fn unterminated_string_is_a_syntax_error() {
        assert!(matches!(
            tokenize(r#""oops"#),
            Err(Error::Syntax { .. })
        ));
    }
}
