pub mod error;
pub mod token;

pub use error::{LexError, LexResult};
pub use token::{Literal, Token, TokenKind};

/// Single-pass scanner over SpriteScript source.
///
/// Whitespace and newlines only separate tokens; statement structure is
/// recovered entirely by the parser. `#` starts a comment that runs to the
/// end of the line.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
        }
    }

    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                }
                '#' => self.skip_comment(),
                '(' => tokens.push(self.single(TokenKind::LeftParen)),
                ')' => tokens.push(self.single(TokenKind::RightParen)),
                ',' => tokens.push(self.single(TokenKind::Comma)),
                '.' => tokens.push(self.single(TokenKind::Dot)),
                '*' => tokens.push(self.single(TokenKind::Multiply)),
                '/' => tokens.push(self.single(TokenKind::Divide)),
                '=' => tokens.push(self.single(TokenKind::Equal)),
                '+' => {
                    self.advance();
                    if self.match_char('+') {
                        tokens.push(Token::new(TokenKind::PlusPlus, "++", None, self.line));
                    } else if self.match_char('=') {
                        tokens.push(Token::new(TokenKind::PlusEqual, "+=", None, self.line));
                    } else {
                        tokens.push(Token::new(TokenKind::Plus, "+", None, self.line));
                    }
                }
                '-' => {
                    self.advance();
                    if self.match_char('-') {
                        tokens.push(Token::new(TokenKind::MinusMinus, "--", None, self.line));
                    } else if self.match_char('=') {
                        tokens.push(Token::new(TokenKind::MinusEqual, "-=", None, self.line));
                    } else {
                        tokens.push(Token::new(TokenKind::Minus, "-", None, self.line));
                    }
                }
                '"' => tokens.push(self.string()?),
                '0'..='9' => tokens.push(self.number()?),
                ch if ch.is_ascii_alphabetic() || ch == '_' => tokens.push(self.identifier()),
                other => {
                    return Err(LexError::UnexpectedCharacter {
                        character: other,
                        line: self.line,
                    });
                }
            }
        }
        tokens.push(Token::new(TokenKind::Eof, "", None, self.line));
        Ok(tokens)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.advance();
        Token::new(kind, &self.source[start..self.pos], None, self.line)
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn string(&mut self) -> LexResult<Token> {
        let opening_line = self.line;
        self.advance();
        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(LexError::UnterminatedString { line: opening_line });
                }
                Some('"') => {
                    let value = self.source[start..self.pos].to_string();
                    self.advance();
                    return Ok(Token::new(
                        TokenKind::String,
                        format!("\"{value}\""),
                        Some(Literal::Str(value)),
                        opening_line,
                    ));
                }
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn number(&mut self) -> LexResult<Token> {
        let start = self.pos;
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        if self.peek() == Some('.') && matches!(self.peek_next(), Some('0'..='9')) {
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }
        let lexeme = &self.source[start..self.pos];
        let value = lexeme
            .parse::<f64>()
            .map_err(|_| LexError::InvalidNumberLiteral {
                literal: lexeme.to_string(),
                line: self.line,
            })?;
        Ok(Token::new(
            TokenKind::Number,
            lexeme,
            Some(Literal::Number(value)),
            self.line,
        ))
    }

    fn identifier(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let lexeme = &self.source[start..self.pos];
        let kind = match lexeme {
            "var" => TokenKind::Var,
            "print" => TokenKind::Print,
            "func" => TokenKind::Func,
            "return" => TokenKind::Return,
            "end" => TokenKind::End,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Identifier,
        };
        Token::new(kind, lexeme, None, self.line)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }
}

pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}
