use anyhow::{Result, anyhow, bail};

use crate::ast::{Expr, LiteralValue, Program, Stmt};
use crate::lexer::token::{Literal, Token, TokenKind};

pub mod ast;

/// Recursive-descent parser over the lexer's token stream.
///
/// Precedence, lowest to highest: assignment (right-associative), addition,
/// multiplication, unary prefix, postfix, call/member chain, primary.
/// Compound assignment and `++`/`--` never reach the tree; both desugar to
/// `Assign`/`Set` around a synthetic `Binary` node.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map(|token| token.line).unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, "", None, line));
        }
        Self { tokens, current: 0 }
    }

    pub fn parse_program(mut self) -> Result<Program> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            match self.declaration() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    // Recover to a statement boundary, then surface the
                    // first error; parsing halts there.
                    self.synchronize();
                    return Err(error);
                }
            }
        }
        Ok(Program { statements })
    }

    fn declaration(&mut self) -> Result<Stmt> {
        if self.matches(&[TokenKind::Func]) {
            return self.function_declaration();
        }
        if self.matches(&[TokenKind::Var]) {
            return self.var_declaration();
        }
        self.statement()
    }

    fn function_declaration(&mut self) -> Result<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expected function name.")?;
        self.consume(TokenKind::LeftParen, "Expected '(' after function name.")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.consume(TokenKind::Identifier, "Expected parameter name.")?);
                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expected ')' after parameters.")?;

        let mut body = Vec::new();
        while !self.check(TokenKind::End) && !self.is_at_end() {
            body.push(self.declaration()?);
        }
        self.consume(TokenKind::End, "Expected 'end' after function body.")?;

        Ok(Stmt::Function { name, params, body })
    }

    fn var_declaration(&mut self) -> Result<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expected variable name.")?;
        let initializer = if self.matches(&[TokenKind::Equal]) {
            self.expression()?
        } else {
            Expr::Literal(LiteralValue::Null)
        };
        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> Result<Stmt> {
        if self.matches(&[TokenKind::Print]) {
            return self.print_statement();
        }
        if self.matches(&[TokenKind::Return]) {
            return self.return_statement();
        }
        Ok(Stmt::Expression(self.expression()?))
    }

    fn print_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenKind::LeftParen, "Expected '(' after 'print'.")?;
        let expression = self.expression()?;
        self.consume(TokenKind::RightParen, "Expected ')' after expression.")?;
        Ok(Stmt::Print(expression))
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        let keyword = self.previous().clone();
        let value = if self.check(TokenKind::End) {
            None
        } else {
            Some(self.expression()?)
        };
        Ok(Stmt::Return { keyword, value })
    }

    fn expression(&mut self) -> Result<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr> {
        let expr = self.addition()?;

        if self.matches(&[
            TokenKind::Equal,
            TokenKind::PlusEqual,
            TokenKind::MinusEqual,
        ]) {
            let operator = self.previous().clone();
            let value = self.assignment()?;
            return desugar_assignment(expr, &operator, value);
        }

        Ok(expr)
    }

    fn addition(&mut self) -> Result<Expr> {
        let mut expr = self.multiplication()?;
        while self.matches(&[TokenKind::Plus, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.multiplication()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn multiplication(&mut self) -> Result<Expr> {
        let mut expr = self.unary()?;
        while self.matches(&[TokenKind::Multiply, TokenKind::Divide]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.matches(&[TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }
        if self.matches(&[TokenKind::PlusPlus]) {
            let target = self.unary()?;
            return desugar_step(target, TokenKind::Plus, "+", "Invalid increment target.");
        }
        if self.matches(&[TokenKind::MinusMinus]) {
            let target = self.unary()?;
            return desugar_step(target, TokenKind::Minus, "-", "Invalid decrement target.");
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Result<Expr> {
        let expr = self.call()?;
        if self.matches(&[TokenKind::PlusPlus]) {
            return desugar_step(expr, TokenKind::Plus, "+", "Invalid increment target.");
        }
        if self.matches(&[TokenKind::MinusMinus]) {
            return desugar_step(expr, TokenKind::Minus, "-", "Invalid decrement target.");
        }
        Ok(expr)
    }

    fn call(&mut self) -> Result<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.matches(&[TokenKind::LeftParen]) {
                expr = self.finish_call(expr)?;
            } else if self.matches(&[TokenKind::Dot]) {
                let name = self.consume(TokenKind::Identifier, "Expected property name after '.'.")?;
                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.expression()?);
                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        let paren = self.consume(TokenKind::RightParen, "Expected ')' after arguments.")?;
        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            args,
        })
    }

    fn primary(&mut self) -> Result<Expr> {
        if self.matches(&[TokenKind::Number]) {
            let token = self.previous();
            let value = match token.literal {
                Some(Literal::Number(value)) => value,
                _ => bail!("Number token '{}' is missing its decoded value", token.lexeme),
            };
            return Ok(Expr::Literal(LiteralValue::Number(value)));
        }
        if self.matches(&[TokenKind::String]) {
            let token = self.previous();
            let value = match &token.literal {
                Some(Literal::Str(value)) => value.clone(),
                _ => bail!("String token '{}' is missing its decoded value", token.lexeme),
            };
            return Ok(Expr::Literal(LiteralValue::Str(value)));
        }
        if self.matches(&[TokenKind::True]) {
            return Ok(Expr::Literal(LiteralValue::Bool(true)));
        }
        if self.matches(&[TokenKind::False]) {
            return Ok(Expr::Literal(LiteralValue::Bool(false)));
        }
        if self.matches(&[TokenKind::Identifier]) {
            return Ok(Expr::Variable {
                name: self.previous().clone(),
            });
        }
        if self.matches(&[TokenKind::LeftParen]) {
            let expr = self.expression()?;
            self.consume(TokenKind::RightParen, "Expected ')' after expression.")?;
            return Ok(expr);
        }
        Err(anyhow!("Unexpected token: {}", self.peek().lexeme))
    }

    /// Discard tokens up to the next likely statement boundary.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Eof {
                return;
            }
            match self.peek().kind {
                TokenKind::Var | TokenKind::Print | TokenKind::Func | TokenKind::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(*kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        Err(anyhow!("{message} Got {}", self.peek().lexeme))
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }
}

/// Lower `target op= value` (or plain `=`) onto the two legal L-value
/// shapes. Compound forms wrap the value in a synthetic `Binary` that
/// re-reads the target.
fn desugar_assignment(target: Expr, operator: &Token, value: Expr) -> Result<Expr> {
    let step = match operator.kind {
        TokenKind::PlusEqual => Some((TokenKind::Plus, "+")),
        TokenKind::MinusEqual => Some((TokenKind::Minus, "-")),
        _ => None,
    };
    let value = match step {
        Some((kind, lexeme)) => Expr::Binary {
            left: Box::new(target.clone()),
            operator: Token::synthetic(kind, lexeme),
            right: Box::new(value),
        },
        None => value,
    };
    match target {
        Expr::Variable { name } => Ok(Expr::Assign {
            name,
            value: Box::new(value),
        }),
        Expr::Get { object, name } => Ok(Expr::Set {
            object,
            name,
            value: Box::new(value),
        }),
        _ => Err(anyhow!("Invalid assignment target.")),
    }
}

/// Lower `++x`, `x++`, `--x`, `x--` to `x = x op 1`. Prefix and postfix
/// forms produce the same tree.
fn desugar_step(target: Expr, kind: TokenKind, lexeme: &str, message: &str) -> Result<Expr> {
    match target {
        Expr::Variable { name } => Ok(Expr::Assign {
            name: name.clone(),
            value: Box::new(Expr::Binary {
                left: Box::new(Expr::Variable { name }),
                operator: Token::synthetic(kind, lexeme),
                right: Box::new(Expr::Literal(LiteralValue::Number(1.0))),
            }),
        }),
        _ => Err(anyhow!("{message}")),
    }
}

pub fn parse_tokens(tokens: Vec<Token>) -> Result<Program> {
    Parser::new(tokens).parse_program()
}
