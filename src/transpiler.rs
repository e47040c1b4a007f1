use anyhow::{Result, bail};

use crate::ast::{Expr, ExprVisitor, LiteralValue, Program, Stmt, StmtVisitor};
use crate::lexer::token::{Token, TokenKind};

/// Function names reserved for the host's event registration API. A `func`
/// with one of these names is emitted as a call registering an arrow
/// function instead of a top-level `function` declaration.
const EVENT_HANDLERS: [&str; 3] = ["_forever", "_on_collision", "_on_clone_start"];

/// Walks the AST and emits TypeScript source text.
///
/// Emission is purely structural except for two rewrites: reserved
/// event-handler names become host API calls, and `return` expressions that
/// evaluate to a compile-time constant are replaced by the folded value.
pub struct Transpiler;

impl Transpiler {
    pub fn transpile(&mut self, program: &Program) -> Result<String> {
        let mut lines = Vec::with_capacity(program.statements.len());
        for statement in &program.statements {
            lines.push(self.emit_statement(statement)?);
        }
        Ok(lines.join("\n"))
    }

    fn emit_statement(&mut self, statement: &Stmt) -> Result<String> {
        statement.accept(self)
    }

    fn emit_expression(&mut self, expr: &Expr) -> Result<String> {
        expr.accept(self)
    }
}

impl StmtVisitor<Result<String>> for Transpiler {
    fn visit_var(&mut self, name: &Token, initializer: &Expr) -> Result<String> {
        Ok(format!(
            "let {}: any = {};",
            name.lexeme,
            self.emit_expression(initializer)?
        ))
    }

    fn visit_expression(&mut self, expression: &Expr) -> Result<String> {
        Ok(format!("{};", self.emit_expression(expression)?))
    }

    fn visit_print(&mut self, expression: &Expr) -> Result<String> {
        Ok(format!("console.log({});", self.emit_expression(expression)?))
    }

    fn visit_function(&mut self, name: &Token, params: &[Token], body: &[Stmt]) -> Result<String> {
        let params_text = params
            .iter()
            .map(|param| format!("{}: any", param.lexeme))
            .collect::<Vec<_>>()
            .join(", ");
        let mut body_lines = Vec::with_capacity(body.len());
        for statement in body {
            body_lines.push(format!("  {}", self.emit_statement(statement)?));
        }
        let body_text = body_lines.join("\n");

        if EVENT_HANDLERS.contains(&name.lexeme.as_str()) {
            let stripped = name.lexeme.strip_prefix('_').unwrap_or(&name.lexeme);
            let handler = camel_case(stripped);
            Ok(format!("{handler}(({params_text}) => {{\n{body_text}\n}})"))
        } else {
            Ok(format!(
                "function {}({params_text}) {{\n{body_text}\n}}",
                name.lexeme
            ))
        }
    }

    fn visit_return(&mut self, _keyword: &Token, value: Option<&Expr>) -> Result<String> {
        let Some(value) = value else {
            return Ok("return;".to_string());
        };
        if let Some(folded) = evaluate_constant(value) {
            return Ok(format!("return {};", render_constant(&folded)));
        }
        Ok(format!("return {};", self.emit_expression(value)?))
    }
}

impl ExprVisitor<Result<String>> for Transpiler {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<String> {
        let symbol = match operator.kind {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            _ => bail!("Unknown binary operator: {}", operator.lexeme),
        };
        Ok(format!(
            "({} {} {})",
            self.emit_expression(left)?,
            symbol,
            self.emit_expression(right)?
        ))
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> Result<String> {
        if operator.kind != TokenKind::Minus {
            bail!("Unknown unary operator: {}", operator.lexeme);
        }
        Ok(format!("(-{})", self.emit_expression(right)?))
    }

    fn visit_literal(&mut self, value: &LiteralValue) -> Result<String> {
        Ok(match value {
            LiteralValue::Null => "null".to_string(),
            LiteralValue::Number(number) => format!("{number}"),
            // Embedded quotes and backslashes pass through unescaped.
            LiteralValue::Str(text) => format!("\"{text}\""),
            LiteralValue::Bool(flag) => flag.to_string(),
        })
    }

    fn visit_variable(&mut self, name: &Token) -> Result<String> {
        Ok(name.lexeme.clone())
    }

    fn visit_call(&mut self, callee: &Expr, _paren: &Token, args: &[Expr]) -> Result<String> {
        let mut rendered_args = Vec::with_capacity(args.len());
        for arg in args {
            rendered_args.push(self.emit_expression(arg)?);
        }
        Ok(format!(
            "{}({})",
            self.emit_expression(callee)?,
            rendered_args.join(", ")
        ))
    }

    fn visit_get(&mut self, object: &Expr, name: &Token) -> Result<String> {
        Ok(format!("{}.{}", self.emit_expression(object)?, name.lexeme))
    }

    fn visit_assign(&mut self, name: &Token, value: &Expr) -> Result<String> {
        Ok(format!("{} = {}", name.lexeme, self.emit_expression(value)?))
    }

    fn visit_set(&mut self, object: &Expr, name: &Token, value: &Expr) -> Result<String> {
        Ok(format!(
            "{}.{} = {}",
            self.emit_expression(object)?,
            name.lexeme,
            self.emit_expression(value)?
        ))
    }
}

/// Best-effort compile-time evaluation. `None` means "not a constant";
/// arithmetic only combines numbers, so any other operand shape poisons the
/// whole subtree. Division by zero is not special-cased and follows `f64`
/// semantics.
fn evaluate_constant(expr: &Expr) -> Option<LiteralValue> {
    match expr {
        Expr::Literal(LiteralValue::Null) => None,
        Expr::Literal(value) => Some(value.clone()),
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let (LiteralValue::Number(left), LiteralValue::Number(right)) =
                (evaluate_constant(left)?, evaluate_constant(right)?)
            else {
                return None;
            };
            let result = match operator.kind {
                TokenKind::Plus => left + right,
                TokenKind::Minus => left - right,
                TokenKind::Multiply => left * right,
                TokenKind::Divide => left / right,
                _ => return None,
            };
            Some(LiteralValue::Number(result))
        }
        Expr::Unary { operator, right } => {
            if operator.kind != TokenKind::Minus {
                return None;
            }
            match evaluate_constant(right)? {
                LiteralValue::Number(number) => Some(LiteralValue::Number(-number)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Textual form of a folded value. Strings render raw, without quotes,
/// matching how the folded value is spliced into the `return` line.
fn render_constant(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Number(number) => format!("{number}"),
        LiteralValue::Str(text) => text.clone(),
        LiteralValue::Bool(flag) => flag.to_string(),
        LiteralValue::Null => "null".to_string(),
    }
}

/// Lowercase the input, split on runs of spaces, hyphens, and underscores,
/// then capitalize the first letter of every word after the first.
fn camel_case(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut words = lowered
        .split(|ch: char| ch == ' ' || ch == '-' || ch == '_')
        .filter(|word| !word.is_empty());
    let Some(first) = words.next() else {
        return String::new();
    };
    let mut output = String::from(first);
    for word in words {
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            output.extend(head.to_uppercase());
            output.push_str(chars.as_str());
        }
    }
    output
}
