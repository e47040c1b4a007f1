//! `spritescript` library crate.
//!
//! High-level layout:
//! - frontend: `lexer` + `parser` produce the shared AST (`parser::ast`)
//! - backend: `transpiler` walks the AST and emits TypeScript source text
//! - `fixtures`: on-disk test case loader shared by the integration harness
//!   and the benchmarks
pub mod fixtures;
pub mod lexer;
pub mod parser;
pub mod transpiler;

pub use parser::ast;

use anyhow::Result;

/// Translate SpriteScript source into TypeScript source text.
pub fn transpile(source: &str) -> Result<String> {
    let tokens = lexer::tokenize(source)?;
    let program = parser::parse_tokens(tokens)?;
    let mut transpiler = transpiler::Transpiler;
    transpiler.transpile(&program)
}
