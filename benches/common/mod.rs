#![allow(dead_code)]
use std::fs;

use spritescript::ast::Program;
use spritescript::{lexer, parser};

pub const WORKLOADS: [(&str, &str); 2] = [
    ("full", "tests/programs/full_script/program.sps"),
    ("events", "tests/programs/event_handlers/program.sps"),
];

pub fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

pub fn load_program(path: &str) -> Program {
    let source = load_source(path);
    let tokens = lexer::tokenize(&source).unwrap_or_else(|err| panic!("tokenize {path}: {err}"));
    parser::parse_tokens(tokens).unwrap_or_else(|err| panic!("parse {path}: {err}"))
}
