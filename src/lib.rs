//! Lexer, Pratt parser and tree-walking evaluator for Lox expressions.

pub mod driver;
pub mod lox_frontend;
pub mod treewalk_interpreter;
