//! Runs one pipeline stage over a source buffer, writing program output and
//! diagnostics to the given sinks and returning the process exit code.

use crate::lox_frontend::{Lexer, Parser, ParserError};
use crate::treewalk_interpreter::Interpreter;

use std::io::{self, Write};

/// Lexical or syntax errors in the input.
pub const EXIT_DATA_ERR: i32 = 65;
/// Runtime type errors.
pub const EXIT_SOFTWARE: i32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Tokenize,
    Parse,
    Evaluate,
}

pub fn run_stage<O, E>(stage: Stage, source: &[u8], out: &mut O, err: &mut E) -> io::Result<i32>
where
    O: Write,
    E: Write,
{
    match stage {
        Stage::Tokenize => tokenize(source, out, err),
        Stage::Parse => parse(source, out, err),
        Stage::Evaluate => evaluate(source, out, err),
    }
}

fn tokenize(source: &[u8], out: &mut impl Write, err: &mut impl Write) -> io::Result<i32> {
    let (tokens, errors) = Lexer::new(source).tokenize();

    for error in errors.iter() {
        writeln!(err, "{}", error)?;
    }
    for token in tokens.iter() {
        writeln!(out, "{}", token)?;
    }

    Ok(if errors.is_empty() { 0 } else { EXIT_DATA_ERR })
}

fn parse(source: &[u8], out: &mut impl Write, err: &mut impl Write) -> io::Result<i32> {
    match Parser::new(source).parse() {
        Ok(expr) => {
            writeln!(out, "{}", expr)?;
            Ok(0)
        }
        Err(errors) => report_parser_errors(&errors, err),
    }
}

fn evaluate(source: &[u8], out: &mut impl Write, err: &mut impl Write) -> io::Result<i32> {
    let expr = match Parser::new(source).parse() {
        Ok(expr) => expr,
        Err(errors) => return report_parser_errors(&errors, err),
    };

    match Interpreter::new().evaluate(&expr) {
        Ok(value) => {
            writeln!(out, "{}", value)?;
            Ok(0)
        }
        Err(errors) => {
            for error in errors.iter() {
                writeln!(err, "{}\n[line {}]", error, error.line)?;
            }
            Ok(EXIT_SOFTWARE)
        }
    }
}

fn report_parser_errors(errors: &[ParserError], err: &mut impl Write) -> io::Result<i32> {
    for error in errors.iter() {
        writeln!(err, "{}", error)?;
    }
    Ok(EXIT_DATA_ERR)
}
