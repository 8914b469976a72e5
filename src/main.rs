use clap::{Parser, Subcommand};
use lox_exprs::driver::{run_stage, Stage};

use std::path::PathBuf;
use std::{fs, io, process};

#[derive(Parser)]
#[clap(name = "lox_exprs", version, about = "Scan, parse and evaluate a Lox expression")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one line per token.
    Tokenize { filename: PathBuf },
    /// Print the parenthesized syntax tree of the expression.
    Parse { filename: PathBuf },
    /// Print the value of the expression.
    Evaluate { filename: PathBuf },
}

impl Command {
    fn split(&self) -> (Stage, &PathBuf) {
        match self {
            Command::Tokenize { filename } => (Stage::Tokenize, filename),
            Command::Parse { filename } => (Stage::Parse, filename),
            Command::Evaluate { filename } => (Stage::Evaluate, filename),
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let (stage, filename) = cli.command.split();

    let source = match fs::read(filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file {}: {}", filename.display(), e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let code = match run_stage(stage, &source, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            1
        }
    };

    process::exit(code);
}

/// Logs go to stderr and only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
