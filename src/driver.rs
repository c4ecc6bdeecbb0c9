use std::fs;
use std::io;
use std::io::Write;
use std::process;

use anyhow::Context;
use thiserror::Error;

use crate::ast_printer;
use crate::parser::Parser;
use crate::scanner::Scanner;
use crate::token::Token;

#[derive(Clone, Debug, Error)]
pub enum SyntaxError {
    #[error("[line {line}] Error: {message}")]
    Scan { line: usize, message: String },
    #[error("[line {}] Error {}: {}", .token.line, .token.location(), .message)]
    Parse { token: Token, message: String },
}

/// Runs sources through the scan/parse/print pipeline and tracks whether
/// any of them failed, for the process exit code.
pub struct Driver {
    pub had_error: bool,
}

impl Driver {
    pub fn new() -> Self {
        Driver { had_error: false }
    }

    /// Treats the whole file as a single expression.
    pub fn run_file(&mut self, path: &String) -> anyhow::Result<()> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path))?
            .into_bytes();
        self.run(contents);
        if self.had_error {
            process::exit(65);
        }
        Ok(())
    }

    /// One expression per line; an empty line exits.
    pub fn run_prompt(&mut self) -> anyhow::Result<()> {
        println!("expression printer");
        loop {
            print!("> ");
            io::stdout().flush().context("flushing prompt")?;
            let mut line = String::new();
            io::stdin()
                .read_line(&mut line)
                .context("reading from stdin")?;
            if line.trim().is_empty() {
                println!("Exit");
                break;
            }
            self.run(line.into_bytes());
            self.had_error = false;
        }
        Ok(())
    }

    fn run(&mut self, source: Vec<u8>) {
        let mut scanner = Scanner::new(source);
        if let Err(err) = scanner.scan_tokens() {
            self.error(err);
            return;
        }

        let tokens = scanner.tokens;
        let mut parser = Parser::new(self, tokens);
        match parser.parse() {
            Ok(expr) => println!("{}", ast_printer::print(&expr)),
            Err(err) => self.error(err),
        }
    }

    pub fn error(&mut self, err: SyntaxError) {
        eprintln!("{}", err);
        self.had_error = true;
    }
}
