//! CLI support for sasstree
//!
//! Provides programmatic access to the CLI functionality for embedding in
//! other tools (linters, editor plugins).

use crate::ast::tokens::SourceLocation;
use crate::{LexError, ParseError};
use std::fmt::Write as _;
use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Tokenizer error
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),
    /// Parser error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No input provided
    #[error("No input provided. Pass a file or pipe SCSS to stdin.")]
    NoInput,
}

/// Options for the parse command
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// The SCSS source to parse
    pub source: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't print the tree
    pub syntax_only: bool,
}

/// Result of a parse operation
#[derive(Debug)]
pub enum ParseResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Parse succeeded with JSON output
    Tree(String),
}

/// Parse SCSS source and shape it for the command line.
pub fn execute_parse(options: &ParseOptions) -> Result<ParseResult, CliError> {
    let tree = crate::parse(&options.source)?;

    if options.syntax_only {
        return Ok(ParseResult::SyntaxValid);
    }

    let json = if options.pretty {
        crate::to_json_pretty(&tree)
    } else {
        crate::to_json(&tree)
    };
    Ok(ParseResult::Tree(json))
}

/// Tokenize SCSS source and format the token stream, one token per line.
pub fn execute_tokens(source: &str) -> Result<String, CliError> {
    let tokens = crate::tokenize(source)?;

    let mut out = String::new();
    for token in &tokens {
        let location = match token.source {
            SourceLocation::Position(pos) => format!("{}:{}", pos.line, pos.column),
            SourceLocation::Span(span) => format!(
                "{}:{}-{}:{}",
                span.start.line, span.start.column, span.end.line, span.end.column
            ),
        };
        let _ = writeln!(out, "{location}\t{}\t{:?}", token.kind, token.lexeme);
    }
    Ok(out)
}
