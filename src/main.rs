use clap::{Parser as ClapParser, Subcommand};
use sasstree::cli::{self, CliError, ParseOptions, ParseResult};
use std::fs;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sasstree")]
#[command(about = "sasstree - Parse SCSS into a whitespace-preserving AST")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse SCSS and print the tree as JSON
    Parse {
        /// SCSS file to parse (reads from stdin if not provided)
        file: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the tree
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the token stream, one token per line
    Tokens {
        /// SCSS file to tokenize (reads from stdin if not provided)
        file: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            file,
            pretty,
            syntax_only,
        } => run_parse(file, pretty, syntax_only),
        Commands::Tokens { file } => run_tokens(file),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_source(file: Option<String>) -> Result<String, CliError> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_parse(file: Option<String>, pretty: bool, syntax_only: bool) -> Result<(), CliError> {
    let options = ParseOptions {
        source: read_source(file)?,
        pretty,
        syntax_only,
    };

    match cli::execute_parse(&options)? {
        ParseResult::SyntaxValid => println!("Syntax is valid"),
        ParseResult::Tree(json) => println!("{}", json),
    }
    Ok(())
}

fn run_tokens(file: Option<String>) -> Result<(), CliError> {
    let source = read_source(file)?;
    print!("{}", cli::execute_tokens(&source)?);
    Ok(())
}
