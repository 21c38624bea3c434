pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;

pub use ast::{Kind, Node, NodeId, NodeKind, Position, SassTree, SourceLocation, Span, Token, TokenKind};
pub use lexer::{LexError, Tokenizer, tokenize};
pub use output::{to_json, to_json_pretty, to_scss, tree_to_value};
pub use parser::{ParseError, Parser, parse};
