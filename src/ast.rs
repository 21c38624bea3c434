//! # sasstree - Abstract Syntax Tree
//!
//! This module defines the data model shared by the tokenizer and parser:
//! lexical tokens with source positions, and the whitespace-preserving node
//! tree the parser builds from them.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens, token kinds, and the character tables
//! - **[node]** - Node variants (ruleset, block, declaration, at-rule, ...)
//! - **[tree]** - The arena-backed tree with traversal helpers
//!
//! ## Core Concepts
//!
//! ### Lossless by construction
//!
//! Every character of the input survives into the tree: selectors and
//! values keep their whitespace, comments become nodes, and trailing
//! whitespace is recorded on the preceding node's `after` field. Walking
//! the tree in document order and concatenating text reproduces the source.
//!
//! ### Arena addressing
//!
//! Nodes reference each other by [`NodeId`] index into the owning
//! [`SassTree`], with `parent` as an optional index. Upward navigation is
//! O(1) and serialization simply skips the parent link, so no reference
//! cycles ever exist.
//!
//! ## Examples
//!
//! ```
//! use sasstree::{parse, Kind};
//!
//! let tree = parse("p { color: red; }").unwrap();
//! let declarations = tree.find(Kind::Declaration);
//! assert_eq!(declarations.len(), 1);
//! ```
pub mod tokens;
pub mod node;
pub mod tree;

pub use tokens::{Position, SourceLocation, Span, Token, TokenKind};
pub use node::{Kind, Node, NodeKind};
pub use tree::{NodeId, SassTree};
