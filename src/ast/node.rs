//! AST node variants.
//!
//! Nodes form a closed set discriminated by [`NodeKind`], a single tagged
//! union rather than a class-style hierarchy. Shared fields (source
//! position, trailing text, child list, parent link) live on [`Node`];
//! per-variant payloads live on the kind.

use crate::ast::tokens::Position;
use crate::ast::tree::NodeId;

/// Per-variant payload of an AST node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The single tree root. Carries no source position and no parent.
    DocumentRoot,

    /// A selector plus its block, e.g. `p { ... }`.
    Ruleset {
        /// Raw accumulated selector text, whitespace included, up to `{`.
        selector: String,
    },

    /// The `{ ... }` child context of a ruleset or at-rule.
    Block,

    /// A `property: value` pair inside a block.
    Declaration {
        property: String,
        value: String,
        /// Whether a `:` separated property from value. False only for
        /// statement text with no colon at all; kept so reconstruction can
        /// tell `color:` apart from a bare `color`.
        colon: bool,
        /// Whether a `;` terminated the declaration. A statement cut short
        /// by its block's `}` is kept but left unterminated.
        terminated: bool,
    },

    /// A `@`-prefixed directive with its prelude text and, via `children`,
    /// an optional nested block or nested at-rule.
    AtRule {
        /// The keyword including the `@`, e.g. `@media`.
        rule: String,
        /// Raw accumulated prelude text before `{` or `;`.
        value: String,
    },

    /// A `//` or `/* ... */` comment.
    Comment {
        content: String,
        multiline: bool,
    },

    /// Fallback leaf wrapping a token that no grammar rule claimed.
    Token {
        lexeme: String,
    },
}

impl NodeKind {
    pub fn kind(&self) -> Kind {
        match self {
            NodeKind::DocumentRoot => Kind::DocumentRoot,
            NodeKind::Ruleset { .. } => Kind::Ruleset,
            NodeKind::Block => Kind::Block,
            NodeKind::Declaration { .. } => Kind::Declaration,
            NodeKind::AtRule { .. } => Kind::AtRule,
            NodeKind::Comment { .. } => Kind::Comment,
            NodeKind::Token { .. } => Kind::Token,
        }
    }
}

/// Fieldless discriminant for filtering nodes by variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    DocumentRoot,
    Ruleset,
    Block,
    Declaration,
    AtRule,
    Comment,
    Token,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::DocumentRoot => "DocumentRoot",
            Kind::Ruleset => "Ruleset",
            Kind::Block => "Block",
            Kind::Declaration => "Declaration",
            Kind::AtRule => "AtRule",
            Kind::Comment => "Comment",
            Kind::Token => "Token",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of the tree.
///
/// Nodes are created by the parser exactly once, attached to their parent at
/// creation time, and never moved. The `parent` index is a non-owning
/// back-link for upward traversal; serialization omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Source position of the token that opened the node; `None` only for
    /// the root.
    pub source: Option<Position>,
    /// Literal text immediately following the node: whitespace runs and,
    /// for terminated statements, the `;` itself. Concatenating node content
    /// with `after` in document order reproduces the source.
    pub after: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, source: Option<Position>) -> Self {
        Node {
            kind,
            source,
            after: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind.kind()
    }
}
