//! The parser walks the token sequence once, left to right, and builds the
//! whitespace-preserving node tree.
//!
//! Cursor state is explicit: the token vector plus an index, the `current`
//! node new children attach to, and the `latest` node trailing whitespace
//! attaches to. Block recursion restores both by walking the parent link on
//! exit, so nesting depth is unbounded.

use crate::ast::node::NodeKind;
use crate::ast::tokens::{Position, Token, TokenKind};
use crate::ast::tree::{NodeId, SassTree};
use crate::lexer::{self, LexError};
use thiserror::Error;

/// Fatal parse failures. The whole parse aborts; no partial tree is
/// returned and there is no resynchronization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected {kind} at {line}:{column}{}", .expected.map(|e| format!(", expected {e}")).unwrap_or_default())]
    UnexpectedToken {
        kind: TokenKind,
        line: usize,
        column: usize,
        expected: Option<&'static str>,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },
}

/// Parse one SCSS source string into its tree.
pub fn parse(source: &str) -> Result<SassTree, ParseError> {
    Parser::new(lexer::tokenize(source)?).parse()
}

/// Single-use tree builder over a token sequence.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    tree: SassTree,
    /// The node new children attach to.
    current: NodeId,
    /// The most recently attached node; trailing whitespace lands here.
    latest: NodeId,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let tree = SassTree::new();
        let root = tree.root();
        Parser {
            tokens,
            pos: 0,
            tree,
            current: root,
            latest: root,
        }
    }

    /// Consume every token and return the finished tree.
    pub fn parse(mut self) -> Result<SassTree, ParseError> {
        while let Some(token) = self.next_token() {
            self.parse_token(&token)?;
        }
        Ok(self.tree)
    }

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Step the cursor back one token, handing it to the caller's caller.
    fn prev_token(&mut self) {
        self.pos -= 1;
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Dispatch one token in statement position.
    fn parse_token(&mut self, token: &Token) -> Result<(), ParseError> {
        match token.kind {
            // Trivia accumulates on the last attached node rather than
            // replacing, so contiguous runs are all kept.
            TokenKind::Whitespace => {
                self.tree.get_mut(self.latest).after.push_str(&token.lexeme);
            }

            TokenKind::At => self.parse_at_rule(token)?,

            // Selector/declaration starters.
            TokenKind::Period
            | TokenKind::Dollar
            | TokenKind::Hash
            | TokenKind::Word
            | TokenKind::Dash
            | TokenKind::OpenBracket
            | TokenKind::Asterisk
            | TokenKind::Percent => self.parse_statement(token)?,

            TokenKind::MultilineComment | TokenKind::Comment => {
                let comment = NodeKind::Comment {
                    content: token.lexeme.clone(),
                    multiline: token.kind == TokenKind::MultilineComment,
                };
                self.latest = self.tree.attach(self.current, comment, token.position());
            }

            // Anything else becomes a raw leaf so the text is not lost. A
            // stray `{` in statement position lands here too: blocks only
            // open from a statement or at-rule.
            _ => {
                let leaf = NodeKind::Token {
                    lexeme: token.lexeme.clone(),
                };
                self.latest = self.tree.attach(self.current, leaf, token.position());
            }
        }

        Ok(())
    }

    /// Parse an at-rule: the `@keyword`, its prelude text, and either a
    /// nested block, a nested at-rule, or a `;` terminator.
    fn parse_at_rule(&mut self, at: &Token) -> Result<(), ParseError> {
        let rule = NodeKind::AtRule {
            rule: at.lexeme.clone(),
            value: String::new(),
        };
        let at_rule = self.tree.attach(self.current, rule, at.position());
        self.latest = at_rule;

        let mut value = String::new();

        while let Some(token) = self.next_token() {
            match token.kind {
                TokenKind::OpenCurly => {
                    self.set_at_rule_value(at_rule, value);
                    self.current = at_rule;
                    self.parse_block(&token)?;
                    self.exit_to_parent_of(at_rule);
                    return Ok(());
                }

                TokenKind::Semicolon => {
                    self.set_at_rule_value(at_rule, value);
                    self.tree.get_mut(at_rule).after.push(';');
                    self.latest = at_rule;
                    return Ok(());
                }

                // A further `@` before any block nests an at-rule directly
                // under this one.
                TokenKind::At => {
                    self.set_at_rule_value(at_rule, value);
                    self.current = at_rule;
                    self.parse_at_rule(&token)?;
                    self.exit_to_parent_of(at_rule);
                    return Ok(());
                }

                TokenKind::Hash if self.peek().is_some_and(|t| t.kind == TokenKind::OpenCurly) => {
                    self.read_interpolation(&mut value)?;
                }

                TokenKind::Whitespace
                | TokenKind::String
                | TokenKind::Hash
                | TokenKind::Dollar
                | TokenKind::Percent
                | TokenKind::Dash
                | TokenKind::Underscore
                | TokenKind::Plus
                | TokenKind::Period
                | TokenKind::Colon
                | TokenKind::Comma
                | TokenKind::Word
                | TokenKind::OpenParen
                | TokenKind::CloseParen => value.push_str(&token.lexeme),

                kind => {
                    let position = token.position();
                    return Err(ParseError::UnexpectedToken {
                        kind,
                        line: position.line,
                        column: position.column,
                        expected: Some("'{' or ';'"),
                    });
                }
            }
        }

        // Input ended mid-prelude; keep the at-rule, unterminated.
        self.set_at_rule_value(at_rule, value);
        Ok(())
    }

    fn set_at_rule_value(&mut self, id: NodeId, text: String) {
        if let NodeKind::AtRule { value, .. } = &mut self.tree.get_mut(id).kind {
            *value = text;
        }
    }

    /// Parse a statement: accumulate raw text until it resolves into a
    /// ruleset (at `{`) or a declaration (at `;`, or cut short by `}`/EOF).
    fn parse_statement(&mut self, first: &Token) -> Result<(), ParseError> {
        let start = first.position();
        let mut text = String::new();
        self.accumulate(first, &mut text)?;

        while let Some(token) = self.next_token() {
            match token.kind {
                TokenKind::OpenCurly => {
                    let ruleset = NodeKind::Ruleset { selector: text };
                    let ruleset = self.tree.attach(self.current, ruleset, start);
                    self.current = ruleset;
                    self.parse_block(&token)?;
                    self.exit_to_parent_of(ruleset);
                    return Ok(());
                }

                TokenKind::Semicolon => {
                    self.build_declaration(start, text, true);
                    return Ok(());
                }

                TokenKind::CloseCurly => {
                    // The statement's block ended without a semicolon: keep
                    // the declaration unterminated and let the enclosing
                    // block consume the brace.
                    self.prev_token();
                    if !text.is_empty() {
                        self.build_declaration(start, text, false);
                    }
                    return Ok(());
                }

                _ => self.accumulate(&token, &mut text)?,
            }
        }

        if !text.is_empty() {
            self.build_declaration(start, text, false);
        }
        Ok(())
    }

    /// Append one token's text, folding `#{...}` interpolation spans in as
    /// literal text.
    fn accumulate(&mut self, token: &Token, text: &mut String) -> Result<(), ParseError> {
        if token.kind == TokenKind::Hash
            && self.peek().is_some_and(|t| t.kind == TokenKind::OpenCurly)
        {
            self.read_interpolation(text)
        } else {
            text.push_str(&token.lexeme);
            Ok(())
        }
    }

    /// Read a `#{...}` span as literal text. One nesting level only: the
    /// first `}` closes the interpolation.
    fn read_interpolation(&mut self, text: &mut String) -> Result<(), ParseError> {
        text.push('#');

        while let Some(token) = self.next_token() {
            text.push_str(&token.lexeme);
            if token.kind == TokenKind::CloseCurly {
                return Ok(());
            }
        }

        Err(ParseError::UnexpectedEof {
            expected: "'}' closing interpolation",
        })
    }

    /// Split accumulated statement text at the first `:` and attach the
    /// declaration. A terminated declaration starts its `after` text with
    /// the `;` that closed it.
    fn build_declaration(&mut self, start: Position, text: String, terminated: bool) {
        let (property, value, colon) = match text.find(':') {
            Some(i) => (text[..i].to_string(), text[i + 1..].to_string(), true),
            None => (text, String::new(), false),
        };

        let declaration = NodeKind::Declaration {
            property,
            value,
            colon,
            terminated,
        };
        let id = self.tree.attach(self.current, declaration, start);
        if terminated {
            self.tree.get_mut(id).after.push(';');
        }
        self.latest = id;
    }

    /// Parse a `{ ... }` block under the current parent. On `}` the cursor
    /// pops back by walking the parent link; `current` and `latest` both
    /// land on the block's parent so trailing whitespace attaches there.
    fn parse_block(&mut self, open: &Token) -> Result<(), ParseError> {
        let block = self.tree.attach(self.current, NodeKind::Block, open.position());
        self.current = block;
        self.latest = block;

        while let Some(token) = self.next_token() {
            match token.kind {
                TokenKind::CloseCurly => break,
                TokenKind::OpenCurly => self.parse_block(&token)?,
                _ => self.parse_token(&token)?,
            }
        }

        let parent = self.tree.parent(block).unwrap_or_else(|| self.tree.root());
        self.current = parent;
        self.latest = parent;
        Ok(())
    }

    /// Restore `current`/`latest` to the parent of `id`. Only the root has
    /// no parent, and the root is never exited.
    fn exit_to_parent_of(&mut self, id: NodeId) {
        let parent = self.tree.parent(id).unwrap_or_else(|| self.tree.root());
        self.current = parent;
        self.latest = id;
    }
}
