//! The tokenizer breaks SCSS input into a sequence of tokens for the parser.
//!
//! One forward pass, dispatching on character codes against the tables in
//! [`crate::ast::tokens`]. Positions are tracked as a 1-based line plus the
//! index of the current line's start, so a column is always `pos - offset`.

use crate::ast::tokens::{
    Position, SourceLocation, Span, Token, TokenKind, chars, punctuation_kind,
};
use thiserror::Error;

/// Fatal lexical errors. Both abort tokenization with no token list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated quote starting at {line}:{column}")]
    UnterminatedString { line: usize, column: usize },

    #[error("unterminated block comment starting at {line}:{column}")]
    UnterminatedComment { line: usize, column: usize },
}

/// Single-use scanner state. Build one per call to [`Tokenizer::tokenize`];
/// the free [`tokenize`] function does exactly that.
pub struct Tokenizer {
    input: Vec<char>,
    tokens: Vec<Token>,
    /// Offset from the beginning of the input, in characters.
    pos: usize,
    /// Index of the first character of the current line.
    offset: usize,
    /// 1-based line number.
    line: usize,
}

/// Tokenize one SCSS source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(source).tokenize()
}

impl Tokenizer {
    pub fn new(source: &str) -> Self {
        // Remove a UTF byte order mark before scanning.
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);

        Tokenizer {
            input: source.chars().collect(),
            tokens: Vec::new(),
            pos: 0,
            offset: 0,
            line: 1,
        }
    }

    /// Consume the input and return its tokens.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.current_char() {
            if chars::is_whitespace(ch) {
                self.tokenize_whitespace();
            } else if let Some(kind) = punctuation_kind(ch) {
                self.push_character_token(kind, ch);
                self.pos += 1;
            } else {
                match ch {
                    chars::SINGLE_QUOTE | chars::DOUBLE_QUOTE => self.tokenize_string(ch)?,
                    chars::AT => self.tokenize_at_keyword(),
                    chars::FORWARD_SLASH => match self.peek_char(1) {
                        Some(chars::ASTERISK) => self.tokenize_multiline_comment()?,
                        Some(chars::FORWARD_SLASH) => self.tokenize_comment(),
                        _ => {
                            self.push_character_token(TokenKind::ForwardSlash, ch);
                            self.pos += 1;
                        }
                    },
                    chars::BACKSLASH if self.peek_char(1) == Some(chars::NINE) => {
                        self.push_token(TokenKind::Hack, "\\9".to_string(), self.position());
                        self.pos += 2;
                    }
                    c if c.is_ascii_alphabetic() => self.tokenize_word(char::is_ascii_alphabetic),
                    c if c.is_ascii_digit() => self.tokenize_word(char::is_ascii_digit),
                    // Outside every recognized class: emit rather than drop,
                    // so no input text is ever lost.
                    c => {
                        self.push_character_token(TokenKind::Unknown, c);
                        self.pos += 1;
                    }
                }
            }
        }

        Ok(self.tokens)
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_char(&self, ahead: usize) -> Option<char> {
        self.input.get(self.pos + ahead).copied()
    }

    /// Position of the character at `pos`.
    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.pos - self.offset,
        }
    }

    /// Record a newline found at absolute index `at`.
    fn newline_at(&mut self, at: usize) {
        self.line += 1;
        self.offset = at + 1;
    }

    fn push_token(&mut self, kind: TokenKind, lexeme: String, start: Position) {
        self.tokens.push(Token {
            kind,
            lexeme,
            source: SourceLocation::Position(start),
        });
    }

    fn push_character_token(&mut self, kind: TokenKind, ch: char) {
        self.push_token(kind, ch.to_string(), self.position());
    }

    fn slice(&self, from: usize, to: usize) -> String {
        self.input[from..to].iter().collect()
    }

    /// Consume a maximal whitespace run into one token.
    fn tokenize_whitespace(&mut self) {
        let start = self.position();
        let from = self.pos;

        while let Some(ch) = self.current_char() {
            if !chars::is_whitespace(ch) {
                break;
            }
            if ch == chars::NEWLINE {
                self.newline_at(self.pos);
            }
            self.pos += 1;
        }

        let lexeme = self.slice(from, self.pos);
        self.push_token(TokenKind::Whitespace, lexeme, start);
    }

    /// Whether the character at `at` is escaped, i.e. preceded by an odd
    /// number of consecutive backslashes.
    fn is_escaped(&self, at: usize) -> bool {
        let mut backslashes = 0;
        while backslashes < at && self.input[at - 1 - backslashes] == chars::BACKSLASH {
            backslashes += 1;
        }
        backslashes % 2 == 1
    }

    /// Consume a quoted string, quotes included, honoring backslash escapes.
    fn tokenize_string(&mut self, quote: char) -> Result<(), LexError> {
        let start = self.position();
        let from = self.pos;
        let mut next = self.pos + 1;

        loop {
            match self.input.get(next).copied() {
                None => {
                    return Err(LexError::UnterminatedString {
                        line: start.line,
                        column: start.column,
                    });
                }
                Some(chars::NEWLINE) => self.newline_at(next),
                Some(ch) if ch == quote && !self.is_escaped(next) => break,
                Some(_) => {}
            }
            next += 1;
        }

        let lexeme = self.slice(from, next + 1);
        self.push_token(TokenKind::String, lexeme, start);
        self.pos = next + 1;
        Ok(())
    }

    /// Consume `@` plus its keyword, stopping at whitespace, `(`, `{` or `;`.
    fn tokenize_at_keyword(&mut self) {
        let start = self.position();
        let from = self.pos;
        let mut next = self.pos + 1;

        while let Some(ch) = self.input.get(next).copied() {
            if chars::is_whitespace(ch)
                || ch == chars::OPEN_PAREN
                || ch == chars::OPEN_CURLY
                || ch == chars::SEMICOLON
            {
                break;
            }
            next += 1;
        }

        let lexeme = self.slice(from, next);
        self.push_token(TokenKind::At, lexeme, start);
        self.pos = next;
    }

    /// Consume a `/* ... */` comment, tracking embedded newlines. The token
    /// carries a full span because it may cross lines.
    fn tokenize_multiline_comment(&mut self) -> Result<(), LexError> {
        let start = self.position();
        let from = self.pos;
        let mut next = self.pos + 2;

        loop {
            match self.input.get(next).copied() {
                None => {
                    return Err(LexError::UnterminatedComment {
                        line: start.line,
                        column: start.column,
                    });
                }
                Some(chars::ASTERISK)
                    if self.input.get(next + 1).copied() == Some(chars::FORWARD_SLASH) =>
                {
                    break;
                }
                Some(chars::NEWLINE) => self.newline_at(next),
                Some(_) => {}
            }
            next += 1;
        }

        // next points at the '*' of the closing '*/'.
        let to = next + 2;
        let end = Position {
            line: self.line,
            column: (to - 1) - self.offset,
        };
        self.tokens.push(Token {
            kind: TokenKind::MultilineComment,
            lexeme: self.slice(from, to),
            source: SourceLocation::Span(Span { start, end }),
        });
        self.pos = to;
        Ok(())
    }

    /// Consume a `//` comment up to (not including) the next newline.
    fn tokenize_comment(&mut self) {
        let start = self.position();
        let from = self.pos;
        let mut next = self.pos + 2;

        while let Some(&ch) = self.input.get(next) {
            if ch == chars::NEWLINE {
                break;
            }
            next += 1;
        }

        let lexeme = self.slice(from, next);
        self.push_token(TokenKind::Comment, lexeme, start);
        self.pos = next;
    }

    /// Consume a maximal run of one character class into a `Word` token.
    fn tokenize_word(&mut self, in_class: impl Fn(&char) -> bool) {
        let start = self.position();
        let from = self.pos;

        while let Some(ch) = self.current_char() {
            if !in_class(&ch) {
                break;
            }
            self.pos += 1;
        }

        let lexeme = self.slice(from, self.pos);
        self.push_token(TokenKind::Word, lexeme, start);
    }
}

#[test]
fn test_simple_declaration_tokens() {
    let tokens = tokenize("color: red;").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Word,
            TokenKind::Colon,
            TokenKind::Whitespace,
            TokenKind::Word,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_line_and_column_tracking() {
    let tokens = tokenize("a\n  b").unwrap();
    assert_eq!(tokens[0].position(), Position { line: 1, column: 0 });
    assert_eq!(tokens[1].position(), Position { line: 1, column: 1 });
    assert_eq!(tokens[2].position(), Position { line: 2, column: 2 });
}
