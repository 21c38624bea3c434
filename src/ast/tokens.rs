//! Lexical tokens and the character tables the tokenizer dispatches on.
//!
//! Tokenization works by comparing characters against the constants in
//! [`chars`] rather than running regexes over the input; a single forward
//! pass with code-point comparison is far cheaper and keeps the lexer
//! allocation-free until a token is actually emitted.

/// Significant source characters, grouped the way the tokenizer uses them.
pub mod chars {
    // Whitespace
    pub const SPACE: char = ' ';
    pub const NEWLINE: char = '\n';
    pub const TAB: char = '\t';
    pub const CARRIAGE_RETURN: char = '\r';
    pub const FORM_FEED: char = '\u{c}';

    // Brackets
    pub const OPEN_BRACKET: char = '[';
    pub const CLOSE_BRACKET: char = ']';
    pub const OPEN_CURLY: char = '{';
    pub const CLOSE_CURLY: char = '}';
    pub const OPEN_PAREN: char = '(';
    pub const CLOSE_PAREN: char = ')';

    // Quotes
    pub const SINGLE_QUOTE: char = '\'';
    pub const DOUBLE_QUOTE: char = '"';

    // Separators
    pub const COLON: char = ':';
    pub const COMMA: char = ',';
    pub const SEMICOLON: char = ';';

    // Symbols
    pub const AMPERSAND: char = '&';
    pub const ASTERISK: char = '*';
    pub const AT: char = '@';
    pub const BANG: char = '!';
    pub const DASH: char = '-';
    pub const DOLLAR: char = '$';
    pub const EQUALS: char = '=';
    pub const EXPONENT: char = '^';
    pub const FORWARD_SLASH: char = '/';
    pub const GREATER_THAN: char = '>';
    pub const HASH: char = '#';
    pub const PERCENT: char = '%';
    pub const PERIOD: char = '.';
    pub const PLUS: char = '+';
    pub const TILDE: char = '~';
    pub const UNDERSCORE: char = '_';

    // IE hack
    pub const BACKSLASH: char = '\\';
    pub const NINE: char = '9';

    /// Whitespace class used for maximal-run scanning.
    pub fn is_whitespace(ch: char) -> bool {
        matches!(ch, SPACE | NEWLINE | TAB | CARRIAGE_RETURN | FORM_FEED)
    }
}

/// The lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A maximal run of whitespace characters (spaces, tabs, newlines).
    Whitespace,

    // Single-character punctuation, one kind per character.
    Colon,
    Semicolon,
    Comma,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    Ampersand,
    Exponent,
    Dash,
    Bang,
    Dollar,
    Percent,
    Hash,
    Plus,
    Tilde,
    Equals,
    GreaterThan,
    Period,
    Asterisk,
    Underscore,

    /// A quoted string, including both quote characters.
    String,

    /// An at-rule keyword including the `@`, e.g. `@media`.
    At,

    /// A `//` line comment, up to but not including the newline.
    Comment,

    /// A `/* ... */` block comment; the only kind whose source is a span.
    MultilineComment,

    /// A `/` that did not begin a comment.
    ForwardSlash,

    /// The `\9` legacy IE hint.
    Hack,

    /// A maximal run of letters or of digits.
    Word,

    /// A character outside every recognized class. Emitted rather than
    /// dropped so that concatenating lexemes reproduces the input exactly.
    Unknown,
}

impl TokenKind {
    /// Display name used in diagnostics, matching the historical tag names.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::Exponent => "EXPONENT",
            TokenKind::Dash => "DASH",
            TokenKind::Bang => "BANG",
            TokenKind::Dollar => "DOLLAR",
            TokenKind::Percent => "PERCENT",
            TokenKind::Hash => "HASH",
            TokenKind::Plus => "PLUS",
            TokenKind::Tilde => "TILDE",
            TokenKind::Equals => "EQUALS",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::Period => "PERIOD",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Underscore => "UNDERSCORE",
            TokenKind::String => "STRING",
            TokenKind::At => "AT",
            TokenKind::Comment => "COMMENT",
            TokenKind::MultilineComment => "MULTILINE_COMMENT",
            TokenKind::ForwardSlash => "FORWARD_SLASH",
            TokenKind::Hack => "HACK",
            TokenKind::Word => "WORD",
            TokenKind::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Single-character punctuation dispatch table.
///
/// Returns the token kind for characters that lex as exactly one token of
/// one character, or `None` for everything that needs a longer scan.
pub fn punctuation_kind(ch: char) -> Option<TokenKind> {
    use self::chars::*;

    let kind = match ch {
        COLON => TokenKind::Colon,
        SEMICOLON => TokenKind::Semicolon,
        COMMA => TokenKind::Comma,
        OPEN_BRACKET => TokenKind::OpenBracket,
        CLOSE_BRACKET => TokenKind::CloseBracket,
        OPEN_CURLY => TokenKind::OpenCurly,
        CLOSE_CURLY => TokenKind::CloseCurly,
        OPEN_PAREN => TokenKind::OpenParen,
        CLOSE_PAREN => TokenKind::CloseParen,
        AMPERSAND => TokenKind::Ampersand,
        EXPONENT => TokenKind::Exponent,
        DASH => TokenKind::Dash,
        BANG => TokenKind::Bang,
        DOLLAR => TokenKind::Dollar,
        PERCENT => TokenKind::Percent,
        HASH => TokenKind::Hash,
        PLUS => TokenKind::Plus,
        TILDE => TokenKind::Tilde,
        EQUALS => TokenKind::Equals,
        GREATER_THAN => TokenKind::GreaterThan,
        PERIOD => TokenKind::Period,
        ASTERISK => TokenKind::Asterisk,
        UNDERSCORE => TokenKind::Underscore,
        _ => return None,
    };

    Some(kind)
}

/// A line/column pair. Lines are 1-based; columns count characters from the
/// start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Start and end positions of a token that may cross lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Where a token came from. Block comments carry a full span; every other
/// token is located by its starting position alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLocation {
    Position(Position),
    Span(Span),
}

impl SourceLocation {
    /// The position the token begins at.
    pub fn start(&self) -> Position {
        match self {
            SourceLocation::Position(pos) => *pos,
            SourceLocation::Span(span) => span.start,
        }
    }
}

/// A classified lexical unit with the literal source text it was cut from.
///
/// Tokens are immutable once produced; the parser only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub source: SourceLocation,
}

impl Token {
    pub fn position(&self) -> Position {
        self.source.start()
    }
}
