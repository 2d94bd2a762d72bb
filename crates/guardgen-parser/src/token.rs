//! Token and source span types shared by the lexer and parser.

use serde::Serialize;

/// A region of source text with its starting line and column.
///
/// `start` and `end` are byte offsets into the source, suitable for
/// slicing and for diagnostic label ranges. `line` and `column` are
/// 1-based and describe where the region begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character.
    pub column: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A lexical token of the declaration subset.
///
/// The lexer recognizes just enough of the source language to parse
/// `interface` and `type` declarations and to skip over the constructs
/// the parser models as opaque: import statements, object type
/// literals, tuples, function types, and generic argument lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    /// `export`
    Export,
    /// `interface`
    Interface,
    /// `type`
    Type,
    /// `import`
    Import,
    /// `from`
    From,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    // Identifiers and literals
    /// An identifier, including type-level keywords like `number` and
    /// `undefined` which the parser classifies by name.
    Identifier(String),
    /// A single- or double-quoted string literal, unescaped.
    StringLiteral(String),
    /// A numeric literal.
    NumberLiteral(f64),

    // Punctuation
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `|`
    Pipe,
    /// `&`
    Amp,
    /// `?`
    Question,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `=`
    Equal,
    /// `.`
    Dot,
    /// `*`
    Star,
    /// `=>`
    Arrow,

    /// End of input.
    Eof,
}

impl Token {
    /// True for tokens that may start a top-level declaration.
    pub fn starts_declaration(&self) -> bool {
        matches!(
            self,
            Token::Export | Token::Interface | Token::Type | Token::Import
        )
    }
}
