//! Guardgen Declaration Parser
//!
//! Lexer and parser for the declaration subset guardgen reads: a
//! module of `interface` and `type` declarations whose type
//! expressions are built from primitives, string literals, arrays,
//! unions, references, and parentheses. Constructs outside that subset
//! are consumed and represented as opaque nodes rather than rejected.

#![warn(missing_docs)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{AliasDecl, Declaration, Field, Module, PrimitiveKind, RecordDecl, TypeExpr};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use token::{Span, Token};
