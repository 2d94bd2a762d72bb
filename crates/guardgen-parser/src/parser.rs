//! Parser for the declaration subset
//!
//! This module implements a recursive descent parser that transforms
//! a token stream from the lexer into a [`Module`] of `interface` and
//! `type` declarations. Constructs outside the modeled subset parse
//! into [`TypeExpr::Unknown`] so that downstream generation can
//! degrade gracefully instead of refusing the whole file.

pub mod error;

use crate::ast::{AliasDecl, Declaration, Field, Module, PrimitiveKind, RecordDecl, TypeExpr};
use crate::lexer::Lexer;
use crate::token::{Span, Token};
use std::collections::HashSet;
use tracing::debug;

pub use error::{ParseError, ParseErrorKind};

/// Parser state for declaration modules.
///
/// This implements a recursive descent parser with bounded lookahead
/// (LL(4)) for distinguishing function types from parenthesized types.
pub struct Parser {
    /// Pre-tokenized input
    tokens: Vec<(Token, Span)>,

    /// Current position in token stream
    pos: usize,

    /// Accumulated parse errors (allows continuing after errors)
    errors: Vec<ParseError>,
}

impl Parser {
    /// Create a new parser from source code.
    pub fn new(source: &str) -> Result<Self, Vec<crate::lexer::LexError>> {
        // Tokenize the entire input first
        let lexer = Lexer::new(source);
        let mut tokens = lexer.tokenize()?;

        // Add EOF token if not present
        if tokens.is_empty() || !matches!(tokens.last().unwrap().0, Token::Eof) {
            let eof_span = if let Some((_, last_span)) = tokens.last() {
                Span::new(last_span.end, last_span.end, last_span.line, last_span.column)
            } else {
                Span::new(0, 0, 1, 1)
            };
            tokens.push((Token::Eof, eof_span));
        }

        Ok(Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        })
    }

    /// Parse the entire source file into a Module AST.
    ///
    /// Returns the Module on success, or all accumulated errors on failure.
    pub fn parse(mut self) -> Result<Module, Vec<ParseError>> {
        let start_span = self.current_span();
        let mut declarations = Vec::new();

        // Parse top-level declarations until EOF
        while !self.at_eof() {
            match self.current() {
                // Imports and re-exports carry no type structure
                Token::Import => self.skip_import(),
                Token::Export if self.reexport_ahead() => self.skip_import(),

                // Stray semicolons between declarations
                Token::Semicolon => {
                    self.advance();
                }

                _ => {
                    let before = self.pos;
                    match self.parse_declaration() {
                        Ok(decl) => declarations.push(decl),
                        Err(err) => {
                            self.errors.push(err);
                            // Attempt recovery by synchronizing to the next declaration
                            self.sync_to_declaration_boundary();
                            if self.pos == before {
                                self.advance();
                            }
                        }
                    }
                }
            }
        }

        self.check_duplicate_names(&declarations);

        let span = if let Some(last) = declarations.last() {
            self.combine_spans(&start_span, last.span())
        } else {
            start_span
        };

        debug!(
            declarations = declarations.len(),
            errors = self.errors.len(),
            "parsed module"
        );

        // If any errors occurred, return them
        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        Ok(Module { declarations, span })
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].1
    }

    /// Peek at the next token (lookahead).
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.peek_at(1)
    }

    /// Peek `offset` tokens past the current one.
    #[inline]
    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|(tok, _)| tok)
    }

    /// Get the span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].1
    }

    /// Advance to the next token, returning the previous current token.
    pub fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].0.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, expected: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(expected)
    }

    /// Check if we've reached EOF.
    #[inline]
    pub fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Consume the current token if it matches the expected kind.
    ///
    /// Returns Ok(token) on match, or Err(ParseError) on mismatch.
    pub fn expect(&mut self, expected: Token) -> Result<Token, ParseError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected_token(&[expected]))
        }
    }

    /// Consume an identifier and return its text.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.current() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected_token(&[Token::Identifier(String::new())])),
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Create an "unexpected token" error.
    fn unexpected_token(&self, expected: &[Token]) -> ParseError {
        if self.at_eof() {
            ParseError::unexpected_eof(expected.to_vec(), self.current_span())
        } else {
            ParseError::unexpected_token(
                expected.to_vec(),
                self.current().clone(),
                self.current_span(),
            )
        }
    }

    /// Record duplicate declaration names as errors.
    fn check_duplicate_names(&mut self, declarations: &[Declaration]) {
        let mut seen = HashSet::new();
        for decl in declarations {
            if !seen.insert(decl.name().to_string()) {
                self.errors
                    .push(ParseError::duplicate_declaration(decl.name(), *decl.span()));
            }
        }
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Skip tokens until the next field boundary inside a record body.
    fn sync_to_field_boundary(&mut self) {
        while !self.at_eof() {
            match self.current() {
                Token::Semicolon | Token::Comma => {
                    self.advance();
                    return;
                }
                Token::RightBrace => return,
                tok if tok.starts_declaration() => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip tokens until a plausible declaration start.
    ///
    /// Used after a parse error so the rest of the file can still be
    /// checked for further errors.
    fn sync_to_declaration_boundary(&mut self) {
        while !self.at_eof() {
            match self.current() {
                tok if tok.starts_declaration() => return,
                Token::Semicolon => {
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let start = self.current_span();
        let exported = if self.check(&Token::Export) {
            self.advance();
            true
        } else {
            false
        };

        match self.current() {
            Token::Interface => self.parse_record(exported, start),
            Token::Type => self.parse_alias(exported, start),
            _ => Err(self.unexpected_token(&[Token::Interface, Token::Type])),
        }
    }

    fn parse_record(&mut self, exported: bool, start: Span) -> Result<Declaration, ParseError> {
        self.expect(Token::Interface)?;
        let name = self.expect_identifier()?;
        self.expect(Token::LeftBrace)?;

        let mut fields = Vec::new();
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            let before = self.pos;
            match self.parse_field() {
                Ok(field) => fields.push(field),
                Err(err) => {
                    self.errors.push(err);
                    // Resynchronize within the body so later fields
                    // still get checked
                    self.sync_to_field_boundary();
                    if self.pos == before {
                        self.advance();
                    }
                }
            }
        }

        let end = self.current_span();
        self.expect(Token::RightBrace)?;
        if self.check(&Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration::Record(RecordDecl {
            name,
            fields,
            exported,
            span: self.combine_spans(&start, &end),
        }))
    }

    fn parse_alias(&mut self, exported: bool, start: Span) -> Result<Declaration, ParseError> {
        self.expect(Token::Type)?;
        let name = self.expect_identifier()?;
        self.expect(Token::Equal)?;
        let ty = self.parse_type_expr()?;

        let mut end = self.previous_span();
        if self.check(&Token::Semicolon) {
            end = self.current_span();
            self.advance();
        } else if !self.at_eof() {
            return Err(ParseError::missing_semicolon(self.current_span()));
        }

        Ok(Declaration::Alias(AliasDecl {
            name,
            ty,
            exported,
            span: self.combine_spans(&start, &end),
        }))
    }

    fn parse_field(&mut self) -> Result<Field, ParseError> {
        let start = self.current_span();
        let name = self.parse_field_name()?;
        let optional = if self.check(&Token::Question) {
            self.advance();
            true
        } else {
            false
        };
        self.expect(Token::Colon)?;
        let ty = self.parse_type_expr()?;
        let end = self.previous_span();

        // Fields are separated by ';' or ',' except before the closing brace
        if self.check(&Token::Semicolon) || self.check(&Token::Comma) {
            self.advance();
        } else if !self.check(&Token::RightBrace) {
            return Err(self
                .unexpected_token(&[Token::Semicolon, Token::Comma, Token::RightBrace])
                .with_suggestion("Separate fields with ';'"));
        }

        Ok(Field {
            name,
            ty,
            optional,
            span: self.combine_spans(&start, &end),
        })
    }

    /// Field names may be identifiers, string literals, or keywords.
    fn parse_field_name(&mut self) -> Result<String, ParseError> {
        let name = match self.current() {
            Token::Identifier(name) => name.clone(),
            Token::StringLiteral(name) => name.clone(),
            Token::Export => "export".to_string(),
            Token::Interface => "interface".to_string(),
            Token::Type => "type".to_string(),
            Token::Import => "import".to_string(),
            Token::From => "from".to_string(),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),
            Token::Null => "null".to_string(),
            _ => return Err(self.unexpected_token(&[Token::Identifier(String::new())])),
        };
        self.advance();
        Ok(name)
    }

    // ========================================================================
    // Type Expressions
    // ========================================================================

    fn parse_type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        // Leading '|' before the first union member is allowed
        if self.check(&Token::Pipe) {
            self.advance();
        }

        let first = self.parse_intersection_type()?;
        if !self.check(&Token::Pipe) {
            return Ok(first);
        }

        let mut members = vec![first];
        while self.check(&Token::Pipe) {
            self.advance();
            members.push(self.parse_intersection_type()?);
        }

        Ok(TypeExpr::UnionOf(members))
    }

    /// Intersections are outside the modeled subset; both sides are
    /// consumed and the whole expression becomes opaque.
    fn parse_intersection_type(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.parse_postfix_type()?;
        if !self.check(&Token::Amp) {
            return Ok(first);
        }

        while self.check(&Token::Amp) {
            self.advance();
            self.parse_postfix_type()?;
        }

        Ok(TypeExpr::Unknown("IntersectionType".to_string()))
    }

    fn parse_postfix_type(&mut self) -> Result<TypeExpr, ParseError> {
        let mut ty = self.parse_primary_type()?;

        while self.check(&Token::LeftBracket) {
            if matches!(self.peek(), Some(Token::RightBracket)) {
                self.advance();
                self.advance();
                ty = TypeExpr::ArrayOf(Box::new(ty));
            } else {
                // Indexed access `T["key"]`
                self.skip_balanced(Token::LeftBracket, Token::RightBracket)?;
                ty = TypeExpr::Unknown("IndexedAccessType".to_string());
            }
        }

        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> Result<TypeExpr, ParseError> {
        match self.current().clone() {
            Token::Identifier(name) => {
                self.advance();
                self.parse_named_type(name)
            }

            Token::StringLiteral(value) => {
                self.advance();
                Ok(TypeExpr::LiteralValue(value))
            }

            Token::NumberLiteral(_) => {
                self.advance();
                Ok(TypeExpr::Unknown("NumericLiteral".to_string()))
            }

            Token::True | Token::False => {
                self.advance();
                Ok(TypeExpr::Unknown("BooleanLiteral".to_string()))
            }

            Token::Null => {
                self.advance();
                Ok(TypeExpr::Unknown("NullKeyword".to_string()))
            }

            // Object type literal `{ a: string }`
            Token::LeftBrace => {
                self.skip_balanced(Token::LeftBrace, Token::RightBrace)?;
                Ok(TypeExpr::Unknown("TypeLiteral".to_string()))
            }

            // Tuple `[string, number]`
            Token::LeftBracket => {
                self.skip_balanced(Token::LeftBracket, Token::RightBracket)?;
                Ok(TypeExpr::Unknown("TupleType".to_string()))
            }

            Token::LeftParen => {
                if self.function_type_ahead() {
                    self.parse_function_type()
                } else {
                    self.advance();
                    let inner = self.parse_type_expr()?;
                    self.expect(Token::RightParen)?;
                    Ok(TypeExpr::Parenthesized(Box::new(inner)))
                }
            }

            _ => Err(self.unexpected_token(&[
                Token::Identifier(String::new()),
                Token::StringLiteral(String::new()),
                Token::LeftBrace,
                Token::LeftBracket,
                Token::LeftParen,
            ])),
        }
    }

    /// Classify an identifier in type position.
    ///
    /// `number`, `string`, `object` and `any` are the modeled
    /// primitives. The remaining type-level keywords degrade to opaque
    /// constructs, and anything else is a reference to a declaration.
    fn parse_named_type(&mut self, name: String) -> Result<TypeExpr, ParseError> {
        if let Some(kind) = PrimitiveKind::from_name(&name) {
            return Ok(TypeExpr::Primitive(kind));
        }

        let unknown = match name.as_str() {
            "boolean" => Some("BooleanKeyword"),
            "undefined" => Some("UndefinedKeyword"),
            "void" => Some("VoidKeyword"),
            "never" => Some("NeverKeyword"),
            "unknown" => Some("UnknownKeyword"),
            "symbol" => Some("SymbolKeyword"),
            "bigint" => Some("BigIntKeyword"),
            _ => None,
        };
        if let Some(label) = unknown {
            return Ok(TypeExpr::Unknown(label.to_string()));
        }

        // Qualified name `ns.Type`
        if self.check(&Token::Dot) {
            while self.check(&Token::Dot) {
                self.advance();
                self.expect_identifier()?;
            }
            return Ok(TypeExpr::Unknown("QualifiedName".to_string()));
        }

        // Generic arguments are consumed but not modeled; the guard for
        // `Name<T>` is the same permissive reference check as for `Name`.
        if self.check(&Token::Less) {
            self.skip_balanced(Token::Less, Token::Greater)?;
        }

        Ok(TypeExpr::Reference(name))
    }

    /// Decide whether a `(` starts a function type rather than a
    /// parenthesized type. Looks for `()`, a rest parameter, a
    /// parameter name followed by `:`, `?` or `,`, or a sole untyped
    /// parameter before `) =>`.
    fn function_type_ahead(&self) -> bool {
        match self.peek() {
            Some(Token::RightParen) => true,
            Some(Token::Dot) => true,
            Some(Token::Identifier(_)) => match self.peek_at(2) {
                Some(Token::Colon) | Some(Token::Question) | Some(Token::Comma) => true,
                Some(Token::RightParen) => matches!(self.peek_at(3), Some(Token::Arrow)),
                _ => false,
            },
            _ => false,
        }
    }

    fn parse_function_type(&mut self) -> Result<TypeExpr, ParseError> {
        self.skip_balanced(Token::LeftParen, Token::RightParen)?;
        if self.check(&Token::Arrow) {
            self.advance();
            // Return type, not modeled
            self.parse_type_expr()?;
        }
        Ok(TypeExpr::Unknown("FunctionType".to_string()))
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// True when `export` begins a re-export rather than a declaration:
    /// `export { X } from`, `export *`, or `export type { X } from`.
    fn reexport_ahead(&self) -> bool {
        match self.peek() {
            Some(Token::LeftBrace) | Some(Token::Star) => true,
            Some(Token::Type) => matches!(self.peek_at(2), Some(Token::LeftBrace)),
            _ => false,
        }
    }

    /// Consume an import or re-export statement through its semicolon.
    ///
    /// `type` belongs to the statement when it modifies the whole
    /// clause (`import type { X }`) or a single specifier
    /// (`{ type X, Y }`); anywhere else it marks the start of the
    /// next declaration.
    fn skip_import(&mut self) {
        let mut previous = self.advance();
        while !self.at_eof() {
            match self.current() {
                Token::Semicolon => {
                    self.advance();
                    return;
                }
                Token::Type
                    if matches!(
                        previous,
                        Token::Import | Token::Export | Token::LeftBrace | Token::Comma
                    ) =>
                {
                    previous = self.advance();
                }
                // A missing semicolon should not swallow the next declaration
                tok if tok.starts_declaration() => return,
                _ => {
                    previous = self.advance();
                }
            }
        }
    }

    /// Consume a balanced delimiter pair and everything between.
    fn skip_balanced(&mut self, open: Token, close: Token) -> Result<(), ParseError> {
        let open_span = self.current_span();
        self.expect(open.clone())?;

        let mut depth = 1usize;
        while depth > 0 {
            if self.at_eof() {
                return Err(ParseError::unclosed_delimiter(open, close, open_span));
            }
            if self.check(&open) {
                depth += 1;
            } else if self.check(&close) {
                depth -= 1;
            }
            self.advance();
        }

        Ok(())
    }

    // ========================================================================
    // Utilities
    // ========================================================================

    /// Combine two spans into a single span.
    pub fn combine_spans(&self, start: &Span, end: &Span) -> Span {
        Span {
            start: start.start,
            end: end.end,
            line: start.line,
            column: start.column,
        }
    }
}
