//! AST for parsed declaration modules.
//!
//! A [`Module`] is the parser's output and the generator's input: the
//! ordered list of `interface` and `type` declarations found in one
//! source file, each keeping its export marker and source span.

pub mod types;

pub use types::{PrimitiveKind, TypeExpr};

use crate::token::Span;
use serde::Serialize;

/// A parsed source module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Span of the whole module.
    pub span: Span,
}

impl Module {
    /// Iterate over the exported declarations in source order.
    pub fn exported_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|d| d.exported())
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Declaration {
    /// `interface Name { ... }`
    Record(RecordDecl),

    /// `type Name = ...;`
    Alias(AliasDecl),
}

impl Declaration {
    /// The declared name.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Record(rec) => &rec.name,
            Declaration::Alias(alias) => &alias.name,
        }
    }

    /// Whether the declaration carries the `export` marker.
    pub fn exported(&self) -> bool {
        match self {
            Declaration::Record(rec) => rec.exported,
            Declaration::Alias(alias) => alias.exported,
        }
    }

    /// Source span of the whole declaration.
    pub fn span(&self) -> &Span {
        match self {
            Declaration::Record(rec) => &rec.span,
            Declaration::Alias(alias) => &alias.span,
        }
    }
}

/// A record declaration: a named set of fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDecl {
    /// Declared name.
    pub name: String,
    /// Fields in source order.
    pub fields: Vec<Field>,
    /// Whether the declaration is exported.
    pub exported: bool,
    /// Source span.
    pub span: Span,
}

/// An alias declaration: a name bound to one type expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasDecl {
    /// Declared name.
    pub name: String,
    /// The aliased type.
    pub ty: TypeExpr,
    /// Whether the declaration is exported.
    pub exported: bool,
    /// Source span.
    pub span: Span,
}

/// One field of a record declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Field name as written (identifier or string literal text).
    pub name: String,
    /// Declared type.
    pub ty: TypeExpr,
    /// Whether the field was marked optional with `?`.
    pub optional: bool,
    /// Source span.
    pub span: Span,
}
