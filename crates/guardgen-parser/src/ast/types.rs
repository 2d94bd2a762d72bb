//! Type expression AST nodes
//!
//! This module defines the structural type language guardgen models:
//! - Primitive types (number, string, object, any)
//! - String literal types ('up')
//! - Array types (number[])
//! - Union types (A | B | C)
//! - References to other declarations (Bar)
//! - Parenthesized types ((A | B))
//!
//! Everything else the source language can express (object literals,
//! tuples, function types, numeric and boolean literals, qualified
//! names) parses into [`TypeExpr::Unknown`] carrying the construct's
//! kind label, so generation can degrade instead of failing.

use serde::Serialize;

/// A structural type expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeExpr {
    /// Primitive type: number, string, object, any
    Primitive(PrimitiveKind),

    /// String literal type: 'up'
    LiteralValue(String),

    /// Array type: number[]
    ArrayOf(Box<TypeExpr>),

    /// Union type: 'up' | 'down'
    UnionOf(Vec<TypeExpr>),

    /// Reference to another declaration by name: Bar
    Reference(String),

    /// Parenthesized type: (A | B)
    Parenthesized(Box<TypeExpr>),

    /// A construct outside the modeled subset, labeled with its
    /// source-level kind: TypeLiteral, TupleType, FunctionType, ...
    Unknown(String),
}

impl TypeExpr {
    /// Check if this type is a primitive
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeExpr::Primitive(_))
    }

    /// Check if this type is a union
    pub fn is_union(&self) -> bool {
        matches!(self, TypeExpr::UnionOf(_))
    }

    /// Get the primitive kind if this is a primitive
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            TypeExpr::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Get the referenced declaration name if this is a reference
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            TypeExpr::Reference(name) => Some(name),
            _ => None,
        }
    }
}

// ============================================================================
// Primitive Kinds
// ============================================================================

/// Primitive type kind.
///
/// These are exactly the primitives whose runtime shape a `typeof`
/// test can confirm (`any` passes everything).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimitiveKind {
    /// `number`
    Number,
    /// `string`
    String,
    /// `object`
    Object,
    /// `any`
    Any,
}

impl PrimitiveKind {
    /// Get the source-level name of this primitive kind
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Object => "object",
            PrimitiveKind::Any => "any",
        }
    }

    /// Map a type-position identifier to a primitive kind.
    pub fn from_name(name: &str) -> Option<PrimitiveKind> {
        match name {
            "number" => Some(PrimitiveKind::Number),
            "string" => Some(PrimitiveKind::String),
            "object" => Some(PrimitiveKind::Object),
            "any" => Some(PrimitiveKind::Any),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_round_trip_by_name() {
        for kind in [
            PrimitiveKind::Number,
            PrimitiveKind::String,
            PrimitiveKind::Object,
            PrimitiveKind::Any,
        ] {
            assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_name("boolean"), None);
    }

    #[test]
    fn test_helpers() {
        let ty = TypeExpr::Primitive(PrimitiveKind::Number);
        assert!(ty.is_primitive());
        assert_eq!(ty.as_primitive(), Some(PrimitiveKind::Number));

        let union = TypeExpr::UnionOf(vec![
            TypeExpr::LiteralValue("up".to_string()),
            TypeExpr::LiteralValue("down".to_string()),
        ]);
        assert!(union.is_union());
        assert_eq!(union.as_primitive(), None);

        let reference = TypeExpr::Reference("Bar".to_string());
        assert_eq!(reference.as_reference(), Some("Bar"));
    }
}
