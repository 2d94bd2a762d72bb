//! The renderer-independent check model.
//!
//! The visitor and emitter build [`CheckExpr`] trees and
//! [`GuardFunction`] records describing what each guard tests; the
//! render module turns them into TypeScript source. Nothing in this
//! module knows output syntax.

/// A boolean check over one runtime binding.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckExpr {
    /// Passes everything.
    True,

    /// Passes everything, with an explanatory comment. Used for
    /// unresolved references and constructs outside the modeled
    /// subset.
    Fallback {
        /// Comment text explaining why the check is permissive.
        comment: String,
    },

    /// A `typeof` test against a primitive type name.
    TypeofIs {
        /// The binding under test.
        binding: String,
        /// Expected `typeof` result.
        type_name: String,
    },

    /// Strict equality against a string literal.
    LiteralEq {
        /// The binding under test.
        binding: String,
        /// Expected literal value, unquoted.
        literal: String,
    },

    /// An array test: the binding is an array and every element
    /// passes the element check.
    ArrayEvery {
        /// The binding under test.
        binding: String,
        /// Fresh name bound to each element.
        element_binding: String,
        /// Check applied to each element.
        element_check: Box<CheckExpr>,
    },

    /// Disjunction: passes when any member check passes.
    AnyOf(Vec<CheckExpr>),

    /// A call to a sibling guard function.
    GuardCall {
        /// Name of the guard function.
        guard: String,
        /// The binding passed to it.
        binding: String,
    },

    /// Optional-field wrapper: absence short-circuits, presence runs
    /// the inner check unchanged.
    OptionalOr {
        /// The field binding.
        binding: String,
        /// Check applied when the field is present.
        inner: Box<CheckExpr>,
    },
}

// ============================================================================
// Guard Records
// ============================================================================

/// Everything a renderer needs to emit one guard function.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardFunction {
    /// The declared type name the guard narrows to.
    pub type_name: String,
    /// Guard function name.
    pub name: String,
    /// Parameter name.
    pub parameter: String,
    /// The guard's body.
    pub body: GuardBody,
}

/// Body of a guard function.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardBody {
    /// A record guard: destructure the parameter and AND the field
    /// checks together.
    Fields {
        /// Per-field checks in declaration order.
        fields: Vec<FieldCheck>,
        /// Whether field checks are wrapped to warn on failure.
        warn: bool,
    },

    /// An alias guard: one check over the whole parameter.
    Expr(CheckExpr),
}

/// One field's contribution to a record guard.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCheck {
    /// Runtime field name, also the destructured binding.
    pub field: String,
    /// Display name of the field's declared type.
    pub type_name: String,
    /// Annotation text attached to the check, e.g. `amount?: number`.
    pub description: String,
    /// The check itself, already wrapped for optional fields.
    pub check: CheckExpr,
}

// ============================================================================
// Naming
// ============================================================================

/// Guard function name for a declared type: `is` + the capitalized
/// declaration name. Reference call sites use the same derivation, so
/// a guard is always called by the name it was emitted under.
pub fn guard_name(type_name: &str) -> String {
    format!("is{}", capitalize(type_name))
}

/// Parameter name for a guard: `maybe` + the capitalized declaration
/// name.
pub fn parameter_name(type_name: &str) -> String {
    format!("maybe{}", capitalize(type_name))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_naming_is_uniform() {
        assert_eq!(guard_name("Foo"), "isFoo");
        assert_eq!(guard_name("direction"), "isDirection");
        assert_eq!(parameter_name("Foo"), "maybeFoo");
        assert_eq!(parameter_name("direction"), "maybeDirection");
    }

    #[test]
    fn test_capitalize_handles_non_ascii_and_empty() {
        assert_eq!(guard_name(""), "is");
        assert_eq!(guard_name("état"), "isÉtat");
    }
}
