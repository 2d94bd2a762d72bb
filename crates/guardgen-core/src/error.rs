//! Generation error types.
//!
//! Generation is total over well-formed modules: unrecognized type
//! constructs and unresolved references degrade to permissive checks
//! instead of failing. The only fatal conditions are violations of the
//! module model itself.

use thiserror::Error;

/// Result alias for guard generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// A violation of the module model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// Two declarations in the module share one name.
    #[error("duplicate declaration of '{name}' in module")]
    DuplicateDeclaration {
        /// The repeated declaration name.
        name: String,
    },

    /// A union type with no members.
    #[error("empty union in declaration '{declaration}'")]
    EmptyUnion {
        /// The declaration containing the empty union.
        declaration: String,
    },
}
