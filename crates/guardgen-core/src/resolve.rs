//! Reference resolution.
//!
//! A reference is linked when it names another exported declaration of
//! the same module. Linked references become guard calls; everything
//! else degrades to a permissive check at the visit layer.

use std::collections::BTreeSet;

/// Outcome of resolving one referenced name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the name is an exported declaration of this module.
    pub linked: bool,
}

/// Resolve a referenced name against the module's exported names.
pub fn resolve(name: &str, exported_names: &BTreeSet<String>) -> Resolution {
    Resolution {
        linked: exported_names.contains(name),
    }
}
