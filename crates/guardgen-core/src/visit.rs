//! The expression visitor.
//!
//! [`visit`] turns one type expression into a [`NodeInfo`]: a display
//! name for annotations and a check over the given binding. The
//! visitor is total; constructs it cannot check become permissive
//! `true` checks with an explanatory comment, never errors.

use crate::check::{guard_name, CheckExpr};
use crate::render::quote_string;
use crate::resolve::resolve;
use guardgen_parser::ast::{PrimitiveKind, TypeExpr};
use std::collections::BTreeSet;
use tracing::trace;

/// What the visitor learned about one type expression.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    /// Display name of the type, used in annotation comments.
    pub type_name: String,
    /// The check confirming a value of the binding has this type.
    pub value_check: CheckExpr,
}

/// Visit a type expression, producing the check for `binding`.
///
/// `exported_names` decides whether references become guard calls or
/// permissive fallbacks.
pub fn visit(expr: &TypeExpr, binding: &str, exported_names: &BTreeSet<String>) -> NodeInfo {
    trace!(binding, "visiting type expression");

    match expr {
        // `any` accepts everything, so there is nothing to test
        TypeExpr::Primitive(PrimitiveKind::Any) => NodeInfo {
            type_name: "any".to_string(),
            value_check: CheckExpr::True,
        },

        TypeExpr::Primitive(kind) => NodeInfo {
            type_name: kind.name().to_string(),
            value_check: CheckExpr::TypeofIs {
                binding: binding.to_string(),
                type_name: kind.name().to_string(),
            },
        },

        TypeExpr::LiteralValue(value) => NodeInfo {
            type_name: quote_string(value),
            value_check: CheckExpr::LiteralEq {
                binding: binding.to_string(),
                literal: value.clone(),
            },
        },

        // Elements get a fresh binding; nesting shadows it, which is
        // safe because the inner check only sees the innermost element
        TypeExpr::ArrayOf(element) => {
            let element_info = visit(element, "x", exported_names);
            NodeInfo {
                type_name: format!("Array<{}>", element_info.type_name),
                value_check: CheckExpr::ArrayEvery {
                    binding: binding.to_string(),
                    element_binding: "x".to_string(),
                    element_check: Box::new(element_info.value_check),
                },
            }
        }

        TypeExpr::UnionOf(members) => {
            let infos: Vec<NodeInfo> = members
                .iter()
                .map(|member| visit(member, binding, exported_names))
                .collect();
            let type_name = infos
                .iter()
                .map(|info| info.type_name.as_str())
                .collect::<Vec<_>>()
                .join(" | ");
            let checks = infos.into_iter().map(|info| info.value_check).collect();
            NodeInfo {
                type_name,
                value_check: CheckExpr::AnyOf(checks),
            }
        }

        TypeExpr::Reference(name) => {
            if resolve(name, exported_names).linked {
                NodeInfo {
                    type_name: name.clone(),
                    value_check: CheckExpr::GuardCall {
                        guard: guard_name(name),
                        binding: binding.to_string(),
                    },
                }
            } else {
                NodeInfo {
                    type_name: name.clone(),
                    value_check: CheckExpr::Fallback {
                        comment: format!("{}: {}", binding, name),
                    },
                }
            }
        }

        // Transparent: the inner type's name and check pass through
        TypeExpr::Parenthesized(inner) => visit(inner, binding, exported_names),

        TypeExpr::Unknown(label) => NodeInfo {
            type_name: format!("unhandled typeName({})", label),
            value_check: CheckExpr::Fallback {
                comment: format!("unimplemented for {} \"{}\"", label, binding),
            },
        },
    }
}
