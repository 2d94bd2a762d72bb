//! Declaration emission.
//!
//! Builds one [`GuardFunction`] per exported declaration and renders
//! it. Optional-field handling lives here and nowhere else: the
//! visitor produces the presence check, and this module wraps it so
//! absence short-circuits.

use crate::check::{guard_name, parameter_name, CheckExpr, FieldCheck, GuardBody, GuardFunction};
use crate::render::render_guard;
use crate::visit::visit;
use guardgen_parser::ast::{AliasDecl, Declaration, RecordDecl};
use std::collections::BTreeSet;
use tracing::debug;

/// Knobs the caller controls about emitted output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmitterConfig {
    /// Module specifier for the generated import line, when the output
    /// lands in a file that must import the types it narrows to.
    pub import_from: Option<String>,

    /// Wrap record field checks so failures are reported through
    /// `console.warn`. Never changes what a guard returns.
    pub embed_warnings: bool,
}

/// Build the guard record for one declaration.
pub fn build_guard(
    decl: &Declaration,
    exported_names: &BTreeSet<String>,
    config: &EmitterConfig,
) -> GuardFunction {
    match decl {
        Declaration::Record(rec) => record_guard(rec, exported_names, config),
        Declaration::Alias(alias) => alias_guard(alias, exported_names),
    }
}

/// Emit the guard source for one declaration.
pub fn emit_declaration(
    decl: &Declaration,
    exported_names: &BTreeSet<String>,
    config: &EmitterConfig,
) -> String {
    render_guard(&build_guard(decl, exported_names, config))
}

fn record_guard(
    rec: &RecordDecl,
    exported_names: &BTreeSet<String>,
    config: &EmitterConfig,
) -> GuardFunction {
    debug!(name = %rec.name, fields = rec.fields.len(), "emitting record guard");

    let fields = rec
        .fields
        .iter()
        .map(|field| {
            let info = visit(&field.ty, &field.name, exported_names);

            let check = if field.optional {
                CheckExpr::OptionalOr {
                    binding: field.name.clone(),
                    inner: Box::new(info.value_check),
                }
            } else {
                info.value_check
            };

            let description = if field.optional {
                format!("{}?: {}", field.name, info.type_name)
            } else {
                format!("{}: {}", field.name, info.type_name)
            };

            FieldCheck {
                field: field.name.clone(),
                type_name: info.type_name,
                description,
                check,
            }
        })
        .collect();

    GuardFunction {
        type_name: rec.name.clone(),
        name: guard_name(&rec.name),
        parameter: parameter_name(&rec.name),
        body: GuardBody::Fields {
            fields,
            warn: config.embed_warnings,
        },
    }
}

fn alias_guard(alias: &AliasDecl, exported_names: &BTreeSet<String>) -> GuardFunction {
    debug!(name = %alias.name, "emitting alias guard");

    let parameter = parameter_name(&alias.name);
    let info = visit(&alias.ty, &parameter, exported_names);

    GuardFunction {
        type_name: alias.name.clone(),
        name: guard_name(&alias.name),
        parameter,
        body: GuardBody::Expr(info.value_check),
    }
}
