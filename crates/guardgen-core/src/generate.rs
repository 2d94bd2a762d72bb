//! The module driver.
//!
//! Walks a parsed [`Module`], collects its exported declarations, and
//! produces one guard per exported declaration plus the import line
//! tying a generated file back to its source module. Generation either
//! fully succeeds or fails on a model violation; nothing here fails on
//! merely unrecognized type content.

use crate::emit::{emit_declaration, EmitterConfig};
use crate::error::{GenerateError, GenerateResult};
use guardgen_parser::ast::{Declaration, Module, TypeExpr};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// The exported slice of a module.
#[derive(Debug, Clone)]
pub struct Exported<'a> {
    /// Exported declarations in source order.
    pub declarations: Vec<&'a Declaration>,
    /// Their names, ordered for deterministic output.
    pub names: BTreeSet<String>,
}

/// Collect the exported declarations of a module.
pub fn collect_exported(module: &Module) -> Exported<'_> {
    let declarations: Vec<&Declaration> = module.exported_declarations().collect();
    let names = declarations
        .iter()
        .map(|decl| decl.name().to_string())
        .collect();
    Exported {
        declarations,
        names,
    }
}

/// Generate guard source for every exported declaration, in source
/// order.
pub fn generate_guards(module: &Module, config: &EmitterConfig) -> GenerateResult<Vec<String>> {
    validate_module(module)?;

    let exported = collect_exported(module);
    debug!(
        exported = exported.declarations.len(),
        warners = config.embed_warnings,
        "generating guards"
    );

    Ok(exported
        .declarations
        .iter()
        .map(|decl| emit_declaration(decl, &exported.names, config))
        .collect())
}

/// Generate the import line for a guards file, importing every
/// exported name from `path` in sorted order.
pub fn generate_import_line(module: &Module, path: &str) -> String {
    let exported = collect_exported(module);
    let names: Vec<&str> = exported.names.iter().map(String::as_str).collect();
    format!("import {{{}}} from '{}';", names.join(", "), path)
}

/// A complete generation result.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// The import line, when the emitter was configured with a source
    /// path and the module exports anything.
    pub imports: Option<String>,
    /// One guard per exported declaration, in source order.
    pub guards: Vec<String>,
}

impl Generated {
    /// Assemble the generated file: import line first, then guards,
    /// separated by blank lines, ending in a newline.
    pub fn to_source(&self) -> String {
        let mut sections: Vec<&str> = Vec::new();
        if let Some(imports) = &self.imports {
            sections.push(imports);
        }
        for guard in &self.guards {
            sections.push(guard);
        }
        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }
}

/// Generate everything for one module.
pub fn generate(module: &Module, config: &EmitterConfig) -> GenerateResult<Generated> {
    let guards = generate_guards(module, config)?;
    let imports = match &config.import_from {
        Some(path) if !guards.is_empty() => Some(generate_import_line(module, path)),
        _ => None,
    };
    Ok(Generated { imports, guards })
}

// ============================================================================
// Model Validation
// ============================================================================

/// Check the module invariants generation relies on.
fn validate_module(module: &Module) -> GenerateResult<()> {
    let mut seen = HashSet::new();
    for decl in &module.declarations {
        if !seen.insert(decl.name()) {
            return Err(GenerateError::DuplicateDeclaration {
                name: decl.name().to_string(),
            });
        }
    }

    for decl in &module.declarations {
        match decl {
            Declaration::Record(rec) => {
                for field in &rec.fields {
                    validate_type(&field.ty, rec.name.as_str())?;
                }
            }
            Declaration::Alias(alias) => validate_type(&alias.ty, alias.name.as_str())?,
        }
    }

    Ok(())
}

fn validate_type(ty: &TypeExpr, declaration: &str) -> GenerateResult<()> {
    match ty {
        TypeExpr::UnionOf(members) => {
            if members.is_empty() {
                return Err(GenerateError::EmptyUnion {
                    declaration: declaration.to_string(),
                });
            }
            for member in members {
                validate_type(member, declaration)?;
            }
        }
        TypeExpr::ArrayOf(inner) | TypeExpr::Parenthesized(inner) => {
            validate_type(inner, declaration)?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardgen_parser::ast::{AliasDecl, PrimitiveKind};
    use guardgen_parser::token::Span;

    fn span() -> Span {
        Span::new(0, 0, 1, 1)
    }

    fn alias(name: &str, ty: TypeExpr, exported: bool) -> Declaration {
        Declaration::Alias(AliasDecl {
            name: name.to_string(),
            ty,
            exported,
            span: span(),
        })
    }

    fn module(declarations: Vec<Declaration>) -> Module {
        Module {
            declarations,
            span: span(),
        }
    }

    #[test]
    fn test_collect_exported_keeps_order_and_sorts_names() {
        let m = module(vec![
            alias("Zed", TypeExpr::Primitive(PrimitiveKind::String), true),
            alias("Abc", TypeExpr::Primitive(PrimitiveKind::Number), true),
            alias("Hidden", TypeExpr::Primitive(PrimitiveKind::Number), false),
        ]);

        let exported = collect_exported(&m);
        let order: Vec<&str> = exported.declarations.iter().map(|d| d.name()).collect();
        assert_eq!(order, vec!["Zed", "Abc"]);

        let names: Vec<&String> = exported.names.iter().collect();
        assert_eq!(names, vec!["Abc", "Zed"]);
    }

    #[test]
    fn test_duplicate_names_are_a_model_violation() {
        let m = module(vec![
            alias("A", TypeExpr::Primitive(PrimitiveKind::String), true),
            alias("A", TypeExpr::Primitive(PrimitiveKind::Number), false),
        ]);

        let err = generate_guards(&m, &EmitterConfig::default()).unwrap_err();
        assert_eq!(
            err,
            GenerateError::DuplicateDeclaration {
                name: "A".to_string()
            }
        );
    }

    #[test]
    fn test_empty_union_is_a_model_violation() {
        let m = module(vec![alias("A", TypeExpr::UnionOf(vec![]), true)]);

        let err = generate_guards(&m, &EmitterConfig::default()).unwrap_err();
        assert_eq!(
            err,
            GenerateError::EmptyUnion {
                declaration: "A".to_string()
            }
        );
    }

    #[test]
    fn test_empty_union_is_found_under_nesting() {
        let m = module(vec![alias(
            "A",
            TypeExpr::ArrayOf(Box::new(TypeExpr::Parenthesized(Box::new(
                TypeExpr::UnionOf(vec![]),
            )))),
            true,
        )]);

        assert!(generate_guards(&m, &EmitterConfig::default()).is_err());
    }

    #[test]
    fn test_import_line_sorts_names() {
        let m = module(vec![
            alias("Zed", TypeExpr::Primitive(PrimitiveKind::String), true),
            alias("Abc", TypeExpr::Primitive(PrimitiveKind::Number), true),
        ]);

        assert_eq!(
            generate_import_line(&m, "./source"),
            "import {Abc, Zed} from './source';"
        );
    }

    #[test]
    fn test_generate_without_exports_emits_nothing() {
        let m = module(vec![alias(
            "Hidden",
            TypeExpr::Primitive(PrimitiveKind::String),
            false,
        )]);

        let generated = generate(
            &m,
            &EmitterConfig {
                import_from: Some("./source".to_string()),
                embed_warnings: false,
            },
        )
        .unwrap();

        assert!(generated.guards.is_empty());
        assert!(generated.imports.is_none());
    }
}
