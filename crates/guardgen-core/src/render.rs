//! TypeScript rendering of the check model.
//!
//! This is the only module that knows output syntax. Everything it
//! renders comes from [`CheckExpr`] trees and [`GuardFunction`]
//! records; a renderer for another target language would replace this
//! module and nothing else.

use crate::check::{CheckExpr, FieldCheck, GuardBody, GuardFunction};
use std::fmt::Write;

/// Render one check as a TypeScript boolean expression.
pub fn render_check(check: &CheckExpr) -> String {
    match check {
        CheckExpr::True => "true".to_string(),

        CheckExpr::Fallback { comment } => format!("true /* {} */", comment),

        CheckExpr::TypeofIs { binding, type_name } => {
            format!("typeof {} === '{}'", binding, type_name)
        }

        CheckExpr::LiteralEq { binding, literal } => {
            format!("{} === {}", binding, quote_string(literal))
        }

        CheckExpr::ArrayEvery {
            binding,
            element_binding,
            element_check,
        } => format!(
            "(Array.isArray({}) && {}.every(({}) => {}))",
            binding,
            binding,
            element_binding,
            render_check(element_check)
        ),

        CheckExpr::AnyOf(members) => {
            // A disjunction with no members accepts nothing
            if members.is_empty() {
                return "false".to_string();
            }
            let rendered: Vec<String> = members.iter().map(render_check).collect();
            format!("({})", rendered.join(" || "))
        }

        CheckExpr::GuardCall { guard, binding } => format!("{}({})", guard, binding),

        CheckExpr::OptionalOr { binding, inner } => {
            format!("({} === undefined || {})", binding, render_check(inner))
        }
    }
}

/// Render one guard function as TypeScript source.
///
/// The text has no leading or trailing blank lines; callers join
/// guards with blank lines between them.
pub fn render_guard(guard: &GuardFunction) -> String {
    let mut out = String::new();
    writeln!(out, "// generated typeguard for {}", guard.type_name).unwrap();

    match &guard.body {
        GuardBody::Fields { fields, warn } => {
            writeln!(
                out,
                "export const {} = ({}: any): {} is {} => {{",
                guard.name, guard.parameter, guard.parameter, guard.type_name
            )
            .unwrap();

            if !fields.is_empty() {
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                writeln!(out, "    const {{{}}} = {};", names.join(", "), guard.parameter).unwrap();
                writeln!(out).unwrap();
            }

            let checks: Vec<String> = fields
                .iter()
                .map(|field| {
                    if *warn {
                        render_warned_field(field)
                    } else {
                        render_silent_field(field)
                    }
                })
                .collect();
            let chain = if checks.is_empty() {
                "true".to_string()
            } else {
                checks.join(" &&\n        ")
            };

            writeln!(out, "    return (").unwrap();
            writeln!(out, "        {}", chain).unwrap();
            writeln!(out, "    );").unwrap();
            out.push_str("};");
        }

        GuardBody::Expr(check) => {
            writeln!(
                out,
                "export const {} = ({}: any): {} is {} =>",
                guard.name, guard.parameter, guard.parameter, guard.type_name
            )
            .unwrap();
            write!(out, "    {};", render_check(check)).unwrap();
        }
    }

    out
}

/// A field check with its annotation comment.
fn render_silent_field(field: &FieldCheck) -> String {
    format!("{} /* {} */", render_check(&field.check), field.description)
}

/// A field check wrapped in an IIFE that stores the result, warns on
/// failure, and returns the stored boolean. The stored value is what
/// the silent form would have computed, so warnings never change the
/// guard's verdict.
fn render_warned_field(field: &FieldCheck) -> String {
    let mut out = String::new();
    writeln!(out, "(({}) => {{", field.field).unwrap();
    writeln!(
        out,
        "            const {}ChecksOut = {} /* {} */;",
        field.field,
        render_check(&field.check),
        field.description
    )
    .unwrap();
    writeln!(
        out,
        "            if (!{}ChecksOut) {{ console.warn(\"{} is not a proper {}\"); }}",
        field.field, field.field, field.type_name
    )
    .unwrap();
    writeln!(out, "            return {}ChecksOut;", field.field).unwrap();
    write!(out, "        }})({})", field.field).unwrap();
    out
}

/// Quote a string as a single-quoted TypeScript literal, escaping
/// backslashes, quotes, and newlines.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_typeof_check() {
        let check = CheckExpr::TypeofIs {
            binding: "value".to_string(),
            type_name: "string".to_string(),
        };
        assert_eq!(render_check(&check), "typeof value === 'string'");
    }

    #[test]
    fn test_render_literal_check_escapes_quotes() {
        let check = CheckExpr::LiteralEq {
            binding: "name".to_string(),
            literal: "it's".to_string(),
        };
        assert_eq!(render_check(&check), r"name === 'it\'s'");
    }

    #[test]
    fn test_render_array_check() {
        let check = CheckExpr::ArrayEvery {
            binding: "tags".to_string(),
            element_binding: "x".to_string(),
            element_check: Box::new(CheckExpr::TypeofIs {
                binding: "x".to_string(),
                type_name: "string".to_string(),
            }),
        };
        assert_eq!(
            render_check(&check),
            "(Array.isArray(tags) && tags.every((x) => typeof x === 'string'))"
        );
    }

    #[test]
    fn test_render_union_check() {
        let check = CheckExpr::AnyOf(vec![
            CheckExpr::LiteralEq {
                binding: "dir".to_string(),
                literal: "up".to_string(),
            },
            CheckExpr::LiteralEq {
                binding: "dir".to_string(),
                literal: "down".to_string(),
            },
        ]);
        assert_eq!(render_check(&check), "(dir === 'up' || dir === 'down')");
        assert_eq!(render_check(&CheckExpr::AnyOf(vec![])), "false");
    }

    #[test]
    fn test_render_optional_wrapper_mirrors_inner_check() {
        let check = CheckExpr::OptionalOr {
            binding: "amount".to_string(),
            inner: Box::new(CheckExpr::TypeofIs {
                binding: "amount".to_string(),
                type_name: "number".to_string(),
            }),
        };
        assert_eq!(
            render_check(&check),
            "(amount === undefined || typeof amount === 'number')"
        );
    }

    #[test]
    fn test_render_guard_call_and_fallback() {
        let call = CheckExpr::GuardCall {
            guard: "isBar".to_string(),
            binding: "linked".to_string(),
        };
        assert_eq!(render_check(&call), "isBar(linked)");

        let fallback = CheckExpr::Fallback {
            comment: "linked: Baz".to_string(),
        };
        assert_eq!(render_check(&fallback), "true /* linked: Baz */");
    }

    #[test]
    fn test_render_empty_record_guard() {
        let guard = GuardFunction {
            type_name: "Empty".to_string(),
            name: "isEmpty".to_string(),
            parameter: "maybeEmpty".to_string(),
            body: GuardBody::Fields {
                fields: vec![],
                warn: false,
            },
        };
        let expected = "\
// generated typeguard for Empty
export const isEmpty = (maybeEmpty: any): maybeEmpty is Empty => {
    return (
        true
    );
};";
        assert_eq!(render_guard(&guard), expected);
    }

    #[test]
    fn test_render_alias_guard() {
        let guard = GuardFunction {
            type_name: "Id".to_string(),
            name: "isId".to_string(),
            parameter: "maybeId".to_string(),
            body: GuardBody::Expr(CheckExpr::TypeofIs {
                binding: "maybeId".to_string(),
                type_name: "string".to_string(),
            }),
        };
        let expected = "\
// generated typeguard for Id
export const isId = (maybeId: any): maybeId is Id =>
    typeof maybeId === 'string';";
        assert_eq!(render_guard(&guard), expected);
    }
}
