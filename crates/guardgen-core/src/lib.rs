//! Guardgen Core
//!
//! Turns a parsed declaration module into runtime type guard source:
//! resolver, expression visitor, check model, TypeScript renderer,
//! declaration emitter, and the module driver. Generation is
//! deterministic and total over well-formed modules; only model
//! violations are errors.

#![warn(missing_docs)]

pub mod check;
pub mod emit;
pub mod error;
pub mod generate;
pub mod render;
pub mod resolve;
pub mod visit;

pub use check::{guard_name, parameter_name, CheckExpr, FieldCheck, GuardBody, GuardFunction};
pub use emit::{build_guard, emit_declaration, EmitterConfig};
pub use error::{GenerateError, GenerateResult};
pub use generate::{
    collect_exported, generate, generate_guards, generate_import_line, Exported, Generated,
};
pub use render::{render_check, render_guard};
pub use resolve::{resolve, Resolution};
pub use visit::{visit, NodeInfo};
