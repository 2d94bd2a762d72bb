//! `guardgen generate`: parse a declaration file and emit guards.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use guardgen_core::{generate, EmitterConfig, Generated};
use guardgen_parser::Parser;
use tracing::debug;

use crate::diagnostics;
use crate::paths;

/// Run the generate command against a declaration file.
///
/// Without a target the guards go to stdout and carry no import line;
/// with `--outfile` or `--guards-file` they are written to disk and
/// import their types from the input module.
pub fn execute(
    input: &Path,
    warners: bool,
    dump_module: bool,
    guards_file: bool,
    outfile: Option<&Path>,
) -> anyhow::Result<()> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let parser = match Parser::new(&source) {
        Ok(parser) => parser,
        Err(errors) => {
            diagnostics::emit_lex_errors(input, &source, &errors)?;
            anyhow::bail!("{} lexer error(s) in {}", errors.len(), input.display());
        }
    };

    let module = match parser.parse() {
        Ok(module) => module,
        Err(errors) => {
            diagnostics::emit_parse_errors(input, &source, &errors)?;
            anyhow::bail!("{} parse error(s) in {}", errors.len(), input.display());
        }
    };

    if dump_module {
        eprintln!("{}", serde_json::to_string_pretty(&module)?);
    }

    let target = resolve_target(input, guards_file, outfile);
    let config = EmitterConfig {
        import_from: target
            .as_deref()
            .map(|target| paths::import_path(input, target))
            .transpose()
            .with_context(|| format!("failed to derive the import path for {}", input.display()))?,
        embed_warnings: warners,
    };

    let generated = match generate(&module, &config) {
        Ok(generated) => generated,
        Err(error) => {
            diagnostics::emit_generate_error(&error)?;
            anyhow::bail!("cannot generate guards for {}", input.display());
        }
    };

    match target {
        Some(path) => write_guards(&generated, &path),
        None => {
            // Debug mode replaces stdout output with the module dump
            if !dump_module {
                print!("{}", generated.to_source());
            }
            Ok(())
        }
    }
}

/// An explicit `--outfile` wins over `--guards-file`.
fn resolve_target(input: &Path, guards_file: bool, outfile: Option<&Path>) -> Option<PathBuf> {
    match outfile {
        Some(target) => Some(paths::resolve_outfile(input, target)),
        None if guards_file => Some(paths::derived_outfile(input)),
        None => None,
    }
}

fn write_guards(generated: &Generated, path: &Path) -> anyhow::Result<()> {
    fs::write(path, generated.to_source())
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "wrote guards file");
    Ok(())
}
