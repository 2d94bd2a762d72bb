//! Diagnostic rendering for failures on the way to guard output.
//!
//! Maps lexer, parser, and generation errors onto `codespan-reporting`
//! diagnostics with source context and suggestions, emitted to stderr.

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use guardgen_core::GenerateError;
use guardgen_parser::{LexError, ParseError, ParseErrorKind};
use std::path::Path;

/// Render lexer errors to stderr with source context.
pub fn emit_lex_errors(path: &Path, source: &str, errors: &[LexError]) -> anyhow::Result<()> {
    let (files, file_id) = source_files(path, source);
    let mut writer = StandardStream::stderr(color_choice());
    let config = term::Config::default();
    for error in errors {
        term::emit(&mut writer, &config, &files, &lex_diagnostic(error, file_id))?;
    }
    Ok(())
}

/// Render parse errors to stderr with source context.
pub fn emit_parse_errors(path: &Path, source: &str, errors: &[ParseError]) -> anyhow::Result<()> {
    let (files, file_id) = source_files(path, source);
    let mut writer = StandardStream::stderr(color_choice());
    let config = term::Config::default();
    for error in errors {
        term::emit(&mut writer, &config, &files, &parse_diagnostic(error, file_id))?;
    }
    Ok(())
}

/// Render a generation error to stderr. These carry no source span,
/// only a message about the module as a whole.
pub fn emit_generate_error(error: &GenerateError) -> anyhow::Result<()> {
    let files: SimpleFiles<String, String> = SimpleFiles::new();
    let mut writer = StandardStream::stderr(color_choice());
    let config = term::Config::default();
    term::emit(&mut writer, &config, &files, &generate_diagnostic(error))?;
    Ok(())
}

/// Honor `NO_COLOR`, otherwise let the terminal decide.
fn color_choice() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn source_files(path: &Path, source: &str) -> (SimpleFiles<String, String>, usize) {
    let mut files = SimpleFiles::new();
    let file_id = files.add(path.display().to_string(), source.to_string());
    (files, file_id)
}

fn lex_diagnostic(error: &LexError, file_id: usize) -> Diagnostic<usize> {
    let (code, label) = match error {
        LexError::UnexpectedCharacter { .. } => ("E0001", "unexpected character"),
        LexError::UnterminatedString { .. } => ("E0002", "string never closes"),
    };
    let span = error.span();
    Diagnostic::error()
        .with_message(error.to_string())
        .with_code(code)
        .with_labels(vec![
            Label::primary(file_id, span.start..span.end).with_message(label)
        ])
}

fn parse_diagnostic(error: &ParseError, file_id: usize) -> Diagnostic<usize> {
    let (code, label) = match &error.kind {
        ParseErrorKind::UnexpectedToken { .. } => ("E1001", "unexpected token"),
        ParseErrorKind::UnexpectedEof { .. } => ("E1002", "input ends here"),
        ParseErrorKind::DuplicateDeclaration { .. } => ("E1003", "duplicate declaration"),
        ParseErrorKind::MissingSemicolon => ("E1004", "expected ';'"),
        ParseErrorKind::UnclosedDelimiter { .. } => ("E1005", "delimiter never closes"),
    };

    let mut diagnostic = Diagnostic::error()
        .with_message(&error.message)
        .with_code(code)
        .with_labels(vec![Label::primary(
            file_id,
            error.span.start..error.span.end,
        )
        .with_message(label)]);

    if let Some(suggestion) = &error.suggestion {
        diagnostic = diagnostic.with_notes(vec![format!("help: {}", suggestion)]);
    }
    diagnostic
}

fn generate_diagnostic(error: &GenerateError) -> Diagnostic<usize> {
    let code = match error {
        GenerateError::DuplicateDeclaration { .. } => "E2001",
        GenerateError::EmptyUnion { .. } => "E2002",
    };
    Diagnostic::error()
        .with_message(error.to_string())
        .with_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardgen_parser::Parser;

    fn parse_errors(source: &str) -> Vec<ParseError> {
        Parser::new(source).unwrap().parse().unwrap_err()
    }

    #[test]
    fn test_parse_diagnostic_carries_code_and_label() {
        let errors = parse_errors("export type A = number\nexport type B = string;");
        let diagnostic = parse_diagnostic(&errors[0], 0);

        assert_eq!(diagnostic.code, Some("E1004".to_string()));
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.notes, vec!["help: Add ';' here".to_string()]);
    }

    #[test]
    fn test_duplicate_declaration_diagnostic() {
        let errors = parse_errors("export type A = number;\nexport interface A { x: string; }");
        let diagnostic = parse_diagnostic(&errors[0], 0);

        assert_eq!(diagnostic.code, Some("E1003".to_string()));
        assert!(diagnostic.message.contains("A"));
    }

    #[test]
    fn test_lex_diagnostic_for_unexpected_character() {
        let errors = Parser::new("export type A = #;").err().unwrap();
        let diagnostic = lex_diagnostic(&errors[0], 0);

        assert_eq!(diagnostic.code, Some("E0001".to_string()));
        assert_eq!(diagnostic.labels.len(), 1);
    }

    #[test]
    fn test_generate_diagnostic_has_no_labels() {
        let error = GenerateError::EmptyUnion {
            declaration: "Suit".to_string(),
        };
        let diagnostic = generate_diagnostic(&error);

        assert_eq!(diagnostic.code, Some("E2002".to_string()));
        assert!(diagnostic.labels.is_empty());
        assert!(diagnostic.message.contains("Suit"));
    }
}
