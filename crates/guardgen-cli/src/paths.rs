//! Path derivation for generated guard files.
//!
//! The guards file is named after the input with declaration
//! extensions stripped, and its import line has to reach back to the
//! input module from wherever the guards end up.

use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Base name of the input with `.d.ts` or `.ts` stripped.
pub fn input_stem(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Some(stem) = name.strip_suffix(".d.ts") {
        stem.to_string()
    } else if let Some(stem) = name.strip_suffix(".ts") {
        stem.to_string()
    } else {
        name
    }
}

/// Name of the guards file derived from the input file name.
pub fn guard_file_name(input: &Path) -> String {
    format!("{}.guards.ts", input_stem(input))
}

/// Guards file placed next to the input, for `--guards-file`.
pub fn derived_outfile(input: &Path) -> PathBuf {
    input.with_file_name(guard_file_name(input))
}

/// Resolve the path the guards are written to. A directory target
/// gets the derived guards file name appended.
pub fn resolve_outfile(input: &Path, target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(guard_file_name(input))
    } else {
        target.to_path_buf()
    }
}

/// Import specifier the generated file uses to reach the input
/// module, extension-free and with a `./` prefix unless it already
/// walks upward. Fails only when the working directory is unavailable.
pub fn import_path(input: &Path, outfile: &Path) -> io::Result<String> {
    let out_dir = outfile.parent().unwrap_or_else(|| Path::new(""));
    let to_input = relative_path(out_dir, input)?;

    let import_file = match to_input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(input_stem(input)),
        _ => PathBuf::from(input_stem(input)),
    };

    let import = import_file.to_string_lossy().replace('\\', "/");
    Ok(if import.starts_with("../") {
        import
    } else {
        format!("./{}", import)
    })
}

/// Relative path from the directory `from` to the path `to`, walking
/// over shared leading components. Both sides are resolved against
/// the working directory first so that a relative input and an
/// absolute outfile still meet on a common prefix.
fn relative_path(from: &Path, to: &Path) -> io::Result<PathBuf> {
    let cwd = env::current_dir()?;
    let from = absolutize(&cwd, from);
    let to = absolutize(&cwd, to);

    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();

    let shared = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..from_parts.len() {
        relative.push("..");
    }
    for part in &to_parts[shared..] {
        relative.push(part);
    }
    Ok(relative)
}

/// Resolve `path` against `base`, folding `.` and `..` segments.
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut parts: Vec<Component> = Vec::new();
    for part in joined.components() {
        match part {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                }
            }
            part => parts.push(part),
        }
    }
    parts.into_iter().collect()
}
