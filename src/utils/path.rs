//! Lexical path resolution.

use crate::error::{ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Component, Path, PathBuf};

/// Resolves `path` against `base` and normalizes `.`/`..` without touching the filesystem.
pub fn resolve_from(path: &Path, base: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize_from(base)
        .fs_context("failed to resolve", path)?
        .into_owned())
}

/// Resolves `path` against the current working directory.
pub fn resolve(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("failed to resolve", path)?
        .into_owned())
}

/// Computes `path` relative to `base`, where a relative `path` is taken to be
/// relative to `base` itself. Returns `.` when both name the same directory.
pub fn relative_to(path: &Path, base: &Path) -> Result<PathBuf> {
    let base = resolve(base)?;
    let path = resolve_from(path, &base)?;

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Ok(relative)
}
