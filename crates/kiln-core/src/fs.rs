//! Guarded file writes
//!
//! Generated files are only ever written below a base directory (normally
//! the working directory). Paths with `..`, absolute paths elsewhere, and
//! symlinks that lead out of the base are refused before anything touches
//! the disk.

use crate::error::{CliError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resolve `target` against `base`, refusing anything that leaves `base`
pub fn resolve_within(base: &Path, target: &Path) -> Result<PathBuf> {
    let base = base.canonicalize()?;

    let relative = if target.is_absolute() {
        target.strip_prefix(&base).map_err(|_| unsafe_path(target, &base))?
    } else {
        target
    };

    let mut resolved = base.clone();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path(target, &base));
            }
        }
    }

    if resolved == base {
        return Err(unsafe_path(target, &base));
    }

    // The deepest existing ancestor decides where a symlink really points
    let mut ancestor = resolved.as_path();
    while !ancestor.exists() {
        ancestor = match ancestor.parent() {
            Some(parent) => parent,
            None => break,
        };
    }
    if !ancestor.canonicalize()?.starts_with(&base) {
        return Err(unsafe_path(target, &base));
    }
    if resolved.is_symlink() && !resolved.canonicalize()?.starts_with(&base) {
        return Err(unsafe_path(target, &base));
    }

    Ok(resolved)
}

/// Write `contents` to `target` below `base`
///
/// Returns the path written. Existing files are only replaced with `force`.
pub fn write_within(base: &Path, target: &Path, contents: &str, force: bool) -> Result<PathBuf> {
    let path = resolve_within(base, target)?;

    if path.exists() && !force {
        return Err(CliError::AlreadyExists(path));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    tracing::info!("wrote {} ({} bytes)", path.display(), contents.len());

    Ok(path)
}

fn unsafe_path(target: &Path, base: &Path) -> CliError {
    CliError::UnsafePath {
        path: target.to_path_buf(),
        base: base.to_path_buf(),
    }
}
