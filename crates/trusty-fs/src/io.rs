//! Blocking reads used during extension discovery

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// List the immediate, non-hidden subdirectories of `dir`, sorted by name.
///
/// A missing `dir` yields an empty list; search roots are allowed to be
/// absent. Symlinks are followed, so a linked extension checkout counts as a
/// directory.
pub fn list_subdirectories(dir: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let native = dir.to_native();
    if !native.exists() {
        tracing::debug!(path = %dir, "Search root does not exist, skipping");
        return Ok(Vec::new());
    }
    if !native.is_dir() {
        return Err(Error::NotADirectory { path: native });
    }

    let entries = fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;
    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native, e))?;
        let entry_path = entry.path();
        if !entry_path.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::debug!(
                path = %entry_path.display(),
                "Skipping directory whose name is not valid UTF-8"
            );
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        found.push(dir.join(name));
    }
    found.sort();
    Ok(found)
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file, or `None` when it does not exist.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    read_text(path).map(Some)
}

/// Whether two paths refer to the same filesystem location.
///
/// Both sides are canonicalized when possible; paths that cannot be
/// canonicalized (typically because they do not exist yet) are compared in
/// normalized form.
pub fn same_location(a: &NormalizedPath, b: &NormalizedPath) -> bool {
    match (
        dunce::canonicalize(a.to_native()),
        dunce::canonicalize(b.to_native()),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
