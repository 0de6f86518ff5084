//! Flattening of a generator-created subdirectory into its parent.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Moves every entry of `nested_dir` one level up and deletes `nested_dir`.
///
/// Existing files in the parent are overwritten, existing directories are merged into.
/// The nested directory is first moved aside so that an entry sharing its name
/// (`root/demo/demo`) is hoisted like any other.
///
/// # Errors
/// * `Error::TemplateCopyError` if `nested_dir` is missing or any entry cannot be copied
/// * `Error::CleanupError` if the emptied directory cannot be removed
pub fn hoist(nested_dir: &Path) -> Result<()> {
    let parent = nested_dir
        .parent()
        .ok_or_else(|| Error::copy(nested_dir, io::ErrorKind::InvalidInput.into()))?;
    if !nested_dir.is_dir() {
        return Err(Error::copy(nested_dir, io::ErrorKind::NotFound.into()));
    }

    let staging = staging_path(nested_dir);
    debug!(
        "Hoisting {} into {}",
        nested_dir.display(),
        parent.display()
    );
    fs::rename(nested_dir, &staging).map_err(|e| Error::copy(nested_dir, e))?;

    copy_dir_contents(&staging, parent)?;

    fs::remove_dir_all(&staging).map_err(|e| Error::cleanup(&staging, e))
}

fn staging_path(nested_dir: &Path) -> PathBuf {
    let name = nested_dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    nested_dir.with_file_name(format!(".{}.hoist-{}", name, std::process::id()))
}

/// Recursively copies the contents of `from` into `to`, overwriting files.
fn copy_dir_contents(from: &Path, to: &Path) -> Result<()> {
    for dir_entry in WalkDir::new(from).min_depth(1).sort_by_file_name() {
        let dir_entry = dir_entry.map_err(|e| {
            let path = e.path().unwrap_or(from).to_path_buf();
            Error::copy(&path, e.into())
        })?;
        let source = dir_entry.path();
        let relative = source
            .strip_prefix(from)
            .map_err(|e| Error::copy(source, io::Error::new(io::ErrorKind::InvalidInput, e)))?;
        let target = to.join(relative);

        if dir_entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::copy(&target, e))?;
        } else {
            fs::copy(source, &target).map_err(|e| Error::copy(&target, e))?;
        }
    }
    Ok(())
}
