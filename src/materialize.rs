//! Copies a template subtree into the project directory.

use crate::constants::{SCRIPT_MODE, SHELL_SCRIPT_SUFFIX};
use crate::error::{Error, Result};
use crate::paths::set_directory_mode;
use crate::source::{EntryKind, TemplateSource};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// An entry written by [`copy_tree`], relative to the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedEntry {
    pub relative: PathBuf,
    pub is_dir: bool,
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::copy(path, e))?;
    set_directory_mode(path).map_err(|e| Error::copy(path, e))
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::copy(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::copy(path, e))?;

    if is_shell_script(path) {
        debug!("Marking {} executable", path.display());
        set_executable(path).map_err(|e| Error::copy(path, e))?;
    }
    Ok(())
}

pub fn is_shell_script(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(SHELL_SCRIPT_SUFFIX))
}

/// Grants rwxrwx--x on unix; a no-op elsewhere.
#[cfg(unix)]
pub fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(SCRIPT_MODE))
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Recursively copies every entry under `logical_root` of `source` into `dest_root`.
///
/// Directories are created with rwxrwxr-x, files are copied byte for byte and shell scripts
/// are made executable. The walk stops at the first failure; whatever was already written stays.
///
/// # Returns
/// * The written entries in walk order, parents before children
///
/// # Errors
/// * `Error::TemplateCopyError` on any read or write failure
pub fn copy_tree(
    source: &TemplateSource,
    logical_root: &str,
    dest_root: &Path,
) -> Result<Vec<MaterializedEntry>> {
    debug!(
        "Copying {} into {}",
        source.describe(logical_root).display(),
        dest_root.display()
    );

    let mut written = Vec::new();
    for entry in source.entries(logical_root)? {
        let target = dest_root.join(&entry.relative);
        match &entry.kind {
            EntryKind::Directory => create_dir_all(&target)?,
            EntryKind::File(content) => write_file(&target, content)?,
        }
        written.push(MaterializedEntry {
            relative: entry.relative,
            is_dir: matches!(entry.kind, EntryKind::Directory),
        });
    }

    debug!("Materialized {} entries", written.len());
    Ok(written)
}
