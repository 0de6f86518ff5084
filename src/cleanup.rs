//! Removal of transient files such as setup scripts and generator Dockerfiles.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::Path;

/// Removes a file or directory tree. A missing path is not an error.
///
/// # Returns
/// * `true` if something was removed
pub fn remove_path(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::cleanup(path, e)),
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match removed {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::cleanup(path, e)),
    }
}

/// Removes each of `files` below `dir`, stopping at the first failure.
pub fn remove<S: AsRef<str>>(dir: &Path, files: &[S]) -> Result<()> {
    for file in files {
        remove_path(&dir.join(file.as_ref()))?;
    }
    Ok(())
}

/// Like [`remove`] but keeps going and downgrades failures to warnings.
///
/// # Returns
/// * The number of entries that could not be removed
pub fn remove_or_warn<S: AsRef<str>>(dir: &Path, files: &[S]) -> usize {
    files
        .iter()
        .filter(|file| match remove_path(&dir.join(file.as_ref())) {
            Ok(_) => false,
            Err(e) => {
                warn!("{e}");
                true
            }
        })
        .count()
}
