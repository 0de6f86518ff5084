//! Placeholder replacement inside materialized files.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// How many occurrences of the placeholder a file gets replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replace {
    /// Only the first occurrence in the whole file
    Once,
    /// Every occurrence on every line
    Everywhere,
}

/// Replaces `placeholder` in `content` line by line, keeping each line terminator as it was.
pub fn replace_in_text(
    content: &str,
    placeholder: &str,
    replacement: &str,
    mode: Replace,
) -> String {
    let mut replaced = false;
    let mut output = String::with_capacity(content.len());

    for line in content.split_inclusive('\n') {
        if !line.contains(placeholder) {
            output.push_str(line);
            continue;
        }
        match mode {
            Replace::Everywhere => output.push_str(&line.replace(placeholder, replacement)),
            Replace::Once if !replaced => {
                output.push_str(&line.replacen(placeholder, replacement, 1));
                replaced = true;
            }
            Replace::Once => output.push_str(line),
        }
    }
    output
}

/// Rewrites a single file in place (truncate and rewrite, not atomic).
///
/// # Errors
/// * `Error::SubstitutionError` if the file cannot be read as UTF-8 or cannot be written
pub fn substitute_in_file(
    path: &Path,
    placeholder: &str,
    replacement: &str,
    mode: Replace,
) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| Error::substitution(path, e))?;
    let updated = replace_in_text(&content, placeholder, replacement, mode);
    if updated != content {
        debug!(
            "Substituted '{}' in {} ({:?})",
            placeholder,
            path.display(),
            mode
        );
        fs::write(path, updated).map_err(|e| Error::substitution(path, e))?;
    }
    Ok(())
}

/// Replaces `placeholder` with `replacement` in each of `files`, relative to `dir`.
///
/// `all` selects [`Replace::Everywhere`], otherwise [`Replace::Once`] applies per file.
/// Stops at the first failing file.
pub fn substitute<S: AsRef<str>>(
    dir: &Path,
    files: &[S],
    placeholder: &str,
    replacement: &str,
    all: bool,
) -> Result<()> {
    let mode = if all {
        Replace::Everywhere
    } else {
        Replace::Once
    };
    for file in files {
        substitute_in_file(&dir.join(file.as_ref()), placeholder, replacement, mode)?;
    }
    Ok(())
}
