//! Entry name normalization after materialization.
//!
//! Two passes run in this order:
//! 1. dot-file notation: `DOTgitignore` becomes `.gitignore`
//! 2. template suffix: `go.mod.template` becomes `go.mod`
//!
//! Both passes work on the explicit list of materialized entries instead of re-reading the
//! directory, rename deepest entries first, and only ever rename an entry's own name component.
//! Each pass returns the entry list with the new names so the next pass sees current paths.

use crate::constants::{DOT_FILE_NOTATION, DOT_FILE_PREFIX, TEMPLATE_FILE_SUFFIX};
use crate::error::{Error, Result};
use crate::materialize::MaterializedEntry;
use globset::{GlobBuilder, GlobMatcher};
use log::debug;
use std::io;
use std::path::{Component, Path, PathBuf};

fn case_insensitive(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::ConfigurationError(format!("invalid name pattern '{pattern}': {e}")))?;
    Ok(glob.compile_matcher())
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

/// Maps every component of `relative` through `rename`.
fn map_components<F>(relative: &Path, rename: F) -> PathBuf
where
    F: Fn(&str) -> String,
{
    relative
        .components()
        .map(|component| match component {
            Component::Normal(name) => match name.to_str() {
                Some(name) => PathBuf::from(rename(name)),
                None => PathBuf::from(name),
            },
            other => PathBuf::from(other.as_os_str()),
        })
        .collect()
}

fn rename_entry(dir: &Path, relative: &Path, new_name: &str) -> Result<()> {
    let from = dir.join(relative);
    let to = from.with_file_name(new_name);
    if to.symlink_metadata().is_ok() {
        return Err(Error::rename(
            &from,
            &to,
            io::ErrorKind::AlreadyExists.into(),
        ));
    }
    debug!("Renaming {} to {}", from.display(), to.display());
    std::fs::rename(&from, &to).map_err(|e| Error::rename(&from, &to, e))
}

/// Renames the entries selected by `matcher` (files only with `only_files`) deepest first and
/// returns `entries` with their paths updated to the new names.
fn rename_pass<F>(
    dir: &Path,
    entries: &[MaterializedEntry],
    matcher: &GlobMatcher,
    only_files: bool,
    rename: F,
) -> Result<Vec<MaterializedEntry>>
where
    F: Fn(&str) -> String,
{
    let new_name = |name: &str| -> String {
        if !matcher.is_match(name) {
            return name.to_string();
        }
        match rename(name) {
            renamed if renamed.is_empty() || renamed == "." || renamed == ".." => name.to_string(),
            renamed => renamed,
        }
    };

    let mut candidates: Vec<&MaterializedEntry> =
        entries.iter().filter(|e| !(only_files && e.is_dir)).collect();
    candidates.sort_by_key(|e| std::cmp::Reverse(e.relative.components().count()));

    for entry in candidates {
        let name = file_name(&entry.relative);
        let renamed = new_name(name);
        if renamed != name {
            rename_entry(dir, &entry.relative, &renamed)?;
        }
    }

    Ok(entries
        .iter()
        .map(|e| {
            let name = file_name(&e.relative);
            let relative = if only_files {
                if e.is_dir || name.is_empty() {
                    e.relative.clone()
                } else {
                    e.relative.with_file_name(new_name(name))
                }
            } else {
                map_components(&e.relative, new_name)
            };
            MaterializedEntry {
                relative,
                is_dir: e.is_dir,
            }
        })
        .collect())
}

/// Replaces the dot-file notation token with a literal dot in every matching entry name.
///
/// Matching is case-insensitive, replacement only touches exact-case tokens.
///
/// # Errors
/// * `Error::RenameError` if a target already exists or the rename fails
pub fn apply_dot_notation(
    dir: &Path,
    entries: &[MaterializedEntry],
) -> Result<Vec<MaterializedEntry>> {
    let matcher = case_insensitive(&format!("*{DOT_FILE_NOTATION}*"))?;
    rename_pass(dir, entries, &matcher, false, |name| {
        name.replace(DOT_FILE_NOTATION, DOT_FILE_PREFIX)
    })
}

/// Strips the template suffix from every matching file name.
///
/// # Errors
/// * `Error::RenameError` if a target already exists or the rename fails
pub fn strip_template_suffix(
    dir: &Path,
    entries: &[MaterializedEntry],
) -> Result<Vec<MaterializedEntry>> {
    let matcher = case_insensitive(&format!("*{TEMPLATE_FILE_SUFFIX}"))?;
    rename_pass(dir, entries, &matcher, true, |name| {
        strip_suffix_ignore_case(name, TEMPLATE_FILE_SUFFIX)
    })
}

fn strip_suffix_ignore_case(name: &str, suffix: &str) -> String {
    let cut = name.len().saturating_sub(suffix.len());
    match name.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(suffix) => name[..cut].to_string(),
        _ => name.to_string(),
    }
}
