//! Read-only template sources.
//! Templates are either compiled into the binary or read from a directory on the host.
//! Both are addressed with slash-separated logical paths relative to the templates root,
//! e.g. `go` or `java/maven/default`.

use crate::constants::TEMPLATES_ROOT;
use crate::error::{Error, Result};
use include_dir::{include_dir, Dir, DirEntry};
use log::debug;
use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

static EMBEDDED_TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Kind of a template entry together with file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File(Cow<'static, [u8]>),
}

/// One entry of a template subtree, relative to the subtree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub relative: PathBuf,
    pub kind: EntryKind,
}

/// Represents where templates are read from.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Templates bundled into the binary
    Embedded(&'static Dir<'static>),
    /// A host directory laid out like the bundled templates root
    FileSystem(PathBuf),
}

impl Default for TemplateSource {
    fn default() -> Self {
        TemplateSource::Embedded(&EMBEDDED_TEMPLATES)
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Embedded(_) => write!(f, "embedded {TEMPLATES_ROOT}"),
            TemplateSource::FileSystem(path) => write!(f, "local path: '{}'", path.display()),
        }
    }
}

impl TemplateSource {
    /// Uses `dir` if given, the embedded templates otherwise.
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(path) => TemplateSource::FileSystem(path),
            None => TemplateSource::default(),
        }
    }

    /// Whether `logical` names an existing directory in this source.
    pub fn contains(&self, logical: &str) -> bool {
        match self {
            TemplateSource::Embedded(root) => root.get_dir(logical).is_some(),
            TemplateSource::FileSystem(root) => root.join(logical).is_dir(),
        }
    }

    /// Host-style path used in messages.
    pub fn describe(&self, logical: &str) -> PathBuf {
        match self {
            TemplateSource::Embedded(_) => Path::new(TEMPLATES_ROOT).join(logical),
            TemplateSource::FileSystem(root) => root.join(logical),
        }
    }

    /// Lists every entry below `logical`, sorted by relative path so parents precede children.
    ///
    /// # Errors
    /// * `Error::TemplateCopyError` if the subtree is missing or an entry cannot be read
    pub fn entries(&self, logical: &str) -> Result<Vec<SourceEntry>> {
        debug!(
            "Listing template entries under {}",
            self.describe(logical).display()
        );

        let mut entries = match self {
            TemplateSource::Embedded(root) => {
                let root: &'static Dir<'static> = root;
                let dir = root.get_dir(logical).ok_or_else(|| {
                    Error::copy(&self.describe(logical), io::ErrorKind::NotFound.into())
                })?;
                let mut entries = Vec::new();
                collect_embedded(dir, Path::new(logical), &mut entries)?;
                entries
            }
            TemplateSource::FileSystem(root) => collect_host(&root.join(logical))?,
        };

        entries.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(entries)
    }
}

fn collect_embedded(
    dir: &'static Dir<'static>,
    base: &Path,
    entries: &mut Vec<SourceEntry>,
) -> Result<()> {
    for entry in dir.entries() {
        let relative = entry
            .path()
            .strip_prefix(base)
            .map_err(|e| Error::copy(entry.path(), io::Error::new(io::ErrorKind::InvalidInput, e)))?
            .to_path_buf();

        match entry {
            DirEntry::Dir(subdir) => {
                entries.push(SourceEntry {
                    relative,
                    kind: EntryKind::Directory,
                });
                collect_embedded(subdir, base, entries)?;
            }
            DirEntry::File(file) => entries.push(SourceEntry {
                relative,
                kind: EntryKind::File(Cow::Borrowed(file.contents())),
            }),
        }
    }
    Ok(())
}

fn collect_host(root: &Path) -> Result<Vec<SourceEntry>> {
    if !root.is_dir() {
        return Err(Error::copy(root, io::ErrorKind::NotFound.into()));
    }

    let mut entries = Vec::new();
    for dir_entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let dir_entry = dir_entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::copy(&path, e.into())
        })?;
        let path = dir_entry.path();
        let relative = path
            .strip_prefix(root)
            .map_err(|e| Error::copy(path, io::Error::new(io::ErrorKind::InvalidInput, e)))?
            .to_path_buf();

        let kind = if dir_entry.file_type().is_dir() {
            EntryKind::Directory
        } else {
            let content = std::fs::read(path).map_err(|e| Error::copy(path, e))?;
            EntryKind::File(Cow::Owned(content))
        };
        entries.push(SourceEntry { relative, kind });
    }
    Ok(entries)
}
