//! Destination and template path resolution.

use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Returns the directory the project is materialized into.
///
/// With `create_directory`, a new `<base>/<project_name>` directory is created and returned;
/// otherwise `base` is returned untouched.
///
/// # Errors
/// * `Error::DirectoryPreparationError` if the directory already exists or cannot be created
pub fn resolve_project_dir<P: AsRef<Path>>(
    base: P,
    project_name: &str,
    create_directory: bool,
) -> Result<PathBuf> {
    let base = base.as_ref();
    if !create_directory {
        debug!("Materializing into existing directory {}", base.display());
        return Ok(base.to_path_buf());
    }

    let project_dir = base.join(project_name);
    std::fs::create_dir(&project_dir).map_err(|e| Error::directory(&project_dir, e))?;
    set_directory_mode(&project_dir).map_err(|e| Error::directory(&project_dir, e))?;
    debug!("Created project directory {}", project_dir.display());
    Ok(project_dir)
}

/// Same as [`resolve_project_dir`] relative to the process working directory.
pub fn resolve(project_name: &str, create_directory: bool) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| Error::directory(Path::new("."), e))?;
    resolve_project_dir(cwd, project_name, create_directory)
}

/// Joins the language and the optional build tool / framework axes into a logical template path.
///
/// `template_subtree("java", Some("maven"), Some("quarkus"))` is `java/maven/quarkus`.
pub fn template_subtree(
    language: &str,
    build_tool: Option<&str>,
    framework: Option<&str>,
) -> String {
    [Some(language), build_tool, framework]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
pub(crate) fn set_directory_mode(path: &Path) -> std::io::Result<()> {
    use crate::constants::DIRECTORY_MODE;
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(DIRECTORY_MODE))
}

#[cfg(not(unix))]
pub(crate) fn set_directory_mode(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
