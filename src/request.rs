//! The immutable description of what to scaffold.

use crate::constants::PROJECT_NAME_PLACEHOLDER;
use crate::error::{Error, Result};
use indexmap::IndexSet;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Operations the scaffolder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Create a new project
    New,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::New => write!(f, "new"),
        }
    }
}

/// A validated request handed over by the command-line layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRequest {
    pub operation: Operation,
    /// Lowercased language key, e.g. `go`
    pub language: String,
    pub build_tool: Option<String>,
    pub framework: Option<String>,
    /// Free-form tokens resolved into a build tool and framework, in the order given
    pub dependencies: IndexSet<String>,
    pub project_name: String,
    /// Create `./<project_name>` instead of materializing into the working directory
    pub create_directory: bool,
}

impl ProjectRequest {
    /// Builds a `new` request with no explicit build tool, framework or dependencies.
    pub fn new<L: AsRef<str>, N: Into<String>>(
        language: L,
        project_name: N,
        create_directory: bool,
    ) -> Self {
        Self {
            operation: Operation::New,
            language: language.as_ref().to_ascii_lowercase(),
            build_tool: None,
            framework: None,
            dependencies: IndexSet::new(),
            project_name: project_name.into(),
            create_directory,
        }
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dependencies = dependencies
            .into_iter()
            .map(|d| d.as_ref().to_ascii_lowercase());
        self.dependencies.extend(dependencies);
        self
    }

    pub fn with_build_tool<S: AsRef<str>>(mut self, build_tool: S) -> Self {
        self.build_tool = Some(build_tool.as_ref().to_ascii_lowercase());
        self
    }

    pub fn with_framework<S: AsRef<str>>(mut self, framework: S) -> Self {
        self.framework = Some(framework.as_ref().to_ascii_lowercase());
        self
    }
}

const PROJECT_NAME_PATTERN: &str = r"^[A-Za-z0-9_][A-Za-z0-9._-]*$";

/// Checks that a project name is usable both as a directory name and as substitution text.
///
/// # Errors
/// * `Error::ConfigurationError` for empty names, names with separators, whitespace or a
///   leading dot, and names that contain the placeholder token itself
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::ConfigurationError(
            "project name must not be empty".into(),
        ));
    }
    if name.contains(PROJECT_NAME_PLACEHOLDER) {
        return Err(Error::ConfigurationError(format!(
            "project name '{name}' must not contain '{PROJECT_NAME_PLACEHOLDER}'"
        )));
    }
    let pattern = Regex::new(PROJECT_NAME_PATTERN)
        .map_err(|e| Error::ConfigurationError(e.to_string()))?;
    if !pattern.is_match(name) {
        return Err(Error::ConfigurationError(format!(
            "project name '{name}' may only contain letters, digits, '.', '_' and '-' \
             and must not start with '.' or '-'"
        )));
    }
    Ok(())
}
