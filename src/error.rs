//! Error handling for the craft application.
//! Defines the error taxonomy shared by every pipeline stage and the result alias used throughout.

use crate::orchestrator::Stage;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised while scaffolding a project.
///
/// Every pipeline stage maps its failures onto exactly one variant, so the caller can tell
/// which stage failed from the variant alone.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid operation, language, build tool, framework, dependency or project name.
    /// Always raised before the filesystem is touched.
    #[error("Configuration error: {0}.")]
    ConfigurationError(String),

    /// A settings file exists but cannot be parsed.
    #[error("Invalid settings file '{path}': {reason}.")]
    ConfigFileError { path: String, reason: String },

    /// The destination directory cannot be created or accessed.
    #[error("Cannot prepare project directory '{path}': {source}.")]
    DirectoryPreparationError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Reading from the template source or writing into the destination failed.
    #[error("Failed to materialize '{path}': {source}.")]
    TemplateCopyError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Dot-file or suffix normalization could not rename an entry.
    #[error("Failed to rename '{from}' to '{to}': {source}.")]
    RenameError {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },

    /// The external generator could not be prepared, spawned, or exited unsuccessfully.
    #[error("Generator script '{script}' failed: {reason}.")]
    ScriptExecutionError { script: String, reason: String },

    /// Placeholder replacement could not read or rewrite a file.
    #[error("Failed to substitute project name in '{path}': {source}.")]
    SubstitutionError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A transient file could not be removed.
    #[error("Failed to remove '{path}': {source}.")]
    CleanupError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A pipeline stage failed; `stages` is the trace up to and including `Failed`.
    #[error("Stage '{stage}' failed: {source}")]
    StageFailed {
        stage: Stage,
        stages: Vec<Stage>,
        #[source]
        source: Box<Error>,
    },

    /// Any other filesystem error.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

impl Error {
    /// The stage a pipeline run failed in, if this error comes from one.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            Error::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error with any stage context removed.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn directory(path: &Path, source: io::Error) -> Self {
        Error::DirectoryPreparationError {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn copy(path: &Path, source: io::Error) -> Self {
        Error::TemplateCopyError {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn rename(from: &Path, to: &Path, source: io::Error) -> Self {
        Error::RenameError {
            from: from.display().to_string(),
            to: to.display().to_string(),
            source,
        }
    }

    pub(crate) fn script<S: Into<String>>(script: &Path, reason: S) -> Self {
        Error::ScriptExecutionError {
            script: script.display().to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn substitution(path: &Path, source: io::Error) -> Self {
        Error::SubstitutionError {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn cleanup(path: &Path, source: io::Error) -> Self {
        Error::CleanupError {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Convenience type alias for Results with craft's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// Prints the error message to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
