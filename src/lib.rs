//! craft scaffolds new projects from templates.
//! A request is resolved to a registered language variant whose templates are materialized,
//! optionally completed by an external generator, normalized and personalized with the
//! project name.

/// Command-line interface module for the craft application
pub mod cli;

/// Optional settings file handling
/// Supports JSON and YAML formats (craft.json, craft.yml, craft.yaml)
pub mod config;

/// Placeholder tokens, file name conventions and permission modes
pub mod constants;

/// Error types and handling for the craft application
pub mod error;

/// Logger initialization
pub mod logger;

/// The project request and its validation
pub mod request;

/// Embedded or on-disk template trees
pub mod source;

/// Project directory and template path resolution
pub mod paths;

/// Copying a template subtree into the project directory
pub mod materialize;

/// Project name placeholder substitution
pub mod substitute;

/// Renaming of `DOT` and `.template` entries
pub mod normalize;

/// External generator scripts run under a timeout
pub mod generator;

/// Flattening of generator output into the project root
pub mod hoist;

/// Removal of transient files
pub mod cleanup;

/// Per-variant file placement rules
pub mod policy;

/// Registered languages and their variants
pub mod recipes;

/// Stage sequencing for one request
pub mod orchestrator;
