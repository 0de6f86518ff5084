//! Common constants used throughout the craft application.

/// Literal token in template file contents that stands in for the project name
pub const PROJECT_NAME_PLACEHOLDER: &str = "PROJECT_NAME";

/// Token in template entry names that stands in for a leading dot
pub const DOT_FILE_NOTATION: &str = "DOT";

/// What [`DOT_FILE_NOTATION`] becomes once materialized
pub const DOT_FILE_PREFIX: &str = ".";

/// Suffix marking a template-only file name, stripped once materialized
pub const TEMPLATE_FILE_SUFFIX: &str = ".template";

/// Files ending in this suffix are made executable when materialized
pub const SHELL_SCRIPT_SUFFIX: &str = ".sh";

/// Name of the templates root, both on disk and inside the binary
pub const TEMPLATES_ROOT: &str = "templates";

/// Supported settings file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["craft.json", "craft.yml", "craft.yaml"];

/// rwxrwx--x
pub const SCRIPT_MODE: u32 = 0o771;

/// rwxrwxr-x
pub const DIRECTORY_MODE: u32 = 0o775;
