//! Registry of scaffolding variants.
//!
//! A variant is identified by `(operation, language, build tool, framework)`. Languages register
//! how their dependency tokens resolve into the build tool / framework axes, and each variant
//! registers the [`Blueprint`] the pipeline runs with. Supporting a new combination is a
//! registration, not a new branch in the pipeline.

pub mod go;
pub mod java;
pub mod rust;

use crate::error::{Error, Result};
use crate::policy::Blueprint;
use crate::request::{Operation, ProjectRequest};
use indexmap::IndexMap;
use log::debug;
use std::fmt;

/// Resolved build tool and framework of a request.
pub type Axes = (Option<String>, Option<String>);

/// Turns a request's explicit axes and dependency tokens into resolved axes.
pub type AxisResolver = fn(&ProjectRequest) -> Result<Axes>;

/// Structural key of a registered variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub operation: Operation,
    pub language: String,
    pub build_tool: Option<String>,
    pub framework: Option<String>,
}

impl VariantKey {
    pub fn new<S: Into<String>>(operation: Operation, language: S) -> Self {
        Self {
            operation,
            language: language.into(),
            build_tool: None,
            framework: None,
        }
    }

    pub fn build_tool<S: Into<String>>(mut self, build_tool: S) -> Self {
        self.build_tool = Some(build_tool.into());
        self
    }

    pub fn framework<S: Into<String>>(mut self, framework: Option<S>) -> Self {
        self.framework = framework.map(Into::into);
        self
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.language)?;
        if let Some(build_tool) = &self.build_tool {
            write!(f, " with {build_tool}")?;
        }
        if let Some(framework) = &self.framework {
            write!(f, " and {framework}")?;
        }
        Ok(())
    }
}

/// A registered scaffolding variant.
pub trait Recipe {
    fn key(&self) -> VariantKey;

    /// Builds a fresh, immutable blueprint for one run.
    fn blueprint(&self) -> Blueprint;
}

/// Rejects every dependency token; used by languages without build tool or framework choices.
pub fn no_axes(request: &ProjectRequest) -> Result<Axes> {
    match request.dependencies.first() {
        Some(dependency) => Err(Error::ConfigurationError(format!(
            "language '{}' does not take dependencies, got '{dependency}'",
            request.language
        ))),
        None => Ok((None, None)),
    }
}

/// Lookup table from language and variant key to recipe.
pub struct Registry {
    languages: IndexMap<(Operation, String), AxisResolver>,
    recipes: IndexMap<VariantKey, Box<dyn Recipe>>,
}

impl Default for Registry {
    /// The registry with every built-in variant.
    fn default() -> Self {
        let mut registry = Registry::empty();
        registry.register_language(Operation::New, go::LANGUAGE, no_axes);
        registry.register_language(Operation::New, rust::LANGUAGE, no_axes);
        registry.register_language(Operation::New, java::LANGUAGE, java::resolve_axes);
        registry.register(Box::new(go::Go));
        registry.register(Box::new(rust::Rust));
        registry.register(Box::new(java::JavaMaven::plain()));
        registry.register(Box::new(java::JavaMaven::quarkus()));
        registry
    }
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            languages: IndexMap::new(),
            recipes: IndexMap::new(),
        }
    }

    pub fn register_language<S: Into<String>>(
        &mut self,
        operation: Operation,
        language: S,
        resolver: AxisResolver,
    ) {
        self.languages.insert((operation, language.into()), resolver);
    }

    pub fn register(&mut self, recipe: Box<dyn Recipe>) {
        self.recipes.insert(recipe.key(), recipe);
    }

    /// Languages registered for `operation`, in registration order.
    pub fn languages(&self, operation: Operation) -> Vec<&str> {
        self.languages
            .keys()
            .filter(|(op, _)| *op == operation)
            .map(|(_, language)| language.as_str())
            .collect()
    }

    /// Resolves the variant key for a request.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` for unregistered languages and invalid dependency tokens
    pub fn resolve_key(&self, request: &ProjectRequest) -> Result<VariantKey> {
        let resolver = self
            .languages
            .get(&(request.operation, request.language.clone()))
            .ok_or_else(|| {
                Error::ConfigurationError(format!(
                    "operation '{}' cannot be performed with language '{}', allowed languages are: {}",
                    request.operation,
                    request.language,
                    self.languages(request.operation).join(", ")
                ))
            })?;

        let (build_tool, framework) = resolver(request)?;
        Ok(VariantKey {
            operation: request.operation,
            language: request.language.clone(),
            build_tool,
            framework,
        })
    }

    /// Finds the blueprint for a request.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if the request does not resolve to a registered variant
    pub fn blueprint_for(&self, request: &ProjectRequest) -> Result<Blueprint> {
        let key = self.resolve_key(request)?;
        debug!("Resolved variant: {key}");
        let recipe = self.recipes.get(&key).ok_or_else(|| {
            Error::ConfigurationError(format!(
                "setting up a project for '{key}' is not supported yet"
            ))
        })?;
        Ok(recipe.blueprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_languages() {
        let registry = Registry::default();
        assert_eq!(registry.languages(Operation::New), ["go", "rust", "java"]);
    }

    #[test]
    fn test_unknown_language() {
        let registry = Registry::default();
        let request = ProjectRequest::new("cobol", "demo", true);
        assert!(matches!(
            registry.blueprint_for(&request),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_go_rejects_dependencies() {
        let registry = Registry::default();
        let request = ProjectRequest::new("go", "demo", true).with_dependencies(["quarkus"]);
        assert!(matches!(
            registry.blueprint_for(&request),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_variant_key_display() {
        let key =
            VariantKey::new(Operation::New, "java").build_tool("maven").framework(Some("quarkus"));
        assert_eq!(key.to_string(), "new java with maven and quarkus");
    }
}
