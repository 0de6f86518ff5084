//! Java projects: a containerized Maven or Quarkus generator creates the build files.

use super::{Axes, Recipe, VariantKey};
use crate::error::{Error, Result};
use crate::paths::template_subtree;
use crate::policy::{Blueprint, FilePlacementPolicy, GeneratorSpec};
use crate::request::{Operation, ProjectRequest};

pub const LANGUAGE: &str = "java";

const MAVEN: &str = "maven";
const GRADLE: &str = "gradle";
const SPRINGBOOT: &str = "springboot";
const QUARKUS: &str = "quarkus";
const SETUP_SCRIPT: &str = "create_java_project.sh";

/// Build tools and the frameworks each one allows; `None` means no framework.
const ALLOWED_COMBINATIONS: &[(&str, &[Option<&str>])] =
    &[(MAVEN, &[None, Some(SPRINGBOOT), Some(QUARKUS)])];

fn allowed_build_tools() -> Vec<&'static str> {
    ALLOWED_COMBINATIONS.iter().map(|(tool, _)| *tool).collect()
}

fn allowed_dependencies() -> Vec<&'static str> {
    let mut dependencies = allowed_build_tools();
    for (_, frameworks) in ALLOWED_COMBINATIONS {
        for framework in frameworks.iter().flatten() {
            if !dependencies.contains(framework) {
                dependencies.push(*framework);
            }
        }
    }
    dependencies
}

fn normalize_framework(framework: Option<&str>) -> Option<String> {
    match framework {
        None | Some("") | Some("none") | Some("default") => None,
        Some("spring") => Some(SPRINGBOOT.to_string()),
        Some(other) => Some(other.to_string()),
    }
}

/// Resolves Java dependency tokens into a build tool and framework.
///
/// Starts from the request's explicit axes (defaulting to Maven without a framework) and lets
/// each token override them in order.
///
/// # Errors
/// * `Error::ConfigurationError` for unknown tokens and disallowed combinations
pub fn resolve_axes(request: &ProjectRequest) -> Result<Axes> {
    let mut build_tool = request.build_tool.clone().unwrap_or_else(|| MAVEN.to_string());
    let mut framework = normalize_framework(request.framework.as_deref());

    for dependency in &request.dependencies {
        match dependency.as_str() {
            "spring" | SPRINGBOOT => framework = Some(SPRINGBOOT.to_string()),
            QUARKUS => framework = Some(QUARKUS.to_string()),
            MAVEN | GRADLE => build_tool = dependency.clone(),
            other => {
                return Err(Error::ConfigurationError(format!(
                    "unsupported dependency '{other}', allowed dependencies are: {}",
                    allowed_dependencies().join(", ")
                )))
            }
        }
    }

    validate_combination(&build_tool, framework.as_deref())?;
    Ok((Some(build_tool), framework))
}

fn validate_combination(build_tool: &str, framework: Option<&str>) -> Result<()> {
    let frameworks = ALLOWED_COMBINATIONS
        .iter()
        .find(|(tool, _)| *tool == build_tool)
        .map(|(_, frameworks)| *frameworks)
        .ok_or_else(|| {
            Error::ConfigurationError(format!(
                "unsupported build tool '{build_tool}', allowed build tools are: {}",
                allowed_build_tools().join(", ")
            ))
        })?;

    if frameworks.contains(&framework) {
        return Ok(());
    }

    let allowed: Vec<&str> = frameworks.iter().map(|f| f.unwrap_or("none")).collect();
    Err(Error::ConfigurationError(format!(
        "build tool '{build_tool}' does not support framework '{}', allowed frameworks are: {}",
        framework.unwrap_or("none"),
        allowed.join(", ")
    )))
}

/// A Maven project, plain or with a framework.
pub struct JavaMaven {
    framework: Option<&'static str>,
}

impl JavaMaven {
    pub fn plain() -> Self {
        Self { framework: None }
    }

    pub fn quarkus() -> Self {
        Self {
            framework: Some(QUARKUS),
        }
    }
}

impl Recipe for JavaMaven {
    fn key(&self) -> VariantKey {
        VariantKey::new(Operation::New, LANGUAGE)
            .build_tool(MAVEN)
            .framework(self.framework)
    }

    fn blueprint(&self) -> Blueprint {
        let template_path = template_subtree(
            LANGUAGE,
            Some(MAVEN),
            Some(self.framework.unwrap_or("default")),
        );

        match self.framework {
            Some(QUARKUS) => {
                let policy = FilePlacementPolicy::new()
                    .once(["Makefile"])
                    .everywhere(["partialREADME.md", "docker-compose.dev.yml"])
                    .remove(["build.Dockerfile", SETUP_SCRIPT, "partialREADME.md"]);
                // Quarkus writes its own ignore files; ours replace them
                let generator = GeneratorSpec::new(SETUP_SCRIPT)
                    .remove_before_hoist([".dockerignore", ".gitignore"])
                    .leftover_image("quarkus-project-generator:latest");

                Blueprint::new(template_path, policy)
                    .with_generator(generator)
                    .with_readme_splice("partialREADME.md", "README.md")
            }
            _ => {
                let policy = FilePlacementPolicy::new()
                    .once(["Makefile"])
                    .everywhere(["README.md", "docker-compose.dev.yml"])
                    .remove(["build.Dockerfile", SETUP_SCRIPT]);
                let generator = GeneratorSpec::new(SETUP_SCRIPT)
                    .leftover_image("maven-project-generator:latest");

                Blueprint::new(template_path, policy).with_generator(generator)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn java(dependencies: &[&str]) -> ProjectRequest {
        ProjectRequest::new("java", "demo", true).with_dependencies(dependencies)
    }

    #[test]
    fn test_defaults_to_plain_maven() {
        assert_eq!(
            resolve_axes(&java(&[])).unwrap(),
            (Some("maven".into()), None)
        );
    }

    #[test]
    fn test_quarkus_dependency() {
        let axes = resolve_axes(&java(&["Maven", "Quarkus"])).unwrap();
        assert_eq!(axes, (Some("maven".into()), Some("quarkus".into())));
    }

    #[test]
    fn test_spring_alias() {
        let axes = resolve_axes(&java(&["spring"])).unwrap();
        assert_eq!(axes.1.as_deref(), Some("springboot"));
    }

    #[test]
    fn test_gradle_is_rejected() {
        match resolve_axes(&java(&["gradle"])) {
            Err(Error::ConfigurationError(msg)) => {
                assert!(msg.contains("unsupported build tool"))
            }
            other => panic!("Expected ConfigurationError, got {other:?}"),
        }
        let explicit = ProjectRequest::new("java", "demo", true).with_build_tool("gradle");
        assert!(matches!(
            resolve_axes(&explicit),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_unknown_framework_is_rejected() {
        let request = ProjectRequest::new("java", "demo", true).with_framework("micronaut");
        assert!(matches!(
            resolve_axes(&request),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_blueprint_template_paths() {
        assert_eq!(
            JavaMaven::plain().blueprint().template_path,
            "java/maven/default"
        );
        assert_eq!(
            JavaMaven::quarkus().blueprint().template_path,
            "java/maven/quarkus"
        );
    }
}
