//! Sequences the pipeline stages for one request.
//!
//! ```text
//! ResolveDir -> Materialize -> [InvokeGenerator -> AwaitExit -> Hoist] -> NormalizeDotfiles
//!            -> StripSuffixes -> Substitute -> Cleanup -> Done
//! ```
//!
//! The bracketed stages only run for variants with an external generator. The first failing
//! stage ends the run in `Failed`; nothing that already happened is rolled back.

use crate::cleanup;
use crate::constants::PROJECT_NAME_PLACEHOLDER;
use crate::error::{Error, Result};
use crate::generator::{self, GeneratorInvocation};
use crate::hoist::hoist;
use crate::materialize::copy_tree;
use crate::normalize::{apply_dot_notation, strip_template_suffix};
use crate::paths::{resolve, resolve_project_dir};
use crate::policy::{Blueprint, ReadmeSplice};
use crate::recipes::Registry;
use crate::request::{validate_project_name, ProjectRequest};
use crate::source::TemplateSource;
use crate::substitute::{substitute, substitute_in_file, Replace};
use log::{debug, error, info};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pipeline states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pending,
    ResolveDir,
    Materialize,
    InvokeGenerator,
    AwaitExit,
    Hoist,
    NormalizeDotfiles,
    StripSuffixes,
    Substitute,
    Cleanup,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Pending => "pending",
            Stage::ResolveDir => "resolve directory",
            Stage::Materialize => "materialize templates",
            Stage::InvokeGenerator => "invoke generator",
            Stage::AwaitExit => "await generator exit",
            Stage::Hoist => "hoist generated files",
            Stage::NormalizeDotfiles => "normalize dot-files",
            Stage::StripSuffixes => "strip template suffixes",
            Stage::Substitute => "substitute project name",
            Stage::Cleanup => "cleanup",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub project_dir: PathBuf,
    /// Stages that ran, in order, ending with `Done`
    pub stages: Vec<Stage>,
    /// Container image the generator left on the host, if any
    pub leftover_image: Option<String>,
    /// Transient files that could not be removed
    pub cleanup_failures: usize,
}

/// Runs one request through the pipeline. Single-shot: [`Orchestrator::run`] consumes it.
pub struct Orchestrator {
    request: ProjectRequest,
    blueprint: Blueprint,
    source: TemplateSource,
    base_dir: Option<PathBuf>,
    generator_timeout: Option<Duration>,
    stages: Vec<Stage>,
}

impl Orchestrator {
    /// Validates the request and looks up its variant. Touches nothing on disk.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` for invalid names and unsupported combinations
    pub fn new(request: ProjectRequest, registry: &Registry) -> Result<Self> {
        validate_project_name(&request.project_name)?;
        let blueprint = registry.blueprint_for(&request)?;
        blueprint.policy.validate()?;

        Ok(Self {
            request,
            blueprint,
            source: TemplateSource::default(),
            base_dir: None,
            generator_timeout: None,
            stages: Vec::new(),
        })
    }

    /// Replaces the template source (embedded templates by default).
    pub fn set_template_source(&mut self, source: TemplateSource) {
        self.source = source;
    }

    pub fn with_template_source(mut self, source: TemplateSource) -> Self {
        self.set_template_source(source);
        self
    }

    /// Directory the project is created in (process working directory by default).
    pub fn in_dir<P: Into<PathBuf>>(mut self, base_dir: P) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn with_generator_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.generator_timeout = timeout;
        self
    }

    fn enter(&mut self, stage: Stage) {
        debug!("Stage: {stage}");
        self.stages.push(stage);
    }

    fn current(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Pending)
    }

    /// Runs every stage to completion or to the first failure.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if the template is missing from the source (nothing is
    ///   written)
    /// * `Error::StageFailed` wrapping the failure of any later stage, with the stage trace
    pub fn run(mut self) -> Result<Outcome> {
        if let Ok(request) = serde_json::to_string(&self.request) {
            debug!("Request: {request}");
        }

        match self.execute() {
            Ok(outcome) => Ok(outcome),
            Err(e) if self.current() == Stage::Pending => Err(e),
            Err(e) => {
                let stage = self.current();
                error!("Stage '{stage}' failed");
                self.enter(Stage::Failed);
                Err(Error::StageFailed {
                    stage,
                    stages: self.stages,
                    source: Box::new(e),
                })
            }
        }
    }

    fn execute(&mut self) -> Result<Outcome> {
        let template_path = self.blueprint.template_path.clone();
        if !self.source.contains(&template_path) {
            return Err(Error::ConfigurationError(format!(
                "template '{}' not found in {}",
                template_path, self.source
            )));
        }

        let name = self.request.project_name.clone();
        let create_directory = self.request.create_directory;

        self.enter(Stage::ResolveDir);
        let project_dir = match &self.base_dir {
            Some(base_dir) => resolve_project_dir(base_dir, &name, create_directory)?,
            None => resolve(&name, create_directory)?,
        };
        info!("The project directory: {}", project_dir.display());

        self.enter(Stage::Materialize);
        let entries = copy_tree(&self.source, &template_path, &project_dir)?;

        let mut leftover_image = None;
        if let Some(setup) = self.blueprint.generator.clone() {
            self.enter(Stage::InvokeGenerator);
            let script = project_dir.join(&setup.script);
            let invocation = GeneratorInvocation::new(script, &project_dir)
                .arg(name.as_str())
                .timeout(self.generator_timeout);
            let running = generator::spawn(&invocation)?;

            self.enter(Stage::AwaitExit);
            debug!("Waiting for generator process {}", running.id());
            running.wait()?;

            self.enter(Stage::Hoist);
            let nested = project_dir.join(&name);
            cleanup::remove(&nested, &setup.remove_before_hoist)?;
            hoist(&nested)?;
            leftover_image = setup.leftover_image;
        }

        self.enter(Stage::NormalizeDotfiles);
        let entries = apply_dot_notation(&project_dir, &entries)?;

        self.enter(Stage::StripSuffixes);
        strip_template_suffix(&project_dir, &entries)?;

        self.enter(Stage::Substitute);
        let policy = &self.blueprint.policy;
        substitute(
            &project_dir,
            &policy.replace_once,
            PROJECT_NAME_PLACEHOLDER,
            &name,
            false,
        )?;
        substitute(
            &project_dir,
            &policy.replace_everywhere,
            PROJECT_NAME_PLACEHOLDER,
            &name,
            true,
        )?;
        if let Some(splice) = &self.blueprint.readme_splice {
            splice_readme(&project_dir, splice, &name)?;
        }

        self.enter(Stage::Cleanup);
        let cleanup_failures = cleanup::remove_or_warn(&project_dir, &self.blueprint.policy.remove);

        self.enter(Stage::Done);
        Ok(Outcome {
            project_dir,
            stages: self.stages.clone(),
            leftover_image,
            cleanup_failures,
        })
    }
}

/// Replaces the generator README's `# <name>` title with the content of our partial README.
fn splice_readme(project_dir: &Path, splice: &ReadmeSplice, name: &str) -> Result<()> {
    let partial_path = project_dir.join(&splice.partial);
    let partial =
        std::fs::read_to_string(&partial_path).map_err(|e| Error::substitution(&partial_path, e))?;
    let title = format!("# {name}");
    substitute_in_file(
        &project_dir.join(&splice.target),
        &title,
        partial.trim_end_matches('\n'),
        Replace::Once,
    )
}
