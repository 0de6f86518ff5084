//! Immutable per-variant configuration handed to the pipeline.

use crate::error::{Error, Result};

/// Which materialized files get which treatment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePlacementPolicy {
    /// Placeholder replaced on its first occurrence only
    pub replace_once: Vec<String>,
    /// Placeholder replaced everywhere
    pub replace_everywhere: Vec<String>,
    /// Deleted once the project is complete
    pub remove: Vec<String>,
}

fn owned<I, S>(files: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    files.into_iter().map(Into::into)
}

impl FilePlacementPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn once<I: IntoIterator<Item = S>, S: Into<String>>(mut self, files: I) -> Self {
        self.replace_once.extend(owned(files));
        self
    }

    pub fn everywhere<I: IntoIterator<Item = S>, S: Into<String>>(mut self, files: I) -> Self {
        self.replace_everywhere.extend(owned(files));
        self
    }

    pub fn remove<I: IntoIterator<Item = S>, S: Into<String>>(mut self, files: I) -> Self {
        self.remove.extend(owned(files));
        self
    }

    /// A file may be in at most one of the two substitution sets.
    pub fn validate(&self) -> Result<()> {
        if let Some(file) = self.replace_once.iter().find(|f| self.replace_everywhere.contains(f)) {
            return Err(Error::ConfigurationError(format!(
                "'{file}' is listed for both single and full project name replacement"
            )));
        }
        Ok(())
    }
}

/// The external generator a variant needs, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSpec {
    /// Script name inside the materialized tree
    pub script: String,
    /// Entries the generator creates in its nested directory that must not replace ours
    pub remove_before_hoist: Vec<String>,
    /// Container image the generator leaves behind on the host
    pub leftover_image: Option<String>,
}

impl GeneratorSpec {
    pub fn new<S: Into<String>>(script: S) -> Self {
        Self {
            script: script.into(),
            remove_before_hoist: Vec::new(),
            leftover_image: None,
        }
    }

    pub fn remove_before_hoist<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        files: I,
    ) -> Self {
        self.remove_before_hoist.extend(owned(files));
        self
    }

    pub fn leftover_image<S: Into<String>>(mut self, image: S) -> Self {
        self.leftover_image = Some(image.into());
        self
    }
}

/// Puts the content of our partial README in place of the generator README's title line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeSplice {
    pub partial: String,
    pub target: String,
}

/// Everything the pipeline needs to know about one registered variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    /// Logical template path, e.g. `java/maven/quarkus`
    pub template_path: String,
    pub policy: FilePlacementPolicy,
    pub generator: Option<GeneratorSpec>,
    pub readme_splice: Option<ReadmeSplice>,
}

impl Blueprint {
    pub fn new<S: Into<String>>(template_path: S, policy: FilePlacementPolicy) -> Self {
        Self {
            template_path: template_path.into(),
            policy,
            generator: None,
            readme_splice: None,
        }
    }

    pub fn with_generator(mut self, generator: GeneratorSpec) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_readme_splice<P: Into<String>, T: Into<String>>(
        mut self,
        partial: P,
        target: T,
    ) -> Self {
        self.readme_splice = Some(ReadmeSplice {
            partial: partial.into(),
            target: target.into(),
        });
        self
    }
}
