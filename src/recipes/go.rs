//! Go projects: the template tree is self-sufficient, no generator runs.

use super::{Recipe, VariantKey};
use crate::paths::template_subtree;
use crate::policy::{Blueprint, FilePlacementPolicy};
use crate::request::Operation;

pub const LANGUAGE: &str = "go";

pub struct Go;

impl Recipe for Go {
    fn key(&self) -> VariantKey {
        VariantKey::new(Operation::New, LANGUAGE)
    }

    fn blueprint(&self) -> Blueprint {
        let policy = FilePlacementPolicy::new()
            .once(["go.mod", "Makefile"])
            .everywhere(["README.md", "docker-compose.dev.yml"]);
        Blueprint::new(template_subtree(LANGUAGE, None, None), policy)
    }
}
