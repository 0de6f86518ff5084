//! Rust projects: `cargo new` runs inside a container and its output is hoisted.

use super::{Recipe, VariantKey};
use crate::paths::template_subtree;
use crate::policy::{Blueprint, FilePlacementPolicy, GeneratorSpec};
use crate::request::Operation;

pub const LANGUAGE: &str = "rust";

const SETUP_SCRIPT: &str = "create_rust_project.sh";

pub struct Rust;

impl Recipe for Rust {
    fn key(&self) -> VariantKey {
        VariantKey::new(Operation::New, LANGUAGE)
    }

    fn blueprint(&self) -> Blueprint {
        let policy = FilePlacementPolicy::new()
            .once(["Makefile"])
            .everywhere(["README.md", "docker-compose.dev.yml"])
            .remove(["build.Dockerfile", SETUP_SCRIPT]);
        // cargo initialises its own repository and ignore file; ours are kept instead
        let generator = GeneratorSpec::new(SETUP_SCRIPT)
            .remove_before_hoist([".gitignore", ".git"])
            .leftover_image("rust-project-generator:latest");

        Blueprint::new(template_subtree(LANGUAGE, None, None), policy).with_generator(generator)
    }
}
