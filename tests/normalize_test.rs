use craft::error::Error;
use craft::materialize::{copy_tree, MaterializedEntry};
use craft::normalize::{apply_dot_notation, strip_template_suffix};
use craft::source::TemplateSource;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn materialize(files: &[&str]) -> (TempDir, TempDir, Vec<MaterializedEntry>) {
    let templates = TempDir::new().unwrap();
    let root = templates.path().join("t");
    for file in files {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, *file).unwrap();
    }
    let dest = TempDir::new().unwrap();
    let source = TemplateSource::FileSystem(templates.path().into());
    let entries = copy_tree(&source, "t", dest.path()).unwrap();
    (templates, dest, entries)
}

#[test]
fn test_dot_notation_and_suffix() {
    let (_templates, dest, entries) = materialize(&[
        "DOTgitignore",
        "go.mod.template",
        "DOTenv.template",
        "main.go",
    ]);

    let entries = apply_dot_notation(dest.path(), &entries).unwrap();
    strip_template_suffix(dest.path(), &entries).unwrap();

    for name in [".gitignore", "go.mod", ".env", "main.go"] {
        assert!(dest.path().join(name).is_file(), "{name}");
    }
    for name in ["DOTgitignore", "go.mod.template", "DOTenv.template"] {
        assert!(!dest.path().join(name).exists(), "{name}");
    }
}

#[test]
fn test_nested_dot_directories() {
    let (_templates, dest, entries) = materialize(&["DOTgithub/workflows/ci.yml.template"]);

    let entries = apply_dot_notation(dest.path(), &entries).unwrap();
    let entries = strip_template_suffix(dest.path(), &entries).unwrap();

    assert!(dest.path().join(".github/workflows/ci.yml").is_file());
    let workflow = Path::new(".github/workflows/ci.yml");
    assert!(entries.iter().any(|e| e.relative == workflow));
}

#[test]
fn test_case_insensitive_match_exact_case_replacement() {
    let (_templates, dest, entries) = materialize(&["dotfile", "README.TEMPLATE"]);

    let entries = apply_dot_notation(dest.path(), &entries).unwrap();
    strip_template_suffix(dest.path(), &entries).unwrap();

    assert!(dest.path().join("dotfile").is_file());
    assert!(dest.path().join("README").is_file());
}

#[test]
fn test_only_materialized_entries_are_renamed() {
    let (_templates, dest, entries) = materialize(&["DOTgitignore"]);
    fs::write(dest.path().join("DOTkeep"), "created by someone else").unwrap();

    apply_dot_notation(dest.path(), &entries).unwrap();

    assert!(dest.path().join(".gitignore").is_file());
    assert!(dest.path().join("DOTkeep").is_file());
}

#[test]
fn test_existing_target_is_a_rename_error() {
    let (_templates, dest, entries) = materialize(&["go.mod.template"]);
    fs::write(dest.path().join("go.mod"), "module other").unwrap();

    let result = strip_template_suffix(dest.path(), &entries);
    assert!(matches!(result, Err(Error::RenameError { .. })));
    let go_mod = fs::read_to_string(dest.path().join("go.mod")).unwrap();
    assert_eq!(go_mod, "module other");
}
