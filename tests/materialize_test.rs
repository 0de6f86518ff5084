use craft::error::Error;
use craft::materialize::copy_tree;
use craft::source::TemplateSource;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_embedded_copy_is_deterministic() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let source = TemplateSource::default();

    let a = copy_tree(&source, "go", first.path()).unwrap();
    let b = copy_tree(&source, "go", second.path()).unwrap();

    assert_eq!(a, b);
    let different = dir_diff::is_different(first.path(), second.path()).unwrap();
    assert!(!different);
    assert!(first.path().join("go.mod.template").is_file());
    assert!(first.path().join("DOTgitignore").is_file());
}

#[test]
fn test_host_copy_keeps_layout_and_content() {
    let templates = TempDir::new().unwrap();
    let root = templates.path().join("demo");
    fs::create_dir_all(root.join("config/nested")).unwrap();
    fs::write(root.join("README.md"), "# PROJECT_NAME\n").unwrap();
    fs::write(root.join("config/nested/app.yml"), "name: PROJECT_NAME\n").unwrap();

    let dest = TempDir::new().unwrap();
    let source = TemplateSource::FileSystem(templates.path().into());
    let entries = copy_tree(&source, "demo", dest.path()).unwrap();

    assert!(!dir_diff::is_different(&root, dest.path()).unwrap());
    let dirs: Vec<&Path> =
        entries.iter().filter(|e| e.is_dir).map(|e| e.relative.as_path()).collect();
    assert_eq!(dirs, vec![Path::new("config"), Path::new("config/nested")]);
}

#[test]
fn test_missing_subtree_is_a_copy_error() {
    let dest = TempDir::new().unwrap();
    let result = copy_tree(&TemplateSource::default(), "cobol", dest.path());
    assert!(matches!(result, Err(Error::TemplateCopyError { .. })));
}

#[cfg(unix)]
#[test]
fn test_shell_scripts_become_executable() {
    use std::os::unix::fs::PermissionsExt;

    let templates = TempDir::new().unwrap();
    let root = templates.path().join("tool");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("create_project.sh"), "#!/bin/sh\n").unwrap();
    fs::write(root.join("notes.txt"), "plain").unwrap();

    let dest = TempDir::new().unwrap();
    let source = TemplateSource::FileSystem(templates.path().into());
    copy_tree(&source, "tool", dest.path()).unwrap();

    let mode = |name: &str| {
        fs::metadata(dest.path().join(name))
            .unwrap()
            .permissions()
            .mode()
    };
    assert_eq!(mode("create_project.sh") & 0o777, 0o771);
    assert_eq!(mode("notes.txt") & 0o111, 0);
}
