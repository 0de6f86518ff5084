use clap::Parser;
use craft::cli::{Args, Command};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("craft")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&["new", "go", "--name", "demo"])).unwrap();
    let Command::New(new) = parsed.command;

    assert_eq!(new.language, "go");
    assert_eq!(new.name.as_deref(), Some("demo"));
    assert!(!new.current_dir_name);
    assert!(new.dependencies.is_empty());
    assert!(new.templates.is_none());
    assert!(new.generator_timeout.is_none());
    assert!(!parsed.verbose);
}

#[test]
fn test_short_flags_and_dependencies() {
    let args = make_args(&[
        "new", "java", "-n", "demo", "-d", "maven", "-d", "quarkus", "-v",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();
    let Command::New(new) = parsed.command;

    assert_eq!(new.dependencies, vec!["maven", "quarkus"]);
    assert!(parsed.verbose);
}

#[test]
fn test_comma_separated_dependencies() {
    let args = make_args(&["new", "java", "-c", "--dependencies", "maven,quarkus"]);
    let parsed = Args::try_parse_from(args).unwrap();
    let Command::New(new) = parsed.command;

    assert!(new.current_dir_name);
    assert!(new.name.is_none());
    assert_eq!(new.dependencies, vec!["maven", "quarkus"]);
}

#[test]
fn test_templates_and_timeout() {
    let args = make_args(&[
        "new",
        "rust",
        "-n",
        "demo",
        "--templates",
        "./my-templates",
        "--generator-timeout",
        "120",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();
    let Command::New(new) = parsed.command;

    assert_eq!(new.templates, Some(PathBuf::from("./my-templates")));
    assert_eq!(new.generator_timeout, Some(120));
}

#[test]
fn test_name_or_current_dir_name_required() {
    assert!(Args::try_parse_from(make_args(&["new", "go"])).is_err());
}

#[test]
fn test_name_conflicts_with_current_dir_name() {
    let args = make_args(&["new", "go", "-n", "demo", "-c"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_unknown_subcommand() {
    let args = make_args(&["scan", "go", "-n", "demo"]);
    assert!(Args::try_parse_from(args).is_err());
}
