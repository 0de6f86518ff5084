#![cfg(unix)]

use craft::error::Error;
use craft::generator::{invoke, spawn, GeneratorInvocation};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn write_script(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), format!("#!/bin/sh\n{body}\n")).unwrap();
}

#[test]
fn test_script_runs_in_working_dir_with_args() {
    let temp = TempDir::new().unwrap();
    write_script(
        temp.path(),
        "create.sh",
        r#"mkdir "$1" && echo generated > "$1/marker""#,
    );

    let invocation = GeneratorInvocation::new("create.sh", temp.path()).arg("demo");
    invoke(&invocation).unwrap();

    let marker = fs::read_to_string(temp.path().join("demo/marker")).unwrap();
    assert_eq!(marker, "generated\n");
}

#[test]
fn test_nonzero_exit_is_an_error() {
    let temp = TempDir::new().unwrap();
    write_script(temp.path(), "fail.sh", "exit 3");

    let result = invoke(&GeneratorInvocation::new("fail.sh", temp.path()));
    assert!(matches!(result, Err(Error::ScriptExecutionError { .. })));
}

#[test]
fn test_missing_script_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = invoke(&GeneratorInvocation::new("absent.sh", temp.path()));
    match result {
        Err(Error::ScriptExecutionError { reason, .. }) => {
            assert!(reason.contains("does not exist"))
        }
        other => panic!("Expected ScriptExecutionError, got {other:?}"),
    }
}

#[test]
fn test_timeout_kills_the_script() {
    let temp = TempDir::new().unwrap();
    write_script(temp.path(), "slow.sh", "exec sleep 30");

    let started = Instant::now();
    let invocation =
        GeneratorInvocation::new("slow.sh", temp.path()).timeout(Some(Duration::from_millis(300)));
    let result = invoke(&invocation);

    match result {
        Err(Error::ScriptExecutionError { reason, .. }) => {
            assert!(reason.contains("timed out"))
        }
        other => panic!("Expected ScriptExecutionError, got {other:?}"),
    }
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_timeout_kills_processes_started_by_the_script() {
    let temp = TempDir::new().unwrap();
    let body = "sh -c 'sleep 1; echo late > marker'";
    write_script(temp.path(), "nested.sh", body);

    let invocation = GeneratorInvocation::new("nested.sh", temp.path())
        .timeout(Some(Duration::from_millis(200)));
    assert!(matches!(
        invoke(&invocation),
        Err(Error::ScriptExecutionError { .. })
    ));

    std::thread::sleep(Duration::from_millis(1500));
    assert!(!temp.path().join("marker").exists());
}

#[test]
fn test_fast_script_within_timeout() {
    let temp = TempDir::new().unwrap();
    write_script(temp.path(), "quick.sh", "exit 0");

    let invocation =
        GeneratorInvocation::new("quick.sh", temp.path()).timeout(Some(Duration::from_secs(30)));
    assert!(invoke(&invocation).is_ok());
}

#[test]
fn test_dropped_generator_is_killed() {
    let temp = TempDir::new().unwrap();
    write_script(temp.path(), "hang.sh", "exec sleep 30");

    let running = spawn(&GeneratorInvocation::new("hang.sh", temp.path())).unwrap();
    let proc_dir = Path::new("/proc").join(running.id().to_string());
    drop(running);

    // reaped children disappear from /proc
    if Path::new("/proc/self").exists() {
        assert!(!proc_dir.exists());
    }
}
