//! End-to-end tests for the classgen binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const SCRIPT: &str = "class Animal {\n  # name:string\n  + speak():void\n}\nclass Dog\nDog --|> Animal\n";

fn classgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_classgen"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CLASSGEN_LOG_LEVEL")
        .env_remove("CLASSGEN_LOG_FORMAT")
        .output()
        .expect("failed to run classgen")
}

fn write_script(dir: &Path, content: &str) -> String {
    let path = dir.join("model.cd");
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_generate_java_to_stdout() {
    let dir = tempdir().unwrap();
    let input = write_script(dir.path(), SCRIPT);

    let output = classgen(&["generate", "-i", &input]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "class Animal {\n    protected string name;\n    public void speak() {}\n}\n\nclass Dog extends Animal {\n}\n"
    );
}

#[test]
fn test_generate_python_to_file() {
    let dir = tempdir().unwrap();
    let input = write_script(dir.path(), SCRIPT);
    let target = dir.path().join("model.py");

    let output = classgen(&[
        "generate",
        "-i",
        &input,
        "-o",
        target.to_str().unwrap(),
        "-l",
        "python",
        "--indent",
        "2",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.starts_with("class Animal:\n  def __init__(self):\n    self.name = None\n"));
    assert!(written.ends_with("class Dog(Animal):\n  pass\n"));
}

#[test]
fn test_generate_all_languages() {
    let dir = tempdir().unwrap();
    let input = write_script(dir.path(), SCRIPT);

    let output = classgen(&["generate", "-i", &input, "-l", "all"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("// ---- java ----\n"));
    assert!(text.contains("\n// ---- php ----\n<?php\n"));
    assert!(text.contains("\n# ---- python ----\nclass Animal:\n"));
}

#[test]
fn test_script_error_exits_non_zero() {
    let dir = tempdir().unwrap();
    let input = write_script(dir.path(), "class A\nclass A\n");

    let output = classgen(&["generate", "-i", &input]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"));
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_check_reports_malformed_lines() {
    let dir = tempdir().unwrap();
    let input = write_script(dir.path(), "class A {\n  + ok:int\n  oops\n}\n");

    let output = classgen(&["check", "-i", &input]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("warning: A: malformed member line 'oops'"));
    assert!(text.contains("ok: 1 classes, 0 relations, 1 malformed member lines"));
}

#[test]
fn test_inspect_json() {
    let dir = tempdir().unwrap();
    let input = write_script(dir.path(), SCRIPT);

    let output = classgen(&["inspect", "-i", &input, "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["classes"][0]["name"], "Animal");
    assert_eq!(json["classes"][0]["label"], "Animal\n--\n# name:string\n--\n+ speak():void");
    assert_eq!(json["relations"][0]["kind"], "Generalization");
    assert_eq!(json["relations"][0]["label"], "Dog inherits Animal");
}

#[test]
fn test_languages() {
    let output = classgen(&["languages", "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["languages"][2]["name"], "python");
    assert_eq!(json["languages"][2]["extension"], "py");

    let output = classgen(&["languages"]);
    assert!(stdout(&output).contains("php"));
}
