//! CLI and runner tests
//!
//! Runs the `commentof` binary on the Go fixtures and checks the JSON
//! documents and exit codes it produces.

use anyhow::Result;
use commentof::Settings;
use commentof::io::Runner;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/go")
        .join(name)
}

/// Run the binary from an empty directory so no workspace settings apply.
fn run_commentof(args: &[&str]) -> Result<Output> {
    let cwd = TempDir::new()?;
    let output = Command::new(env!("CARGO_BIN_EXE_commentof"))
        .args(args)
        .current_dir(cwd.path())
        .env_remove("GOROOT")
        .output()?;
    Ok(output)
}

/// Split a stream of pretty-printed documents.
fn documents(bytes: &[u8]) -> Result<Vec<Value>> {
    let stream = serde_json::Deserializer::from_slice(bytes).into_iter::<Value>();
    Ok(stream.collect::<Result<Vec<_>, _>>()?)
}

#[test]
fn test_single_file_document() -> Result<()> {
    println!("=== Test: single file ===");
    let path = fixture("method.go");
    let output = run_commentof(&[path.to_str().unwrap_or_default()])?;
    assert!(output.status.success());

    let docs = documents(&output.stdout)?;
    assert_eq!(docs.len(), 1);
    let doc = &docs[0];

    assert_eq!(doc["names"], serde_json::json!(["Ob"]));
    assert_eq!(
        doc["types"]["Ob"]["methodnames"],
        serde_json::json!(["Name", "MarshalJSON"])
    );
    assert_eq!(doc["types"]["Ob"]["methods"]["Name"]["recv"], "Ob");
    assert_eq!(doc["filenames"].as_array().map(Vec::len), Some(1));
    // per-file views are not part of the document
    assert!(doc.get("files").is_none());
    // the unexported field leaves an empty member list, which is omitted
    assert!(doc["types"]["Ob"].get("fieldnames").is_none());

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.starts_with("{\n\t\"interfaces\""));
    println!("  {} bytes", output.stdout.len());
    Ok(())
}

#[test]
fn test_no_merge_methods_flag() -> Result<()> {
    println!("=== Test: --no-merge-methods ===");
    let path = fixture("method.go");
    let output = run_commentof(&["--no-merge-methods", path.to_str().unwrap_or_default()])?;
    assert!(output.status.success());

    let docs = documents(&output.stdout)?;
    let functions = docs[0]["functions"].as_object().cloned().unwrap_or_default();
    assert!(functions.contains_key("Ob#Name"));
    assert!(functions.contains_key("Ob#MarshalJSON"));
    Ok(())
}

#[test]
fn test_directory_writes_one_document_per_package() -> Result<()> {
    println!("=== Test: directory ===");
    let dir = fixture("");
    let output = run_commentof(&[dir.to_str().unwrap_or_default()])?;
    assert!(output.status.success());

    let docs = documents(&output.stdout)?;
    assert_eq!(docs.len(), 2);
    // packages are written in name order: commentof, then fixture
    assert_eq!(docs[0]["names"], serde_json::json!(["S", "S.Nested"]));
    assert!(docs[1]["interfaces"].get("I3.anon#1").is_some());
    Ok(())
}

#[test]
fn test_missing_path_exit_code() -> Result<()> {
    println!("=== Test: missing path ===");
    let output = run_commentof(&["definitely/not/a/package"])?;

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("!! "), "stderr: {stderr}");
    // suggestions are shown without --verbose
    assert!(stderr.contains("  • Check the path for typos"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_dash_argument_is_ignored() -> Result<()> {
    println!("=== Test: dash argument ===");
    let output = run_commentof(&["-"])?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_later_paths_run_after_a_failure() -> Result<()> {
    println!("=== Test: failure does not stop later paths ===");
    let path = fixture("typedef.go");
    let output = run_commentof(&["missing.go", path.to_str().unwrap_or_default()])?;

    assert_eq!(output.status.code(), Some(3));
    let docs = documents(&output.stdout)?;
    assert_eq!(docs.len(), 1);
    assert_eq!(
        docs[0]["names"],
        serde_json::json!(["EmitFunc", "MyInt", "IntAlias"])
    );
    Ok(())
}

#[test]
fn test_runner_writes_to_any_writer() -> Result<()> {
    println!("=== Test: runner with a buffer ===");
    let mut settings = Settings::default();
    settings.output.indent = "  ".to_string();

    let mut runner = Runner::new(settings, Vec::new())?;
    let written = runner.run(fixture("func.go").to_str().unwrap_or_default())?;
    assert_eq!(written, 1);

    let buffer = runner.into_inner();
    let text = String::from_utf8(buffer)?;
    assert!(text.starts_with("{\n  \"interfaces\""));
    assert!(text.ends_with("}\n"));

    let doc: Value = serde_json::from_str(&text)?;
    assert_eq!(
        doc["functions"]["F3"]["paramnames"],
        serde_json::json!(["param#0", "param#1", "param#2"])
    );
    assert_eq!(
        doc["functions"]["F2"]["params"]["x1"]["comment"],
        "x1 is int @arg1 :IGNORED:\n"
    );
    Ok(())
}
