//! Integration tests for the treecat CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A treecat command isolated from the caller's home directory and environment
fn treecat(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("treecat").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("TREECAT_SKIP")
        .env_remove("TREECAT_INCLUDE")
        .env_remove("TREECAT_IGNORE_HIDDEN");
    cmd
}

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    treecat(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Concatenate a directory tree"))
        .stdout(predicate::str::contains("--ignore-hidden"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    treecat(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("treecat"));
}

#[test]
fn test_invalid_level_is_rejected() {
    let home = TempDir::new().unwrap();
    treecat(home.path())
        .args(["-l", "maximum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_stdout_mode_skips_hidden() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("project");
    write_tree(&input, &[("a.txt", "hello"), (".git/config", "[core]")]);

    treecat(home.path())
        .args(["-w", "-H", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout("a.txt\nhello\n\n")
        .stderr(predicate::str::contains("Processing complete"));
}

#[test]
fn test_include_overrides_skip() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("logs");
    let output = home.path().join("out/result.txt");
    write_tree(&input, &[("important.log", "keep"), ("debug.log", "drop")]);

    treecat(home.path())
        .args(["-s", "*.log", "-n", "important.log", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing complete"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "important.log\nkeep\n\n");
}

#[test]
fn test_max_size_writes_error_line() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("src");
    write_tree(&input, &[("big.txt", "hello world")]);

    treecat(home.path())
        .args(["-w", "-z", "5", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error reading file: file size 11 bytes exceeds the maximum of 5 bytes",
        ))
        .stderr(predicate::str::contains("big.txt"));
}

#[test]
fn test_chunked_output_files() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("src");
    let content = "x".repeat(200);
    write_tree(
        &input,
        &[("a.txt", &content), ("b.txt", &content), ("c.txt", &content)],
    );

    treecat(home.path())
        .args(["-k", "3", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(home.path().join("dump.txt"))
        .assert()
        .success();

    let chunks: Vec<String> = ["dump.txt", "dump1.txt", "dump2.txt"]
        .iter()
        .map(|name| fs::read_to_string(home.path().join(name)).unwrap())
        .collect();
    assert!(chunks.iter().all(|c| !c.is_empty()));
    assert!(!home.path().join("dump3.txt").exists());
    assert_eq!(
        chunks.concat(),
        format!("a.txt\n{0}\n\nb.txt\n{0}\n\nc.txt\n{0}\n\n", content)
    );
}

#[test]
fn test_extreme_compression() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("src");
    let output = home.path().join("output.txt");
    write_tree(&input, &[("data.txt", "aaa\naaa\naaa\nbbb")]);

    treecat(home.path())
        .args(["-x", "-l", "extreme", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "data.txt\naaa\n[Previous line repeated 3 times]\nbbb\n\n"
    );
}

#[test]
fn test_existing_output_without_overwrite_fails() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("src");
    let output = home.path().join("output.txt");
    write_tree(&input, &[("a.txt", "hello")]);
    fs::write(&output, "keep").unwrap();

    treecat(home.path())
        .args(["-f", "false", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "keep");
}

#[test]
fn test_missing_input_fails() {
    let home = TempDir::new().unwrap();
    treecat(home.path())
        .args(["-i", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input directory does not exist"));
}

#[test]
fn test_dry_run_text() {
    let home = TempDir::new().unwrap();
    treecat(home.path())
        .args(["-s", "*.log", "-n", "important.log", "-t", "important.log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would be included"))
        .stdout(predicate::str::contains("*.log"));

    treecat(home.path())
        .args(["-s", "*.log", "-t", "./debug.log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("debug.log would be excluded"));

    assert!(!home.path().join("output.txt").exists());
}

#[test]
fn test_dry_run_json() {
    let home = TempDir::new().unwrap();
    let assert = treecat(home.path())
        .args(["-s", "target/", "-t", "target/", "--format", "json"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["path"], "target");
    assert_eq!(report["is_dir"], true);
    assert_eq!(report["included"], false);
    assert_eq!(report["exclude_patterns"][0], "target/");
}

#[test]
fn test_config_file_and_ignore_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("src");
    write_tree(
        &input,
        &[("main.rs", "fn main() {}"), ("notes.md", "notes"), ("scratch.tmp", "tmp")],
    );
    fs::write(home.path().join("treecat.toml"), "skip = \"*.md\"\nstdout = true\n").unwrap();
    fs::write(home.path().join(".treecatignore"), "# scratch files\n*.tmp\n").unwrap();

    treecat(home.path())
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout("main.rs\nfn main() {}\n\n");
}

#[test]
fn test_environment_overrides_defaults() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("src");
    write_tree(&input, &[("a.txt", "a"), (".env", "SECRET=1")]);

    treecat(home.path())
        .env("TREECAT_IGNORE_HIDDEN", "true")
        .args(["-w", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout("a.txt\na\n\n");
}

#[test]
fn test_json_summary() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("src");
    write_tree(&input, &[("a.txt", "hello"), ("b.bin", "\0\0\0\0")]);

    let assert = treecat(home.path())
        .args(["--format", "json", "-i"])
        .arg(&input)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["stats"]["files_included"], 1);
    assert_eq!(report["stats"]["files_excluded"], 1);
    assert_eq!(report["stats"]["chunks_written"], 1);
}
