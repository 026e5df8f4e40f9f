use super::*;
use std::fs;
use tempfile::TempDir;

fn missing_ignore_file(dir: &TempDir) -> ConfigOverrides {
    ConfigOverrides {
        ignore_file: Some(dir.path().join("no-such-ignore")),
        ..Default::default()
    }
}

#[test]
fn test_defaults() {
    let config = TreecatConfig::default();
    assert_eq!(config.output, PathBuf::from("./output.txt"));
    assert_eq!(config.input, PathBuf::from("."));
    assert!(config.overwrite);
    assert!(!config.include_binary);
    assert_eq!(config.max_file_size, None);
    assert_eq!(config.chunks, 1);
    assert_eq!(config.compression(), CompressionLevel::None);
}

#[test]
fn test_load_toml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        "skip = \"*.log target/\"\nchunks = 3\nignore_hidden = true\ncompress = true\ncompression_level = \"extreme\"\nmax_file_size = 2048\n",
    )?;

    let config = TreecatConfig::load(Some(&config_path), &missing_ignore_file(&temp_dir))?;
    assert_eq!(config.skip, "*.log target/");
    assert_eq!(config.chunks, 3);
    assert!(config.ignore_hidden);
    assert_eq!(config.compression(), CompressionLevel::Extreme);
    assert_eq!(config.max_file_size, Some(2048));
    Ok(())
}

#[test]
fn test_load_yaml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("custom.yaml");
    fs::write(&config_path, "include: \"important.log\"\noverwrite: false\n")?;

    let config = TreecatConfig::load(Some(&config_path), &missing_ignore_file(&temp_dir))?;
    assert_eq!(config.include, "important.log");
    assert!(!config.overwrite);
    Ok(())
}

#[test]
fn test_cli_overrides_beat_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("custom.json");
    fs::write(&config_path, r#"{"chunks": 4, "stdout": false, "skip": "*.tmp"}"#)?;

    let overrides = ConfigOverrides {
        chunks: Some(2),
        stdout: Some(true),
        ..missing_ignore_file(&temp_dir)
    };
    let config = TreecatConfig::load(Some(&config_path), &overrides)?;
    assert_eq!(config.chunks, 2);
    assert!(config.stdout);
    assert_eq!(config.skip, "*.tmp", "untouched values come from the file");
    Ok(())
}

#[test]
fn test_missing_custom_config_uses_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = TreecatConfig::load(
        Some(&temp_dir.path().join("non_existent.toml")),
        &missing_ignore_file(&temp_dir),
    )?;
    assert_eq!(config.chunks, 1);
    Ok(())
}

#[test]
fn test_ignore_file_is_merged_into_excludes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let ignore_path = temp_dir.path().join(".treecatignore");
    fs::write(&ignore_path, "# generated\ntarget/\n*.lock *.min.js\n")?;

    let config = TreecatConfig {
        skip: "*.log".to_string(),
        ignore_file: ignore_path,
        ..Default::default()
    };
    assert_eq!(
        config.effective_exclude_patterns()?,
        vec!["*.log", "target/", "*.lock", "*.min.js"]
    );
    Ok(())
}

#[test]
fn test_missing_ignore_file_is_not_an_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = TreecatConfig {
        skip: "a b".to_string(),
        ignore_file: temp_dir.path().join("absent"),
        ..Default::default()
    };
    assert_eq!(config.effective_exclude_patterns()?, vec!["a", "b"]);
    Ok(())
}

#[test]
fn test_expand_home() {
    let plain = Path::new("/etc/treecat");
    assert_eq!(expand_home(plain), plain.to_path_buf());

    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(expand_home(Path::new("~/.treecatignore")), PathBuf::from(home).join(".treecatignore"));
    }
}

#[test]
fn test_validate_rejects_directory_output() {
    let config = TreecatConfig {
        output: PathBuf::from("/"),
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TreecatError>(),
        Some(TreecatError::InvalidConfig(_))
    ));

    let stdout = TreecatConfig {
        output: PathBuf::from("/"),
        stdout: true,
        ..Default::default()
    };
    assert!(stdout.validate().is_ok());
}

#[test]
fn test_chunk_count_floor() {
    let config = TreecatConfig {
        chunks: 0,
        ..Default::default()
    };
    assert_eq!(config.chunk_count(), 1);
}
