use kernelview::config::Config;
use kernelview::KernelviewError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r##"
[display]
title = "myhost"
separator = " -> "
clear_screen = false
hidden = ["Ports", "IP Address"]

[colors]
title = "bright_magenta"
value = "#a3be8c"
"##,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.display.title, "myhost");
    assert_eq!(config.display.separator, " -> ");
    assert!(!config.display.clear_screen);
    assert!(!config.display.show_all_gpus);
    assert_eq!(config.display.hidden, vec!["Ports", "IP Address"]);
    assert_eq!(config.colors.title, "bright_magenta");
    assert_eq!(config.colors.category, "blue");
    assert_eq!(config.colors.value, "#a3be8c");
}

#[test]
fn test_config_missing_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_malformed_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[display\ntitle = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, KernelviewError::Config(_)));
}

#[test]
fn test_config_unknown_keys_are_ignored() {
    let config = Config::from_toml_str("[display]\nascii_path = \"~/logo.txt\"\n").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_directory_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load_from(temp_dir.path()).unwrap_err();
    assert!(matches!(err, KernelviewError::Io(_)));
}
