//! Integration tests for Settings loading with layered precedence.
//!
//! Layers: compiled defaults, global famtree.toml, FAMTREE_* env vars,
//! command line. The global file is not touched here: file tests go
//! through `load_from_file` on temp directories.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use famtree::config::{expand_env_vars, Settings};
use famtree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[test]
fn given_full_config_file_when_loading_then_overrides_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("famtree.toml");
    fs::write(
        &path,
        r#"
base_dir = "/data/family"
relatives_depth = 5

[layout]
horizontal_spacing = 80.0
vertical_spacing = 60.0
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_from_file(&path).expect("load settings");

    // Assert
    assert_eq!(settings.base_dir, PathBuf::from("/data/family"));
    assert_eq!(settings.trees_dir(), PathBuf::from("/data/family/trees"));
    assert_eq!(settings.relatives_depth, 5);
    assert_eq!(settings.layout.horizontal_spacing, 80.0);
    assert_eq!(settings.layout.vertical_spacing, 60.0);
}

#[test]
fn given_partial_config_file_when_loading_then_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("famtree.toml");
    fs::write(&path, "[layout]\nvertical_spacing = 42.0\n").unwrap();

    let settings = Settings::load_from_file(&path).expect("load settings");

    let defaults = Settings::default();
    assert_eq!(settings.layout.vertical_spacing, 42.0);
    assert_eq!(settings.layout.horizontal_spacing, defaults.layout.horizontal_spacing);
    assert_eq!(settings.relatives_depth, defaults.relatives_depth);
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("famtree.toml");
    fs::write(&path, "relatives_depth = \"many\"\n").unwrap();

    let err = Settings::load_from_file(&path).unwrap_err();

    assert!(err.to_string().contains("config error"), "got: {err}");
}

#[test]
fn given_missing_file_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let result = Settings::load_from_file(&temp.path().join("absent.toml"));
    assert!(result.is_err());
}

#[test]
fn given_env_var_in_base_dir_when_loading_then_expands() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("famtree.toml");
    fs::write(&path, "base_dir = \"$HOME/genealogy\"\n").unwrap();

    let settings = Settings::load_from_file(&path).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(settings.base_dir, PathBuf::from(format!("{home}/genealogy")));
}

#[test]
fn given_undefined_var_when_expanding_then_returns_input() {
    let input = "$FAMTREE_SURELY_UNDEFINED_VAR/x";
    assert_eq!(expand_env_vars(input), input);
}

#[test]
fn given_famtree_env_vars_when_loading_then_env_wins() {
    // Arrange - only test in this binary that mutates the environment
    let temp = TempDir::new().unwrap();
    std::env::set_var("FAMTREE_BASE_DIR", temp.path());
    std::env::set_var("FAMTREE_RELATIVES_DEPTH", "7");
    std::env::set_var("FAMTREE_LAYOUT__VERTICAL_SPACING", "33.5");

    // Act
    let result = Settings::load();

    std::env::remove_var("FAMTREE_BASE_DIR");
    std::env::remove_var("FAMTREE_RELATIVES_DEPTH");
    std::env::remove_var("FAMTREE_LAYOUT__VERTICAL_SPACING");

    // Assert
    let settings = result.expect("load settings");
    assert_eq!(settings.base_dir, temp.path());
    assert_eq!(settings.relatives_depth, 7);
    assert_eq!(settings.layout.vertical_spacing, 33.5);
}

#[test]
fn given_cli_base_dir_when_overriding_then_replaces_and_expands() {
    let settings = Settings::default().with_base_dir(std::path::Path::new("~/elsewhere"));

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(settings.base_dir, PathBuf::from(format!("{home}/elsewhere")));
}
