//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
//! 3. Environment variables: `FAMTREE_*` prefix
//! 4. Command line (`--base-dir`), applied by the CLI layer

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::LayoutConfig;

/// Raw layout config for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutConfig {
    pub horizontal_spacing: Option<f64>,
    pub vertical_spacing: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub base_dir: Option<PathBuf>,
    pub relatives_depth: Option<usize>,
    #[serde(default)]
    pub layout: RawLayoutConfig,
}

/// Unified configuration for famtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base directory for famtree data (default: ~/.famtree); trees live in base_dir/trees
    pub base_dir: PathBuf,
    /// Generations searched by `query relatives` when no depth is given
    pub relatives_depth: usize,
    /// Spacing used when attaching layout positions
    pub layout: LayoutConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: dirs_default_base_dir(),
            relatives_depth: 2,
            layout: LayoutConfig::default(),
        }
    }
}

/// Get the default base directory (~/.famtree).
fn dirs_default_base_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".famtree"))
        .unwrap_or_else(|| PathBuf::from("~/.famtree"))
}

/// Get the XDG config directory for famtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famtree.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Falls back to the input unchanged when a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    parse_raw_settings(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Parse TOML content into RawSettings.
pub fn parse_raw_settings(content: &str) -> Result<RawSettings, toml::de::Error> {
    toml::from_str(content)
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Directory holding the tree documents (base_dir/trees).
    pub fn trees_dir(&self) -> PathBuf {
        self.base_dir.join("trees")
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.base_dir.to_string_lossy().as_ref());
        self.base_dir = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base_dir: overlay
                .base_dir
                .clone()
                .unwrap_or_else(|| self.base_dir.clone()),
            relatives_depth: overlay.relatives_depth.unwrap_or(self.relatives_depth),
            layout: LayoutConfig {
                horizontal_spacing: overlay
                    .layout
                    .horizontal_spacing
                    .unwrap_or(self.layout.horizontal_spacing),
                vertical_spacing: overlay
                    .layout
                    .vertical_spacing
                    .unwrap_or(self.layout.vertical_spacing),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
    /// 3. Environment variables: `FAMTREE_*` prefix, `__` as section separator
    pub fn load() -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Load defaults merged with a single config file, without env overrides.
    pub fn load_from_file(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        let mut settings = Self::default().merge_with(&raw);
        settings.expand_paths();
        Ok(settings)
    }

    /// Apply FAMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("FAMTREE")
                .prefix_separator("_")
                .separator("__"),
        );
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("base_dir") {
            settings.base_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_int("relatives_depth") {
            settings.relatives_depth = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("relatives_depth must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_float("layout.horizontal_spacing") {
            settings.layout.horizontal_spacing = val;
        }
        if let Ok(val) = config.get_float("layout.vertical_spacing") {
            settings.layout.vertical_spacing = val;
        }

        Ok(settings)
    }

    /// Replace the base directory (command-line override).
    pub fn with_base_dir(mut self, base_dir: &Path) -> Self {
        self.base_dir = base_dir.to_path_buf();
        self.expand_paths();
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# famtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/famtree/famtree.toml
#   Env:    FAMTREE_* environment variables (e.g. FAMTREE_LAYOUT__VERTICAL_SPACING=80)
#   CLI:    --base-dir

# Base directory for famtree data (trees stored in base_dir/trees)
# base_dir = "~/.famtree"

# Generations searched by `famtree query relatives` without --depth
# relatives_depth = 2

[layout]
# Distance between sibling slots
# horizontal_spacing = 120.0

# Distance between generations
# vertical_spacing = 100.0
"#
        .to_string()
    }
}
