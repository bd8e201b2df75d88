//! Configuration module for commentof.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `COMMENTOF_` and use double
//! underscores to separate nested levels:
//! - `COMMENTOF_COLLECT__MERGE_METHODS=false` sets `collect.merge_methods`
//! - `COMMENTOF_COLLECT__INCLUDE_UNEXPORTED=true` sets `collect.include_unexported`
//! - `COMMENTOF_DISCOVERY__GOROOT=/usr/local/go` sets `discovery.goroot`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding the settings file, searched from the current directory upwards
pub const CONFIG_DIR: &str = ".commentof";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// How syntax trees are collected into the model
    #[serde(default)]
    pub collect: CollectConfig,

    /// How Go files are found on disk
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// JSON output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CollectConfig {
    /// Move `Recv#Name` functions into their receiver's Object
    #[serde(default = "default_true")]
    pub merge_methods: bool,

    /// Keep names whose first character is not upper case
    #[serde(default = "default_false")]
    pub include_unexported: bool,

    /// Joins a nested literal's name to its parent's
    #[serde(default = "default_nested_separator")]
    pub nested_separator: String,

    /// Joins a receiver type name to a method name in merge keys
    #[serde(default = "default_receiver_separator")]
    pub receiver_separator: String,

    /// Deepest allowed chain of nested struct/interface literals
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct DiscoveryConfig {
    /// Include `*_test.go` files when reading a directory
    #[serde(default = "default_false")]
    pub include_tests: bool,

    /// Root used to resolve standard library package paths; falls back to `$GOROOT`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goroot: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Indentation unit for pretty JSON
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_nested_separator() -> String {
    ".".to_string()
}
fn default_receiver_separator() -> String {
    "#".to_string()
}
fn default_max_nesting_depth() -> usize {
    64
}
fn default_indent() -> String {
    "\t".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            collect: CollectConfig::default(),
            discovery: DiscoveryConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            merge_methods: true,
            include_unexported: false,
            nested_separator: default_nested_separator(),
            receiver_separator: default_receiver_separator(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        // Try to find the workspace config by looking for .commentof directory
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));
        Self::load_from(config_path)
    }

    /// Find the settings file by looking for a .commentof directory
    /// Searches from current directory up to root
    pub fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join("settings.toml"));
            }
        }

        None
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path.as_ref()))
            // Double underscore (__) separates nested levels
            .merge(Env::prefixed("COMMENTOF_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// GOROOT from settings, else from the environment
    pub fn goroot(&self) -> Option<PathBuf> {
        self.discovery
            .goroot
            .clone()
            .or_else(|| std::env::var_os("GOROOT").map(PathBuf::from))
    }
}
