//! Configuration file support for docbuild.
//!
//! An optional user-wide config at `~/.docbuild/config.toml` supplies
//! defaults for settings that rarely change between invocations:
//!
//! ```toml
//! [build]
//! container_image = "ghcr.io/escomp/ctsm/ctsm-docs:v1.0.1"
//! container_tool = "podman"
//! num_make_jobs = 8
//! build_target = "html"
//! ```
//!
//! Command-line flags always take precedence over the config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};

/// docbuild configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build defaults
    pub build: BuildDefaults,
}

/// Default build settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildDefaults {
    /// Container image to build with when none is given on the command line
    pub container_image: Option<String>,

    /// Container tool to prefer ("docker" or "podman")
    pub container_tool: Option<String>,

    /// Number of parallel make jobs
    pub num_make_jobs: Option<u32>,

    /// Make target to build
    pub build_target: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load the user-wide config, falling back to defaults when the
    /// file is absent. A malformed file is reported and skipped rather
    /// than aborting the build.
    pub fn load_default() -> Config {
        let Some(path) = Config::default_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }
        match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring config file: {:#}", e);
                Config::default()
            }
        }
    }

    /// Path of the user-wide config file.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = UserDirs::new()?;
        Some(dirs.home_dir().join(".docbuild").join("config.toml"))
    }
}
