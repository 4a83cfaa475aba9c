// ABOUTME: TOML loading and layering of default inline image options
// ABOUTME: Follows the XDG Base Directory layout; later files override earlier ones

use crate::options::ImageOptions;
use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "iterm2-image";
const CONFIG_FILE: &str = "config.toml";

impl ImageOptions {
    /// Load default options from the standard config locations
    pub fn load() -> Result<Self> {
        Self::load_from_paths(Self::config_paths().as_slice())
    }

    /// Load options from files in order of increasing precedence.
    ///
    /// Files that are missing or unreadable are skipped, but a file that
    /// exists and fails to parse is an error.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut options = ImageOptions::default();

        for path in paths {
            let path = path.as_ref();
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(err) => {
                    debug!("Skipping config file {}: {}", path.display(), err);
                    continue;
                }
            };

            let file_options = Self::from_toml_str(&content).with_context(|| {
                format!("Failed to parse TOML config file: {}", path.display())
            })?;
            debug!("Loaded image options from {}", path.display());
            options = options.merge(file_options);
        }

        Ok(options)
    }

    /// Load options from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Standard config file paths, lowest precedence first
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(CONFIG_DIR)
                    .join(CONFIG_FILE),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home).join(CONFIG_DIR).join(CONFIG_FILE);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }

        // 3. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(format!("{CONFIG_DIR}.toml")));
        }

        paths
    }
}
