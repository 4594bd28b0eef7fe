//! Configuration for sluice.
//!
//! SLUICE_ROOT resolution order:
//! 1. Explicit path passed to Config::with_root()
//! 2. SLUICE_ROOT environment variable
//! 3. Default: platform data dir (~/.local/share/sluice)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Sluice configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory for the store and config file.
    pub root: PathBuf,

    /// Nesting depth at which whole subtrees are captured as records.
    #[serde(default = "default_capture_depth")]
    pub capture_depth: i32,

    /// Records per batch insert.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Bytes requested per source read.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Indent string for exported documents (empty disables pretty output).
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_capture_depth() -> i32 {
    2
}

fn default_batch_size() -> usize {
    100
}

fn default_chunk_size() -> usize {
    1024
}

fn default_indent() -> String {
    "    ".to_string()
}

impl Config {
    /// Create a new config with the given root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            capture_depth: default_capture_depth(),
            batch_size: default_batch_size(),
            chunk_size: default_chunk_size(),
            indent: default_indent(),
        }
    }

    /// Load config from SLUICE_ROOT/config.toml, or create default.
    pub fn load() -> Result<Self> {
        let root = resolve_root()?;
        Self::load_from(&root)
    }

    /// Load config from a specific root.
    pub fn load_from(root: &Path) -> Result<Self> {
        let config_path = root.join("config.toml");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
            // Ensure root matches the actual location
            config.root = root.to_path_buf();
            Ok(config)
        } else {
            Ok(Self::with_root(root))
        }
    }

    /// Save config to SLUICE_ROOT/config.toml.
    pub fn save(&self) -> Result<()> {
        let config_path = self.root.join("config.toml");
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Path to the DuckDB database file.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("sluice.duckdb")
    }
}

/// Resolve SLUICE_ROOT using the standard resolution order.
fn resolve_root() -> Result<PathBuf> {
    // 1. Environment variable
    if let Ok(path) = std::env::var("SLUICE_ROOT") {
        return Ok(PathBuf::from(path));
    }

    // 2. XDG data directory (via directories crate)
    if let Some(proj_dirs) = ProjectDirs::from("", "", "sluice") {
        return Ok(proj_dirs.data_dir().to_path_buf());
    }

    // 3. Fallback to ~/.local/share/sluice
    let home = std::env::var("HOME")
        .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;
    Ok(PathBuf::from(home).join(".local/share/sluice"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_with_root() {
        let config = Config::with_root("/tmp/test-sluice");
        assert_eq!(config.root, PathBuf::from("/tmp/test-sluice"));
        assert_eq!(config.capture_depth, 2);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.indent, "    ");
    }

    #[test]
    fn test_db_path() {
        let config = Config::with_root("/tmp/test-sluice");
        assert_eq!(
            config.db_path(),
            PathBuf::from("/tmp/test-sluice/sluice.duckdb")
        );
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();

        let mut config = Config::with_root(&root);
        config.batch_size = 25;
        config.save().unwrap();

        let loaded = Config::load_from(&root).unwrap();
        assert_eq!(loaded.batch_size, 25);
        assert_eq!(loaded.capture_depth, config.capture_depth);
        assert_eq!(loaded.indent, config.indent);
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let loaded = Config::load_from(tmp.path()).unwrap();
        assert_eq!(loaded.batch_size, 100);
        assert_eq!(loaded.root, tmp.path());
    }
}
