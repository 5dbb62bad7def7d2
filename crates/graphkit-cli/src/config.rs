//! User configuration for the `gk` binary.
//!
//! Read from `<config_dir>/graphkit/config.toml`, or from the file named by
//! `GRAPHKIT_CONFIG` when set. A missing file yields defaults.

use anyhow::{Context, Result};
use graphkit_core::GraphOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var that overrides the config file location.
pub const CONFIG_ENV: &str = "GRAPHKIT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Default output mode (`pretty`, `text`, or `json`).
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub graph: GraphDefaults,
}

/// Flags applied to documents that omit `directed` or `weighted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDefaults {
    #[serde(default = "default_true")]
    pub directed: bool,
    #[serde(default)]
    pub weighted: bool,
}

impl Default for GraphDefaults {
    fn default() -> Self {
        Self {
            directed: default_true(),
            weighted: false,
        }
    }
}

impl GraphDefaults {
    #[must_use]
    pub const fn options(self) -> GraphOptions {
        GraphOptions {
            directed: self.directed,
            weighted: self.weighted,
        }
    }
}

const fn default_true() -> bool {
    true
}

fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    dirs::config_dir().map(|dir| dir.join("graphkit/config.toml"))
}

/// Load the user config, falling back to defaults when no file exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    config_path().map_or_else(|| Ok(UserConfig::default()), |path| load_user_config_from(&path))
}

/// Load the user config from an explicit path.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_user_config_from(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config, UserConfig::default());
        assert!(config.graph.directed);
        assert!(!config.graph.weighted);
    }

    #[test]
    fn parses_output_and_graph_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "output = \"json\"\n\n[graph]\ndirected = false\nweighted = true\n",
        )
        .expect("write");

        let config = load_user_config_from(&path).expect("load");
        assert_eq!(config.output.as_deref(), Some("json"));
        assert_eq!(config.graph.options(), GraphOptions::undirected().weighted());
    }

    #[test]
    fn partial_graph_table_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[graph]\nweighted = true\n").expect("write");

        let config = load_user_config_from(&path).expect("load");
        assert_eq!(config.output, None);
        assert!(config.graph.directed);
        assert!(config.graph.weighted);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output = [").expect("write");

        let err = load_user_config_from(&path).expect_err("should fail");
        assert!(err.to_string().contains("Failed to parse"));
    }
}
