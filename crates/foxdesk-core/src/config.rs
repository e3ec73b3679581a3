use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FoxdeskError, Result};

const CONFIG_FILE: &str = "foxdesk.toml";

/// Management script path, relative to the project root.
pub const DEFAULT_SCRIPT: &str = "scripts/manage_camoufox_profiles.py";

/// Interpreter used to run the script.
#[cfg(not(windows))]
pub const DEFAULT_RUNTIME: &str = ".venv/bin/python";
#[cfg(windows)]
pub const DEFAULT_RUNTIME: &str = ".venv/Scripts/python.exe";

/// Optional per-project configuration, read from `<project root>/foxdesk.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tool: ToolConfig,
}

/// Paths of the external tool. Relative paths are resolved against the
/// project root; absolute paths are used as-is.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolConfig {
    #[serde(default)]
    pub script: Option<PathBuf>,

    #[serde(default)]
    pub runtime: Option<PathBuf>,
}

impl ToolConfig {
    pub fn script_path(&self) -> PathBuf {
        self.script
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT))
    }

    pub fn runtime_path(&self) -> PathBuf {
        self.runtime
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RUNTIME))
    }
}

impl Config {
    /// Load config from the project root; an absent file means defaults.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path(project_root);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| FoxdeskError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Get config file path
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::load(tmp.path()).unwrap();

        assert_eq!(config.tool.script_path(), PathBuf::from(DEFAULT_SCRIPT));
        assert_eq!(config.tool.runtime_path(), PathBuf::from(DEFAULT_RUNTIME));
    }

    #[test]
    fn overrides_are_read() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(
            Config::path(tmp.path()),
            "[tool]\nscript = \"tools/profiles.py\"\nruntime = \"/usr/bin/python3\"\n",
        )
        .unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.tool.script_path(), PathBuf::from("tools/profiles.py"));
        assert_eq!(config.tool.runtime_path(), PathBuf::from("/usr/bin/python3"));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(Config::path(tmp.path()), "[tool]\nscript = \"x.py\"\n").unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.tool.script_path(), PathBuf::from("x.py"));
        assert_eq!(config.tool.runtime_path(), PathBuf::from(DEFAULT_RUNTIME));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(Config::path(tmp.path()), "[tool\nscript = ").unwrap();

        let err = Config::load(tmp.path()).unwrap_err();
        assert!(matches!(err, FoxdeskError::ConfigParse { .. }));
        assert_eq!(err.exit_code(), 4);
    }
}
