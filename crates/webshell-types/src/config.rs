//! Shell configuration, loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Browser engine settings applied once when the shell starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub javascript: bool,
    pub dom_storage: bool,
    /// Never load `http://` sub-resources into `https://` pages.
    pub block_mixed_content: bool,
    pub media_requires_gesture: bool,
    pub accept_cookies: bool,
    pub accept_third_party_cookies: bool,
    /// Let the engine invert page colors in dark mode.
    pub algorithmic_darkening: bool,
    /// Token appended to the engine's default user agent.
    pub user_agent_suffix: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            javascript: true,
            dom_storage: true,
            block_mixed_content: true,
            media_requires_gesture: false,
            accept_cookies: true,
            accept_third_party_cookies: true,
            algorithmic_darkening: false,
            user_agent_suffix: "WebShellApp".to_string(),
        }
    }
}

/// Top-level shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Origin used until the user configures another one.
    pub default_server: String,
    /// File backing the persisted key-value store.
    pub store_path: PathBuf,
    /// Directory camera captures are allocated in.
    pub capture_dir: PathBuf,
    pub engine: EngineSettings,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            default_server: "https://app.example".to_string(),
            store_path: PathBuf::from("webshell-prefs.json"),
            capture_dir: std::env::temp_dir(),
            engine: EngineSettings::default(),
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&text)?;
        log::info!("Loaded shell config from {}", path.display());
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.default_server.trim().is_empty() {
            return Err(crate::error::ShellError::Config(
                "default_server must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;

    #[test]
    fn default_values_are_sensible() {
        let cfg = ShellConfig::default();
        assert_eq!(cfg.default_server, "https://app.example");
        assert_eq!(cfg.store_path, PathBuf::from("webshell-prefs.json"));
        assert!(cfg.engine.javascript);
        assert!(cfg.engine.dom_storage);
        assert!(cfg.engine.block_mixed_content);
        assert!(!cfg.engine.media_requires_gesture);
        assert!(cfg.engine.accept_third_party_cookies);
        assert!(!cfg.engine.algorithmic_darkening);
        assert_eq!(cfg.engine.user_agent_suffix, "WebShellApp");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = ShellConfig::from_toml_str(
            r#"
            default_server = "https://tracker.test"

            [engine]
            user_agent_suffix = "TrackerApp"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.default_server, "https://tracker.test");
        assert_eq!(cfg.engine.user_agent_suffix, "TrackerApp");
        assert!(cfg.engine.javascript);
        assert_eq!(cfg.store_path, PathBuf::from("webshell-prefs.json"));
    }

    #[test]
    fn empty_default_server_rejected() {
        let err = ShellConfig::from_toml_str("default_server = \"  \"").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ShellConfig::from_toml_str("default_server = [").unwrap_err();
        assert!(matches!(err, ShellError::TomlParse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.toml");
        std::fs::write(&path, "store_path = \"prefs.json\"\n").unwrap();
        let cfg = ShellConfig::load(&path).unwrap();
        assert_eq!(cfg.store_path, PathBuf::from("prefs.json"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ShellError::Io(_)));
    }
}
