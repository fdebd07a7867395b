//! Error types for webshell.

use std::io;

/// Errors produced by the webshell framework.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("store error: {0}")]
    Store(String),

    #[error("host error: {0}")]
    Host(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("capture error: {0}")]
    Capture(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let e = ShellError::Store("key missing".into());
        assert_eq!(format!("{e}"), "store error: key missing");
    }

    #[test]
    fn host_error_display() {
        let e = ShellError::Host("engine gone".into());
        assert_eq!(format!("{e}"), "host error: engine gone");
    }

    #[test]
    fn config_error_display() {
        let e = ShellError::Config("bad origin".into());
        assert_eq!(format!("{e}"), "config error: bad origin");
    }

    #[test]
    fn capture_error_display() {
        let e = ShellError::Capture("no space".into());
        assert_eq!(format!("{e}"), "capture error: no space");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: ShellError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: ShellError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: ShellError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }
}
