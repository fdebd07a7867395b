//! Persisted key-value preferences.
//!
//! Values are held as JSON values so strings and integers share one map;
//! reading a key with the wrong accessor is a [`ShellError::Store`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use webshell_types::error::{Result, ShellError};

/// A string/integer preference store.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>>;

    fn set_string(&mut self, key: &str, value: &str) -> Result<()>;

    fn get_i64(&self, key: &str) -> Result<Option<i64>>;

    fn set_i64(&mut self, key: &str, value: i64) -> Result<()>;
}

fn as_string(key: &str, value: Option<&Value>) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ShellError::Store(format!(
            "key `{key}` holds {other}, expected a string"
        ))),
    }
}

fn as_i64(key: &str, value: Option<&Value>) -> Result<Option<i64>> {
    match value {
        None => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| {
            ShellError::Store(format!("key `{key}` holds {v}, expected an integer"))
        }),
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        as_string(key, self.entries.get(key))
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), Value::from(value));
        Ok(())
    }

    fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        as_i64(key, self.entries.get(key))
    }

    fn set_i64(&mut self, key: &str, value: i64) -> Result<()> {
        self.entries.insert(key.to_string(), Value::from(value));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// A store persisted as a single JSON object. Every write rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No preferences at {}, starting empty", path.display());
                BTreeMap::new()
            },
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        // Write-then-rename so a crash never leaves a truncated file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        as_string(key, self.entries.get(key))
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), Value::from(value));
        self.flush()
    }

    fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        as_i64(key, self.entries.get(key))
    }

    fn set_i64(&mut self, key: &str, value: i64) -> Result<()> {
        self.entries.insert(key.to_string(), Value::from(value));
        self.flush()
    }
}
