//! File references handed back to web-page upload requests.

use std::path::PathBuf;

/// An opaque reference to a file the engine can read, typically a
/// `content://` or `file://` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef(String);

impl FileRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A pre-allocated location the camera writes a capture to.
///
/// Some camera apps report success without echoing the output URI, so the
/// shell keeps this around until the upload request resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
    /// URI passed to the camera and returned to the page.
    pub uri: FileRef,
    /// Backing file on the local filesystem.
    pub path: PathBuf,
}
