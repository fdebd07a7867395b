//! Allocation of camera capture files.

use std::io::ErrorKind;
use std::path::PathBuf;

use webshell_types::error::{Result, ShellError};
use webshell_types::file::{CaptureTarget, FileRef};

use crate::time::WallTime;

/// Directory camera captures are written into.
#[derive(Debug, Clone)]
pub struct CaptureDir {
    dir: PathBuf,
}

impl CaptureDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create an empty `JPEG_<stamp>_<random>.jpg` file and return it as a
    /// capture target. The file outlives this call; the camera fills it in.
    pub fn allocate(&self, now_millis: i64) -> Result<CaptureTarget> {
        std::fs::create_dir_all(&self.dir)?;
        let dir = self.dir.canonicalize()?;
        let prefix = format!("JPEG_{}_", WallTime::from_millis(now_millis).compact());
        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".jpg")
            .tempfile_in(&dir)?;
        let (_, path) = file
            .keep()
            .map_err(|e| ShellError::Capture(format!("cannot keep capture file: {e}")))?;
        log::debug!("Allocated capture target {}", path.display());
        Ok(CaptureTarget {
            uri: FileRef::new(format!("file://{}", path.display())),
            path,
        })
    }
}

/// Remove a capture file the camera never wrote to.
///
/// Returns whether a file was removed. A target that is gone already, or
/// holds data, is left alone.
pub fn discard_unused(target: &CaptureTarget) -> Result<bool> {
    match std::fs::metadata(&target.path) {
        Ok(meta) if meta.len() == 0 => {
            std::fs::remove_file(&target.path)?;
            log::debug!("Discarded unused capture target {}", target.path.display());
            Ok(true)
        },
        Ok(_) => Ok(false),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
