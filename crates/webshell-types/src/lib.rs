//! Foundation types for webshell.
//!
//! This crate contains the platform-agnostic types shared by all webshell
//! crates: the error type, shell configuration, file references handed to
//! web-page upload requests, and the display state enum.

pub mod config;
pub mod error;
pub mod file;
pub mod state;

pub use config::{EngineSettings, ShellConfig};
pub use error::{Result, ShellError};
pub use file::{CaptureTarget, FileRef};
pub use state::{MediaResource, ShellState};
