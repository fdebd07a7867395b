//! Host capability abstractions for webshell.
//!
//! The browser engine, the OS permission/picker subsystems and persistent
//! preferences are all external collaborators. They are consumed through
//! the narrow traits in [`services`] and [`store`] so the shell state
//! machines can run against a real engine, a console driver, or a test mock.

pub mod capture;
pub mod services;
pub mod store;
pub mod time;

pub use capture::{CaptureDir, discard_unused};
pub use services::{
    ChooserRequest, MediaPermissionRequest, NavigationHost, PermissionHost, PickerHost,
    ShellHost, ShellView, SystemHost, UploadRequestId,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use time::{Clock, SystemClock, WallTime};
