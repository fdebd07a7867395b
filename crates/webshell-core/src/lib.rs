//! Shell state machine and capability bridge for webshell.
//!
//! A hosted web application is shown inside an embedded browser engine.
//! This crate owns everything that makes that feel native:
//!
//! - [`lifecycle`]: the loading / content / error display machine,
//!   pull-to-refresh and retry.
//! - [`policy`]: in-app versus external navigation, auth-page detection.
//! - [`bridge`]: web file-upload requests bridged to native camera and
//!   gallery pickers, and camera permission negotiation.
//! - [`session`]: the configured server origin and foreground staleness.
//! - [`shell`]: the [`Shell`] orchestrator that receives every engine and
//!   OS callback and fans it out to the components above.

pub mod bridge;
pub mod lifecycle;
pub mod policy;
pub mod session;
pub mod shell;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bridge::{CapabilityBridge, NativeOutcome, PermissionRouting, UploadCallback, UploadStage};
pub use lifecycle::LifecycleController;
pub use policy::NavigationDecision;
pub use session::SessionStore;
pub use shell::{Shell, StartMode};
