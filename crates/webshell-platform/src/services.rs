//! Host service traits.

use webshell_types::config::EngineSettings;
use webshell_types::error::Result;
use webshell_types::file::FileRef;
use webshell_types::state::{MediaResource, ShellState};

// ---------------------------------------------------------------------------
// Browser engine
// ---------------------------------------------------------------------------

/// The embedded browser engine, seen as an opaque navigation surface.
pub trait NavigationHost {
    /// Apply engine settings. Called once before the first load.
    fn apply_settings(&mut self, settings: &EngineSettings) -> Result<()>;

    /// Start loading `url` in the main frame.
    fn load_url(&mut self, url: &str) -> Result<()>;

    /// Reload the current page.
    fn reload(&mut self) -> Result<()>;

    /// URL of the page currently shown, if any.
    fn current_url(&self) -> Option<String>;

    /// Number of entries in the back/forward list, including the current one.
    fn history_len(&self) -> usize;

    fn can_go_back(&self) -> bool;

    fn go_back(&mut self) -> Result<()>;
}

/// A web page's request for a native capability, owned by the engine.
///
/// Granting or denying consumes the request, so each request is answered
/// exactly once.
pub trait MediaPermissionRequest {
    /// Capabilities the page asked for.
    fn resources(&self) -> &[MediaResource];

    fn grant(self: Box<Self>, resources: &[MediaResource]);

    fn deny(self: Box<Self>);
}

// ---------------------------------------------------------------------------
// OS permissions and pickers
// ---------------------------------------------------------------------------

/// Camera runtime permission.
pub trait PermissionHost {
    fn has_camera_permission(&self) -> bool;

    /// Show the OS permission prompt. The decision arrives later through
    /// the shell's permission-result entry point.
    fn request_camera_permission(&mut self) -> Result<()>;
}

/// Identity of one web-page upload request.
///
/// Native picker results carry the id they were launched with so a result
/// can be matched against whichever request is still outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UploadRequestId(pub u64);

impl std::fmt::Display for UploadRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upload#{}", self.0)
    }
}

/// What the native chooser should offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserRequest {
    pub id: UploadRequestId,
    /// MIME filter for the gallery picker.
    pub mime_filter: String,
    /// When set, a "take photo" entry writing to this location is offered
    /// next to the gallery.
    pub capture: Option<FileRef>,
}

impl ChooserRequest {
    pub fn gallery_only(id: UploadRequestId) -> Self {
        Self {
            id,
            mime_filter: "image/*".to_string(),
            capture: None,
        }
    }

    pub fn with_camera(id: UploadRequestId, capture: FileRef) -> Self {
        Self {
            capture: Some(capture),
            ..Self::gallery_only(id)
        }
    }

    pub fn offers_camera(&self) -> bool {
        self.capture.is_some()
    }
}

/// Native camera/gallery pickers. They run out of process; results come
/// back through the shell's native-result entry point.
pub trait PickerHost {
    /// Create a fresh, empty file the camera can write to.
    fn allocate_capture_target(&mut self) -> Result<webshell_types::file::CaptureTarget>;

    fn present_chooser(&mut self, request: &ChooserRequest) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Shell UI and system
// ---------------------------------------------------------------------------

/// The shell's own widgets around the web view.
pub trait ShellView {
    fn show_state(&mut self, state: ShellState);

    /// Pull-to-refresh spinner.
    fn set_refreshing(&mut self, refreshing: bool);

    /// Whether the pull-to-refresh gesture is armed.
    fn set_refresh_enabled(&mut self, enabled: bool);

    fn set_change_server_visible(&mut self, visible: bool);

    /// Open the modal server prompt pre-filled with `prefill`. The user's
    /// answer arrives through the shell's server-entered entry point.
    fn prompt_server_url(&mut self, prefill: &str) -> Result<()>;
}

/// Outbound system services.
pub trait SystemHost {
    /// Hand `url` to the platform's default handler (system browser, mail app, ...).
    fn open_external(&mut self, url: &str) -> Result<()>;

    fn is_network_available(&self) -> bool;
}

/// Aggregate trait providing every host capability the shell needs.
pub trait ShellHost: NavigationHost + PermissionHost + PickerHost + ShellView + SystemHost {}

impl<T> ShellHost for T where T: NavigationHost + PermissionHost + PickerHost + ShellView + SystemHost {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_only_has_no_camera() {
        let req = ChooserRequest::gallery_only(UploadRequestId(3));
        assert!(!req.offers_camera());
        assert_eq!(req.mime_filter, "image/*");
        assert_eq!(req.id, UploadRequestId(3));
    }

    #[test]
    fn with_camera_offers_capture() {
        let req = ChooserRequest::with_camera(UploadRequestId(4), FileRef::new("file:///c.jpg"));
        assert!(req.offers_camera());
        assert_eq!(req.capture.as_ref().map(FileRef::as_str), Some("file:///c.jpg"));
        assert_eq!(req.mime_filter, "image/*");
    }

    #[test]
    fn upload_request_id_display() {
        assert_eq!(UploadRequestId(7).to_string(), "upload#7");
    }
}
