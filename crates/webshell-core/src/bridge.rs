//! Capability bridge: web file-upload requests to native pickers.
//!
//! A page's `<input type="file">` arrives as a single-shot callback. The
//! bridge negotiates the camera permission, presents a camera + gallery
//! (or gallery-only) chooser, and resolves the callback with whatever the
//! native picker returns. Page-initiated camera requests
//! (`getUserMedia`) share the same OS permission prompt.
//!
//! Pending requests live in the bridge for the life of the shell, so they
//! survive the app being backgrounded while the prompt or picker is up.

use webshell_platform::{
    ChooserRequest, MediaPermissionRequest, PermissionHost, PickerHost, UploadRequestId,
    discard_unused,
};
use webshell_types::error::Result;
use webshell_types::file::{CaptureTarget, FileRef};
use webshell_types::state::MediaResource;

/// Receives the file chosen for an upload, or `None` when nothing was chosen.
pub type UploadCallback = Box<dyn FnOnce(Option<FileRef>)>;

/// Where an outstanding upload request is in its negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    /// The camera permission prompt is showing.
    AwaitingPermissionDecision,
    /// The native chooser is showing.
    AwaitingUserPick,
}

/// What a native picker returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeOutcome {
    /// The user picked content; the picker echoed its reference.
    Picked(FileRef),
    /// The picker reported success without a reference (camera apps that
    /// only write to the pre-armed output).
    Completed,
    /// The user backed out.
    Cancelled,
}

/// Who a camera permission decision was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionRouting {
    /// Forwarded to the page's pending media request.
    WebPage { granted: bool },
    /// Used to pick the chooser for the pending upload.
    Chooser { with_camera: bool },
    /// Nothing was waiting for it.
    Unsolicited,
}

struct PendingUpload {
    id: UploadRequestId,
    callback: UploadCallback,
    capture: Option<CaptureTarget>,
    stage: UploadStage,
}

impl PendingUpload {
    /// Consumes the request, so the callback runs exactly once. An armed
    /// capture that is not the resolved file is discarded if still empty.
    fn resolve(self, file: Option<FileRef>) {
        if let Some(capture) = &self.capture
            && file.as_ref() != Some(&capture.uri)
            && let Err(e) = discard_unused(capture)
        {
            log::warn!("Cannot discard {}: {e}", capture.path.display());
        }
        log::info!(
            "Resolving {} with {}",
            self.id,
            file.as_ref().map_or("no file", FileRef::as_str)
        );
        (self.callback)(file);
    }
}

/// Owns the outstanding upload request and page permission request.
/// At most one of each exists at a time.
#[derive(Default)]
pub struct CapabilityBridge {
    next_id: u64,
    upload: Option<PendingUpload>,
    web_request: Option<Box<dyn MediaPermissionRequest>>,
}

impl CapabilityBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_upload(&self) -> Option<UploadRequestId> {
        self.upload.as_ref().map(|u| u.id)
    }

    pub fn upload_stage(&self) -> Option<UploadStage> {
        self.upload.as_ref().map(|u| u.stage)
    }

    /// Capture location armed for the pending upload, if any.
    pub fn armed_capture(&self) -> Option<&CaptureTarget> {
        self.upload.as_ref().and_then(|u| u.capture.as_ref())
    }

    pub fn has_pending_permission_request(&self) -> bool {
        self.web_request.is_some()
    }

    /// A page opened a file input.
    ///
    /// Any upload still outstanding is resolved with no file first. If the
    /// camera permission is held the chooser is presented right away,
    /// otherwise the permission prompt is shown.
    pub fn on_file_chooser_requested<H>(
        &mut self,
        host: &mut H,
        callback: UploadCallback,
    ) -> Result<UploadRequestId>
    where
        H: PermissionHost + PickerHost + ?Sized,
    {
        if let Some(previous) = self.upload.take() {
            log::warn!("{} superseded by a new file chooser", previous.id);
            previous.resolve(None);
        }

        self.next_id += 1;
        let id = UploadRequestId(self.next_id);
        self.upload = Some(PendingUpload {
            id,
            callback,
            capture: None,
            stage: UploadStage::AwaitingPermissionDecision,
        });

        let outcome = if host.has_camera_permission() {
            self.present_chooser(host, true)
        } else {
            log::debug!("{id} waiting for camera permission");
            host.request_camera_permission()
        };
        if let Err(e) = outcome {
            self.cancel_upload();
            return Err(e);
        }
        Ok(id)
    }

    /// A page asked for media capabilities.
    ///
    /// Anything other than the camera is granted as asked. The camera is
    /// granted when the permission is already held; otherwise the request
    /// is parked and the OS prompt shown. A request already parked is
    /// denied first.
    pub fn on_web_permission_request<H>(
        &mut self,
        host: &mut H,
        request: Box<dyn MediaPermissionRequest>,
    ) -> Result<()>
    where
        H: PermissionHost + ?Sized,
    {
        if !request.resources().contains(&MediaResource::VideoCapture) {
            let resources = request.resources().to_vec();
            request.grant(&resources);
            return Ok(());
        }
        if host.has_camera_permission() {
            request.grant(&[MediaResource::VideoCapture]);
            return Ok(());
        }

        if let Some(previous) = self.web_request.take() {
            log::warn!("Page permission request superseded, denying the older one");
            previous.deny();
        }
        self.web_request = Some(request);
        if let Err(e) = host.request_camera_permission() {
            if let Some(parked) = self.web_request.take() {
                parked.deny();
            }
            return Err(e);
        }
        Ok(())
    }

    /// The OS delivered a camera permission decision.
    ///
    /// A parked page request takes precedence and receives the decision
    /// verbatim. Otherwise the decision picks the chooser for an upload
    /// waiting on it: camera + gallery on grant, gallery only on denial.
    pub fn on_camera_permission_result<H>(
        &mut self,
        host: &mut H,
        granted: bool,
    ) -> Result<PermissionRouting>
    where
        H: PickerHost + ?Sized,
    {
        if let Some(request) = self.web_request.take() {
            if granted {
                request.grant(&[MediaResource::VideoCapture]);
            } else {
                request.deny();
            }
            return Ok(PermissionRouting::WebPage { granted });
        }

        match self.upload_stage() {
            Some(UploadStage::AwaitingPermissionDecision) => {
                if let Err(e) = self.present_chooser(host, granted) {
                    self.cancel_upload();
                    return Err(e);
                }
                Ok(PermissionRouting::Chooser {
                    with_camera: granted,
                })
            },
            _ => {
                log::debug!("Camera permission result with nothing waiting for it");
                Ok(PermissionRouting::Unsolicited)
            },
        }
    }

    /// A native picker returned for request `id`.
    ///
    /// Returns whether the result was applied. Results for a request that
    /// is no longer outstanding are dropped.
    pub fn on_native_result(&mut self, id: UploadRequestId, outcome: NativeOutcome) -> bool {
        let Some(upload) = self.upload.take() else {
            log::warn!("Native result for {id} with no upload outstanding");
            return false;
        };
        if upload.id != id {
            log::warn!("Dropping stale native result for {id}, {} is outstanding", upload.id);
            self.upload = Some(upload);
            return false;
        }

        let file = match outcome {
            NativeOutcome::Picked(file) => Some(file),
            NativeOutcome::Completed => upload.capture.as_ref().map(|c| c.uri.clone()),
            NativeOutcome::Cancelled => None,
        };
        upload.resolve(file);
        true
    }

    /// Resolve the outstanding upload, if any, with no file.
    pub fn cancel_upload(&mut self) {
        if let Some(upload) = self.upload.take() {
            upload.resolve(None);
        }
    }

    fn present_chooser<H>(&mut self, host: &mut H, with_camera: bool) -> Result<()>
    where
        H: PickerHost + ?Sized,
    {
        let Some(upload) = self.upload.as_mut() else {
            return Ok(());
        };
        let request = if with_camera {
            match host.allocate_capture_target() {
                Ok(target) => {
                    let request = ChooserRequest::with_camera(upload.id, target.uri.clone());
                    upload.capture = Some(target);
                    request
                },
                Err(e) => {
                    log::warn!("Camera capture unavailable ({e}), offering gallery only");
                    ChooserRequest::gallery_only(upload.id)
                },
            }
        } else {
            ChooserRequest::gallery_only(upload.id)
        };
        upload.stage = UploadStage::AwaitingUserPick;
        log::debug!(
            "Presenting chooser for {} (camera: {})",
            upload.id,
            request.offers_camera()
        );
        host.present_chooser(&request)
    }
}
