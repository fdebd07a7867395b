//! Shared test utilities for the shell components.
//!
//! Provides a [`MockHost`] that records every host call for assertion, a
//! [`MockPermissionRequest`] standing in for the engine's media request,
//! and a [`ManualClock`].

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use webshell_platform::{
    CaptureDir, ChooserRequest, Clock, MediaPermissionRequest, NavigationHost, PermissionHost, PickerHost,
    ShellView, SystemHost,
};
use webshell_types::config::EngineSettings;
use webshell_types::error::{Result, ShellError};
use webshell_types::file::{CaptureTarget, FileRef};
use webshell_types::state::{MediaResource, ShellState};

use crate::bridge::UploadCallback;

/// A recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    ApplySettings,
    LoadUrl(String),
    Reload,
    GoBack,
    ShowState(ShellState),
    SetRefreshing(bool),
    SetRefreshEnabled(bool),
    SetChangeServerVisible(bool),
    PromptServer(String),
    RequestCameraPermission,
    AllocateCapture,
    PresentChooser(ChooserRequest),
    OpenExternal(String),
}

/// A host with scripted answers that records every call.
pub struct MockHost {
    pub calls: Vec<HostCall>,
    pub camera_granted: bool,
    pub network_available: bool,
    pub history_len: usize,
    pub current_url: Option<String>,
    pub fail_capture: bool,
    pub fail_prompt: bool,
    pub fail_chooser: bool,
    /// When set, capture targets are real files in this directory.
    pub capture_root: Option<PathBuf>,
    captures: u32,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            camera_granted: false,
            network_available: true,
            history_len: 1,
            current_url: None,
            fail_capture: false,
            fail_prompt: false,
            fail_chooser: false,
            capture_root: None,
            captures: 0,
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn has_call(&self, call: &HostCall) -> bool {
        self.calls.contains(call)
    }

    /// The most recent `ShowState` call, if any.
    pub fn last_shown(&self) -> Option<ShellState> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::ShowState(s) => Some(*s),
            _ => None,
        })
    }

    /// Every chooser presented so far.
    pub fn choosers(&self) -> Vec<&ChooserRequest> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::PresentChooser(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn permission_prompts(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::RequestCameraPermission))
            .count()
    }

    pub fn loads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::LoadUrl(u) => Some(u.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl NavigationHost for MockHost {
    fn apply_settings(&mut self, _settings: &EngineSettings) -> Result<()> {
        self.calls.push(HostCall::ApplySettings);
        Ok(())
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        self.calls.push(HostCall::LoadUrl(url.to_string()));
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.calls.push(HostCall::Reload);
        Ok(())
    }

    fn current_url(&self) -> Option<String> {
        self.current_url.clone()
    }

    fn history_len(&self) -> usize {
        self.history_len
    }

    fn can_go_back(&self) -> bool {
        self.history_len > 1
    }

    fn go_back(&mut self) -> Result<()> {
        self.calls.push(HostCall::GoBack);
        Ok(())
    }
}

impl PermissionHost for MockHost {
    fn has_camera_permission(&self) -> bool {
        self.camera_granted
    }

    fn request_camera_permission(&mut self) -> Result<()> {
        self.calls.push(HostCall::RequestCameraPermission);
        if self.fail_prompt {
            return Err(ShellError::Host("permission prompt unavailable".into()));
        }
        Ok(())
    }
}

impl PickerHost for MockHost {
    fn allocate_capture_target(&mut self) -> Result<CaptureTarget> {
        self.calls.push(HostCall::AllocateCapture);
        if self.fail_capture {
            return Err(ShellError::Capture("disk full".into()));
        }
        if let Some(root) = &self.capture_root {
            return CaptureDir::new(root).allocate(0);
        }
        self.captures += 1;
        let path = std::path::PathBuf::from(format!("/cache/JPEG_{}.jpg", self.captures));
        Ok(CaptureTarget {
            uri: FileRef::new(format!("file://{}", path.display())),
            path,
        })
    }

    fn present_chooser(&mut self, request: &ChooserRequest) -> Result<()> {
        self.calls.push(HostCall::PresentChooser(request.clone()));
        if self.fail_chooser {
            return Err(ShellError::Host("no activity handles the chooser".into()));
        }
        Ok(())
    }
}

impl ShellView for MockHost {
    fn show_state(&mut self, state: ShellState) {
        self.calls.push(HostCall::ShowState(state));
    }

    fn set_refreshing(&mut self, refreshing: bool) {
        self.calls.push(HostCall::SetRefreshing(refreshing));
    }

    fn set_refresh_enabled(&mut self, enabled: bool) {
        self.calls.push(HostCall::SetRefreshEnabled(enabled));
    }

    fn set_change_server_visible(&mut self, visible: bool) {
        self.calls.push(HostCall::SetChangeServerVisible(visible));
    }

    fn prompt_server_url(&mut self, prefill: &str) -> Result<()> {
        self.calls.push(HostCall::PromptServer(prefill.to_string()));
        Ok(())
    }
}

impl SystemHost for MockHost {
    fn open_external(&mut self, url: &str) -> Result<()> {
        self.calls.push(HostCall::OpenExternal(url.to_string()));
        Ok(())
    }

    fn is_network_available(&self) -> bool {
        self.network_available
    }
}

/// How a [`MockPermissionRequest`] was answered.
#[derive(Debug, Clone, PartialEq)]
pub enum PermissionAnswer {
    Granted(Vec<MediaResource>),
    Denied,
}

/// A page media request whose answer is observable after it is consumed.
pub struct MockPermissionRequest {
    resources: Vec<MediaResource>,
    answer: Rc<RefCell<Option<PermissionAnswer>>>,
}

impl MockPermissionRequest {
    pub fn new(
        resources: Vec<MediaResource>,
    ) -> (Box<Self>, Rc<RefCell<Option<PermissionAnswer>>>) {
        let answer = Rc::new(RefCell::new(None));
        let req = Box::new(Self {
            resources,
            answer: Rc::clone(&answer),
        });
        (req, answer)
    }
}

impl MediaPermissionRequest for MockPermissionRequest {
    fn resources(&self) -> &[MediaResource] {
        &self.resources
    }

    fn grant(self: Box<Self>, resources: &[MediaResource]) {
        *self.answer.borrow_mut() = Some(PermissionAnswer::Granted(resources.to_vec()));
    }

    fn deny(self: Box<Self>) {
        *self.answer.borrow_mut() = Some(PermissionAnswer::Denied);
    }
}

/// Every value an upload callback was invoked with.
pub type UploadLog = Rc<RefCell<Vec<Option<FileRef>>>>;

/// An upload callback that appends its argument to the returned log.
pub fn upload_sink() -> (UploadCallback, UploadLog) {
    let log: UploadLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let cb: UploadCallback = Box::new(move |file| sink.borrow_mut().push(file));
    (cb, log)
}

/// A clock the test moves by hand.
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<i64>>);

impl ManualClock {
    pub fn at(millis: i64) -> Self {
        Self(Rc::new(Cell::new(millis)))
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.0.set(self.0.get() + minutes * 60 * 1000);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.get()
    }
}
