//! A host that stands in for the browser engine and the OS on a terminal.
//!
//! Engine navigation is simulated with an in-memory back/forward list;
//! every call the shell makes is echoed to stdout so a scripted session
//! reads like a trace.

use std::path::PathBuf;

use webshell_platform::{
    CaptureDir, ChooserRequest, Clock, MediaPermissionRequest, NavigationHost, PermissionHost,
    PickerHost, ShellView, SystemClock, SystemHost,
};
use webshell_types::config::EngineSettings;
use webshell_types::error::Result;
use webshell_types::file::CaptureTarget;
use webshell_types::state::{MediaResource, ShellState};

pub struct ConsoleHost {
    history: Vec<String>,
    /// Index of the current entry in `history`.
    cursor: Option<usize>,
    camera_granted: bool,
    network_available: bool,
    captures: CaptureDir,
    /// Everything echoed so far, kept for inspection.
    pub transcript: Vec<String>,
}

impl ConsoleHost {
    pub fn new(capture_dir: impl Into<PathBuf>, network_available: bool) -> Self {
        Self {
            history: Vec::new(),
            cursor: None,
            camera_granted: false,
            network_available,
            captures: CaptureDir::new(capture_dir),
            transcript: Vec::new(),
        }
    }

    /// The OS recorded a permission decision.
    pub fn set_camera_granted(&mut self, granted: bool) {
        self.camera_granted = granted;
    }

    /// The engine navigated in place (link click inside the app).
    pub fn navigate_in_place(&mut self, url: &str) {
        self.push_history(url);
        self.echo(format!("engine: navigate {url}"));
    }

    fn push_history(&mut self, url: &str) {
        let keep = self.cursor.map_or(0, |i| i + 1);
        self.history.truncate(keep);
        self.history.push(url.to_string());
        self.cursor = Some(self.history.len() - 1);
    }

    fn echo(&mut self, line: String) {
        println!("{line}");
        self.transcript.push(line);
    }
}

impl NavigationHost for ConsoleHost {
    fn apply_settings(&mut self, settings: &EngineSettings) -> Result<()> {
        self.echo(format!(
            "engine: settings js={} storage={} ua+={}",
            settings.javascript, settings.dom_storage, settings.user_agent_suffix
        ));
        Ok(())
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        self.push_history(url);
        self.echo(format!("engine: load {url}"));
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        let current = self.current_url().unwrap_or_default();
        self.echo(format!("engine: reload {current}"));
        Ok(())
    }

    fn current_url(&self) -> Option<String> {
        self.cursor.and_then(|i| self.history.get(i).cloned())
    }

    fn history_len(&self) -> usize {
        self.history.len()
    }

    fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|i| i > 0)
    }

    fn go_back(&mut self) -> Result<()> {
        if let Some(i) = self.cursor.filter(|&i| i > 0) {
            self.cursor = Some(i - 1);
            let url = self.history[i - 1].clone();
            self.echo(format!("engine: back to {url}"));
        }
        Ok(())
    }
}

impl PermissionHost for ConsoleHost {
    fn has_camera_permission(&self) -> bool {
        self.camera_granted
    }

    fn request_camera_permission(&mut self) -> Result<()> {
        self.echo("os: camera permission prompt".to_string());
        Ok(())
    }
}

impl PickerHost for ConsoleHost {
    fn allocate_capture_target(&mut self) -> Result<CaptureTarget> {
        self.captures.allocate(SystemClock.now_millis())
    }

    fn present_chooser(&mut self, request: &ChooserRequest) -> Result<()> {
        let line = match &request.capture {
            Some(capture) => format!(
                "os: chooser {} [take photo -> {capture}] [gallery {}]",
                request.id, request.mime_filter
            ),
            None => format!("os: chooser {} [gallery {}]", request.id, request.mime_filter),
        };
        self.echo(line);
        Ok(())
    }
}

impl ShellView for ConsoleHost {
    fn show_state(&mut self, state: ShellState) {
        self.echo(format!("view: {state}"));
    }

    fn set_refreshing(&mut self, refreshing: bool) {
        self.echo(format!("view: refreshing={refreshing}"));
    }

    fn set_refresh_enabled(&mut self, enabled: bool) {
        self.echo(format!("view: pull-to-refresh enabled={enabled}"));
    }

    fn set_change_server_visible(&mut self, visible: bool) {
        self.echo(format!("view: change-server button visible={visible}"));
    }

    fn prompt_server_url(&mut self, prefill: &str) -> Result<()> {
        self.echo(format!("view: server prompt [{prefill}]"));
        Ok(())
    }
}

impl SystemHost for ConsoleHost {
    fn open_external(&mut self, url: &str) -> Result<()> {
        self.echo(format!("os: open externally {url}"));
        Ok(())
    }

    fn is_network_available(&self) -> bool {
        self.network_available
    }
}

/// A page media request answered on the console.
pub struct ConsoleMediaRequest {
    resources: Vec<MediaResource>,
}

impl ConsoleMediaRequest {
    pub fn new(resources: Vec<MediaResource>) -> Box<Self> {
        Box::new(Self { resources })
    }
}

impl MediaPermissionRequest for ConsoleMediaRequest {
    fn resources(&self) -> &[MediaResource] {
        &self.resources
    }

    fn grant(self: Box<Self>, resources: &[MediaResource]) {
        println!("page: media granted {resources:?}");
    }

    fn deny(self: Box<Self>) {
        println!("page: media denied {:?}", self.resources);
    }
}
