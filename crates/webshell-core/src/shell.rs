//! Shell orchestrator.
//!
//! [`Shell`] receives every browser-engine, OS and user callback and fans
//! it out to the lifecycle controller, navigation policy, capability
//! bridge and session store. The components never talk to each other
//! directly. All entry points are expected on one UI thread.

use webshell_platform::{Clock, KeyValueStore, MediaPermissionRequest, ShellHost, UploadRequestId};
use webshell_types::config::EngineSettings;
use webshell_types::error::Result;
use webshell_types::state::ShellState;

use crate::bridge::{CapabilityBridge, NativeOutcome, PermissionRouting, UploadCallback};
use crate::lifecycle::LifecycleController;
use crate::policy::{self, NavigationDecision};
use crate::session::SessionStore;

/// How the host brought the shell up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// Fresh launch: load the configured start URL.
    Cold,
    /// The host restored a saved engine state; the page is already there.
    Restored,
}

/// The shell orchestrator.
pub struct Shell<H, S, C> {
    host: H,
    session: SessionStore<S, C>,
    lifecycle: LifecycleController,
    bridge: CapabilityBridge,
    settings: EngineSettings,
}

impl<H, S, C> Shell<H, S, C>
where
    H: ShellHost,
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(host: H, session: SessionStore<S, C>, settings: EngineSettings) -> Self {
        Self {
            host,
            session,
            lifecycle: LifecycleController::new(),
            bridge: CapabilityBridge::new(),
            settings,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn session(&self) -> &SessionStore<S, C> {
        &self.session
    }

    pub fn bridge(&self) -> &CapabilityBridge {
        &self.bridge
    }

    pub fn state(&self) -> ShellState {
        self.lifecycle.state()
    }

    /// Apply engine settings and show the first page.
    ///
    /// A cold start without network goes straight to the error screen.
    pub fn start(&mut self, mode: StartMode) -> Result<()> {
        self.host.apply_settings(&self.settings)?;
        match mode {
            StartMode::Restored => {
                log::info!("Resuming restored engine state");
                self.lifecycle.show(&mut self.host, ShellState::Content);
            },
            StartMode::Cold => {
                self.lifecycle.show(&mut self.host, ShellState::Loading);
                if self.host.is_network_available() {
                    let url = self.session.start_url()?;
                    log::info!("Loading {url}");
                    self.host.load_url(&url)?;
                } else {
                    log::warn!("No network at start");
                    self.lifecycle.show(&mut self.host, ShellState::Error);
                }
            },
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Engine callbacks
    // -------------------------------------------------------------------

    pub fn on_page_started(&mut self) {
        self.lifecycle.on_navigation_started(&mut self.host);
    }

    /// A main-frame load finished. Also updates the change-server button,
    /// which is only offered on login/registration pages.
    pub fn on_page_finished(&mut self, url: Option<&str>) {
        self.lifecycle.on_navigation_finished(&mut self.host);
        let auth = url.is_some_and(policy::is_auth_page);
        self.host.set_change_server_visible(auth);
    }

    pub fn on_received_error(&mut self, is_main_frame: bool) {
        self.lifecycle.on_navigation_failed(&mut self.host, is_main_frame);
    }

    /// Returns `true` when the shell took over the navigation (the URL
    /// was handed to the system) and the engine must not navigate.
    pub fn should_override_url_loading(&mut self, url: &str) -> Result<bool> {
        let origin = self.session.get_origin()?;
        match policy::should_intercept(url, &origin) {
            NavigationDecision::Stay => Ok(false),
            NavigationDecision::External => {
                self.host.open_external(url)?;
                Ok(true)
            },
        }
    }

    pub fn on_show_file_chooser(&mut self, callback: UploadCallback) -> Result<UploadRequestId> {
        self.bridge.on_file_chooser_requested(&mut self.host, callback)
    }

    pub fn on_permission_request(&mut self, request: Box<dyn MediaPermissionRequest>) -> Result<()> {
        self.bridge.on_web_permission_request(&mut self.host, request)
    }

    // -------------------------------------------------------------------
    // OS callbacks
    // -------------------------------------------------------------------

    pub fn on_camera_permission_result(&mut self, granted: bool) -> Result<PermissionRouting> {
        self.bridge.on_camera_permission_result(&mut self.host, granted)
    }

    /// Returns whether the result matched the outstanding upload.
    pub fn on_chooser_result(&mut self, id: UploadRequestId, outcome: NativeOutcome) -> bool {
        self.bridge.on_native_result(id, outcome)
    }

    /// App came to the foreground. A stale session clears any error and
    /// reloads without user action. Returns whether it did.
    pub fn on_resume(&mut self) -> Result<bool> {
        let stale = self.session.record_foreground_now()?;
        if stale {
            self.lifecycle.force_reload(&mut self.host)?;
        }
        Ok(stale)
    }

    pub fn on_pause(&mut self) -> Result<()> {
        self.session.record_background_now()
    }

    /// Returns whether the back key was consumed by in-page history.
    pub fn on_back_pressed(&mut self) -> Result<bool> {
        if self.host.can_go_back() {
            self.host.go_back()?;
            return Ok(true);
        }
        Ok(false)
    }

    // -------------------------------------------------------------------
    // User actions
    // -------------------------------------------------------------------

    pub fn on_retry(&mut self) -> Result<()> {
        let url = self.session.start_url()?;
        self.lifecycle.on_retry(&mut self.host, &url)
    }

    pub fn on_pull_to_refresh(&mut self) -> Result<bool> {
        self.lifecycle.on_pull_to_refresh(&mut self.host)
    }

    pub fn on_scroll(&mut self, scroll_y: i32) {
        self.lifecycle.on_scroll(&mut self.host, scroll_y);
    }

    /// Open the server prompt, pre-filled with the origin of the page on
    /// screen or the configured origin.
    pub fn on_change_server_clicked(&mut self) -> Result<()> {
        let prefill = match self.host.current_url().as_deref().and_then(policy::origin_of) {
            Some(origin) => origin,
            None => self.session.get_origin()?,
        };
        self.host.prompt_server_url(&prefill)
    }

    /// The user confirmed the server prompt. A valid origin is persisted
    /// and loaded fresh. Returns whether the origin changed.
    pub fn on_server_entered(&mut self, input: &str) -> Result<bool> {
        if self.session.set_origin(input)?.is_none() {
            return Ok(false);
        }
        let url = self.session.start_url()?;
        self.lifecycle.load_fresh(&mut self.host, &url)?;
        Ok(true)
    }
}
