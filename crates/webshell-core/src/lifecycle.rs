//! View lifecycle controller: the loading / content / error machine.

use webshell_platform::{NavigationHost, ShellView};
use webshell_types::error::Result;
use webshell_types::state::ShellState;

/// Owns the display state and reacts to page-load events, retry and
/// pull-to-refresh.
///
/// `Error` sticks through navigation starts and is cleared only by a
/// finished main-frame load or an explicit user action.
#[derive(Debug, Default)]
pub struct LifecycleController {
    state: ShellState,
}

impl LifecycleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn is_error(&self) -> bool {
        self.state == ShellState::Error
    }

    /// Switch to `state` and tell the view.
    pub fn show<H: ShellView + ?Sized>(&mut self, host: &mut H, state: ShellState) {
        if self.state != state {
            log::info!("Shell state {} -> {}", self.state, state);
        }
        self.state = state;
        host.show_state(state);
    }

    pub fn on_navigation_started<H: ShellView + ?Sized>(&mut self, host: &mut H) {
        if !self.is_error() {
            self.show(host, ShellState::Loading);
        }
    }

    /// A main-frame load completed. Always ends the refresh spinner and
    /// leaves the shell showing content.
    pub fn on_navigation_finished<H: ShellView + ?Sized>(&mut self, host: &mut H) {
        host.set_refreshing(false);
        self.show(host, ShellState::Content);
    }

    /// Returns whether the failure changed the display. Sub-resource
    /// failures never do.
    pub fn on_navigation_failed<H: ShellView + ?Sized>(
        &mut self,
        host: &mut H,
        is_main_frame: bool,
    ) -> bool {
        if !is_main_frame {
            log::debug!("Ignoring sub-resource load failure");
            return false;
        }
        log::warn!("Main-frame load failed");
        self.show(host, ShellState::Error);
        true
    }

    /// Clear any error and load `url` from scratch. Used by retry and by
    /// server reconfiguration.
    pub fn load_fresh<H>(&mut self, host: &mut H, url: &str) -> Result<()>
    where
        H: ShellView + NavigationHost + ?Sized,
    {
        self.show(host, ShellState::Loading);
        host.load_url(url)
    }

    pub fn on_retry<H>(&mut self, host: &mut H, start_url: &str) -> Result<()>
    where
        H: ShellView + NavigationHost + ?Sized,
    {
        log::info!("Retrying {start_url}");
        self.load_fresh(host, start_url)
    }

    /// Returns whether a reload was issued. A view with an empty
    /// back/forward list has nothing to refresh.
    pub fn on_pull_to_refresh<H>(&mut self, host: &mut H) -> Result<bool>
    where
        H: ShellView + NavigationHost + ?Sized,
    {
        if host.history_len() == 0 {
            host.set_refreshing(false);
            return Ok(false);
        }
        self.force_reload(host)?;
        Ok(true)
    }

    /// Clear any error and reload the current page.
    pub fn force_reload<H>(&mut self, host: &mut H) -> Result<()>
    where
        H: ShellView + NavigationHost + ?Sized,
    {
        if self.is_error() {
            self.show(host, ShellState::Loading);
        }
        host.reload()
    }

    /// Pull-to-refresh is armed only while the page is scrolled to the very top.
    pub fn on_scroll<H: ShellView + ?Sized>(&mut self, host: &mut H, scroll_y: i32) {
        host.set_refresh_enabled(scroll_y == 0);
    }
}
