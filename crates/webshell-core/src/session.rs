//! Session/config store: the configured server origin and the
//! last-foreground timestamp that drives staleness reloads.

use webshell_platform::{Clock, KeyValueStore};
use webshell_types::error::Result;

pub const KEY_SERVER_URL: &str = "server_url";
pub const KEY_LAST_SEEN: &str = "last_seen_at";

/// A session backgrounded for at least this long reloads on return.
pub const STALE_AFTER_MS: i64 = 15 * 60 * 1000;

/// Normalize user input into an origin: trimmed, `https://` added when no
/// scheme is given, trailing slashes removed.
///
/// Returns `None` for input that is empty or has nothing after the scheme.
pub fn normalize_origin(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let origin = with_scheme.trim_end_matches('/');
    let rest = origin.split_once("://").map_or("", |(_, rest)| rest);
    if rest.is_empty() {
        return None;
    }
    Some(origin.to_string())
}

/// Persisted session state on top of a key-value store.
pub struct SessionStore<S, C> {
    store: S,
    clock: C,
    default_origin: String,
}

impl<S: KeyValueStore, C: Clock> SessionStore<S, C> {
    pub fn new(store: S, clock: C, default_origin: &str) -> Self {
        Self {
            store,
            clock,
            default_origin: default_origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The configured origin, or the default when none was ever set.
    pub fn get_origin(&self) -> Result<String> {
        Ok(self
            .store
            .get_string(KEY_SERVER_URL)?
            .unwrap_or_else(|| self.default_origin.clone()))
    }

    /// The URL the shell loads on start and retry: the origin's root.
    pub fn start_url(&self) -> Result<String> {
        Ok(format!("{}/", self.get_origin()?))
    }

    /// Normalize and persist a user-entered origin. Returns the stored
    /// origin, or `None` when the input was rejected and nothing changed.
    pub fn set_origin(&mut self, input: &str) -> Result<Option<String>> {
        let Some(origin) = normalize_origin(input) else {
            log::info!("Rejected empty server URL");
            return Ok(None);
        };
        self.store.set_string(KEY_SERVER_URL, &origin)?;
        log::info!("Server origin set to {origin}");
        Ok(Some(origin))
    }

    /// Record a foreground transition. Returns whether the session was
    /// away long enough to be stale. The timestamp is always refreshed.
    pub fn record_foreground_now(&mut self) -> Result<bool> {
        let now = self.clock.now_millis();
        let stale = match self.store.get_i64(KEY_LAST_SEEN)? {
            Some(last) if last > 0 => now.saturating_sub(last) >= STALE_AFTER_MS,
            _ => false,
        };
        self.store.set_i64(KEY_LAST_SEEN, now)?;
        if stale {
            log::info!("Session stale after background");
        }
        Ok(stale)
    }

    pub fn record_background_now(&mut self) -> Result<()> {
        self.store.set_i64(KEY_LAST_SEEN, self.clock.now_millis())
    }
}
