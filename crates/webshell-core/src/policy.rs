//! Navigation policy: which navigations stay in the embedded view, and
//! which pages are authentication pages.

use url::Url;

/// Where a navigation request should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the engine navigate in place.
    Stay,
    /// Hand the URL to the platform's default handler; the view does not move.
    External,
}

/// Decide whether a navigation to `target` stays inside the shell.
///
/// Only hosts are compared, exactly and case-sensitively, as written in the
/// URL; scheme and port are ignored. An origin that does not parse, or has
/// no host, sends everything external so the user is never trapped in a
/// broken in-app view.
pub fn should_intercept(target: &str, configured_origin: &str) -> NavigationDecision {
    let Some(origin_host) = host_of(configured_origin) else {
        log::warn!("Configured origin `{configured_origin}` has no host, routing externally");
        return NavigationDecision::External;
    };
    match host_of(target) {
        Some(host) if host == origin_host => NavigationDecision::Stay,
        _ => {
            log::debug!("External navigation to {target}");
            NavigationDecision::External
        },
    }
}

/// Whether `url` is the web app's login or registration page.
///
/// Drives the visibility of the change-server button only.
pub fn is_auth_page(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let path = parsed.path().trim_end_matches('/');
    path == "/login" || path == "/register"
}

/// `scheme://host` of `url`, used to pre-fill the server prompt.
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{}://{host}", parsed.scheme()))
}

/// The host exactly as written in `url`.
///
/// `Url` only gates malformed input here: it lowercases hosts, so the text
/// itself is cut from the authority (userinfo and port dropped).
fn host_of(url: &str) -> Option<&str> {
    Url::parse(url).ok()?.host_str()?;
    let (_, rest) = url.trim().split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = if host_port.starts_with('[') {
        host_port.split_inclusive(']').next()?
    } else {
        host_port.split(':').next()?
    };
    (!host.is_empty()).then_some(host)
}
