//! Display state and engine capability identifiers.

/// What the shell is currently showing.
///
/// Exactly one state is active. The shell starts in `Loading` and cycles
/// between the three for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellState {
    /// Spinner over the (possibly blank) web view.
    #[default]
    Loading,
    /// The web view with the loaded page.
    Content,
    /// Full-screen error with retry and change-server affordances.
    Error,
}

impl std::fmt::Display for ShellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Content => write!(f, "content"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A capability a web page can ask the engine for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaResource {
    /// Camera stream (`getUserMedia({ video })`).
    VideoCapture,
    /// Microphone stream.
    AudioCapture,
    /// Protected media playback (EME).
    ProtectedMediaId,
    /// MIDI system-exclusive messages.
    MidiSysex,
    /// Anything the engine reports that the shell has no name for.
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_loading() {
        assert_eq!(ShellState::default(), ShellState::Loading);
    }

    #[test]
    fn state_display() {
        assert_eq!(ShellState::Loading.to_string(), "loading");
        assert_eq!(ShellState::Content.to_string(), "content");
        assert_eq!(ShellState::Error.to_string(), "error");
    }
}
