//! Event script parsing.
//!
//! Each line names one engine, OS or user event. Blank lines and lines
//! starting with `#` are skipped.

use anyhow::{Context, Result, bail};
use webshell_core::NativeOutcome;
use webshell_platform::UploadRequestId;
use webshell_types::file::FileRef;
use webshell_types::state::MediaResource;

/// One scripted event.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Started,
    Finished(Option<String>),
    Failed { main_frame: bool },
    /// The page asked to navigate (link click, form post, redirect).
    Navigate(String),
    Chooser,
    Media(Vec<MediaResource>),
    Permission { granted: bool },
    Result(UploadRequestId, NativeOutcome),
    Retry,
    Refresh,
    Scroll(i32),
    Back,
    ChangeServer,
    Server(String),
    Pause,
    Resume,
    State,
    Quit,
}

/// Parse one script line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let cmd = match verb {
        "started" => Command::Started,
        "finished" => Command::Finished((!rest.is_empty()).then(|| rest.to_string())),
        "failed" => match rest {
            "" | "main" => Command::Failed { main_frame: true },
            "sub" => Command::Failed { main_frame: false },
            other => bail!("failed: expected `main` or `sub`, got `{other}`"),
        },
        "navigate" => Command::Navigate(required(verb, rest)?.to_string()),
        "chooser" => Command::Chooser,
        "media" => Command::Media(
            required(verb, rest)?
                .split(',')
                .map(|r| parse_resource(r.trim()))
                .collect(),
        ),
        "permission" => match rest {
            "grant" => Command::Permission { granted: true },
            "deny" => Command::Permission { granted: false },
            other => bail!("permission: expected `grant` or `deny`, got `{other}`"),
        },
        "picked" => {
            let (id, uri) = required(verb, rest)?
                .split_once(' ')
                .context("picked: expected `<id> <uri>`")?;
            Command::Result(parse_id(id)?, NativeOutcome::Picked(FileRef::new(uri.trim())))
        },
        "captured" => Command::Result(parse_id(rest)?, NativeOutcome::Completed),
        "cancelled" => Command::Result(parse_id(rest)?, NativeOutcome::Cancelled),
        "retry" => Command::Retry,
        "refresh" => Command::Refresh,
        "scroll" => Command::Scroll(
            required(verb, rest)?
                .parse()
                .with_context(|| format!("scroll: bad offset `{rest}`"))?,
        ),
        "back" => Command::Back,
        "change-server" => Command::ChangeServer,
        // The prompt accepts anything, including blank input.
        "server" => Command::Server(rest.to_string()),
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "state" => Command::State,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown event `{other}`"),
    };
    Ok(Some(cmd))
}

fn required<'a>(verb: &str, rest: &'a str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("{verb}: missing argument");
    }
    Ok(rest)
}

fn parse_id(s: &str) -> Result<UploadRequestId> {
    let digits = s.trim().trim_start_matches("upload#");
    let n = digits
        .parse()
        .with_context(|| format!("bad upload id `{s}`"))?;
    Ok(UploadRequestId(n))
}

fn parse_resource(name: &str) -> MediaResource {
    match name {
        "video" | "camera" => MediaResource::VideoCapture,
        "audio" | "microphone" => MediaResource::AudioCapture,
        "protected-media" => MediaResource::ProtectedMediaId,
        "midi-sysex" => MediaResource::MidiSysex,
        other => MediaResource::Other(other.to_string()),
    }
}
