//! webshell desktop driver.
//!
//! Runs the shell against a console host: engine, OS and user events are
//! read one per line from a script file or stdin, and every host call the
//! shell makes is printed.
//!
//! Usage: `webshell [--config shell.toml] [--offline] [events.txt]`

mod console_host;
mod script;

use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use console_host::{ConsoleHost, ConsoleMediaRequest};
use script::{Command, parse_line};
use webshell_core::{SessionStore, Shell, StartMode, UploadCallback};
use webshell_platform::{FileStore, SystemClock};
use webshell_types::ShellConfig;

type ConsoleShell = Shell<ConsoleHost, FileStore, SystemClock>;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    offline: bool,
    script: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            },
            "--offline" => parsed.offline = true,
            flag if flag.starts_with("--") => bail!("unknown flag `{flag}`"),
            path => parsed.script = Some(PathBuf::from(path)),
        }
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    log::info!("Starting webshell (default server {})", config.default_server);

    let store = FileStore::open(&config.store_path)
        .with_context(|| format!("opening {}", config.store_path.display()))?;
    let session = SessionStore::new(store, SystemClock, &config.default_server);
    let host = ConsoleHost::new(&config.capture_dir, !args.offline);
    let mut shell = Shell::new(host, session, config.engine.clone());
    shell.start(StartMode::Cold)?;

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(std::io::stdin().lock()),
    };

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                log::error!("line {}: {e:#}", lineno + 1);
                continue;
            },
        };
        match dispatch(&mut shell, command) {
            Ok(true) => {},
            Ok(false) => break,
            Err(e) => log::error!("line {}: {e:#}", lineno + 1),
        }
    }

    log::info!("Shutting down");
    Ok(())
}

fn upload_printer() -> UploadCallback {
    Box::new(|file| match file {
        Some(file) => println!("page: upload received {file}"),
        None => println!("page: upload received no file"),
    })
}

/// Feed one event to the shell. Returns `false` when the session should end.
fn dispatch(shell: &mut ConsoleShell, command: Command) -> Result<bool> {
    match command {
        Command::Started => shell.on_page_started(),
        Command::Finished(url) => shell.on_page_finished(url.as_deref()),
        Command::Failed { main_frame } => shell.on_received_error(main_frame),
        Command::Navigate(url) => {
            if !shell.should_override_url_loading(&url)? {
                shell.host_mut().navigate_in_place(&url);
            }
        },
        Command::Chooser => {
            let id = shell.on_show_file_chooser(upload_printer())?;
            log::info!("File chooser opened as {id}");
        },
        Command::Media(resources) => {
            shell.on_permission_request(ConsoleMediaRequest::new(resources))?;
        },
        Command::Permission { granted } => {
            shell.host_mut().set_camera_granted(granted);
            let routing = shell.on_camera_permission_result(granted)?;
            log::debug!("Permission decision routed to {routing:?}");
        },
        Command::Result(id, outcome) => {
            if !shell.on_chooser_result(id, outcome) {
                log::warn!("No outstanding upload matched {id}");
            }
        },
        Command::Retry => shell.on_retry()?,
        Command::Refresh => {
            shell.on_pull_to_refresh()?;
        },
        Command::Scroll(y) => shell.on_scroll(y),
        Command::Back => {
            if !shell.on_back_pressed()? {
                println!("os: back leaves the app");
            }
        },
        Command::ChangeServer => shell.on_change_server_clicked()?,
        Command::Server(input) => {
            if !shell.on_server_entered(&input)? {
                println!("view: server unchanged");
            }
        },
        Command::Pause => shell.on_pause()?,
        Command::Resume => {
            shell.on_resume()?;
        },
        Command::State => {
            let pending = shell
                .bridge()
                .pending_upload()
                .map_or_else(|| "none".to_string(), |id| id.to_string());
            println!(
                "state: {} origin={} pending={pending}",
                shell.state(),
                shell.session().get_origin()?
            );
        },
        Command::Quit => return Ok(false),
    }
    Ok(true)
}
