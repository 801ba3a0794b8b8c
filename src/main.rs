mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod hit;
mod logging;
mod navigation;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::{AppConfig, LoggingConfig, OpenerConfig, ViewConfig};
use crate::event::{Event, EventHandler};
use crate::fs::opener::SystemOpener;
use crate::navigation::NavigationController;
use crate::tui::{install_panic_hook, Tui};

/// A mouse-driven terminal file explorer.
#[derive(Parser, Debug)]
#[command(name = "fexplore", version, about)]
struct Cli {
    /// Directory to start in (defaults to the home directory)
    path: Option<PathBuf>,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Program used to open regular files
    #[arg(long)]
    opener: Option<String>,

    /// Use ASCII tags instead of nerd font icons
    #[arg(long)]
    no_icons: bool,

    /// Write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// CLI flags as a partial config layered on top of the files.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            opener: OpenerConfig {
                command: self.opener.clone(),
            },
            view: ViewConfig {
                use_icons: self.no_icons.then_some(false),
                ..Default::default()
            },
            logging: LoggingConfig {
                file: self
                    .log_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    if let Some(log_path) = config.log_file() {
        if let Err(e) = logging::init(&log_path, config.log_level()) {
            eprintln!("Warning: logging disabled ({}): {}", log_path.display(), e);
        }
    }

    let home = dirs::home_dir()
        .ok_or_else(|| error::AppError::InvalidPath("home directory is unknown".into()))?;
    let start = cli
        .path
        .clone()
        .or_else(|| config.start_path())
        .unwrap_or_else(|| home.clone());
    if !start.is_dir() {
        return Err(error::AppError::InvalidPath(format!(
            "{} is not a directory",
            start.display()
        )));
    }

    let opener = SystemOpener::new(config.opener_command());
    log::info!("opening files with {}", opener.program());
    let nav = NavigationController::new(home, start, Box::new(opener))?;
    let mut app = App::new(nav, &config);
    log::info!("started in {}", app.nav.current_dir().display());

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(250));

    loop {
        app.clear_expired_status();
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Mouse(mouse) => handler::handle_mouse_event(&mut app, mouse),
            Event::Tick | Event::Resize => {}
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    log::info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "fexplore",
            "/srv",
            "--opener",
            "gio-open",
            "--no-icons",
            "--log-file",
            "/tmp/f.log",
        ]);
        assert_eq!(cli.path, Some(PathBuf::from("/srv")));
        let overrides = cli.overrides();
        assert_eq!(overrides.opener_command(), "gio-open");
        assert!(!overrides.use_icons());
        assert_eq!(overrides.log_file(), Some(PathBuf::from("/tmp/f.log")));
    }

    #[test]
    fn absent_flags_do_not_override() {
        let cli = Cli::parse_from(["fexplore"]);
        let overrides = cli.overrides();
        assert!(overrides.opener.command.is_none());
        assert!(overrides.view.use_icons.is_none());
        assert!(overrides.logging.file.is_none());
    }
}
