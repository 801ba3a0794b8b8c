//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--opener`, `--no-icons`, `--log-file`, start path)
//! 2. `--config <file>`
//! 3. `$FEXPLORE_CONFIG` environment variable (path to config file)
//! 4. Project-local `.fexplore.toml` in the current working directory
//! 5. Global `~/.config/fexplore/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fs::opener;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Starting directory (overridden by CLI positional arg). Defaults to home.
    pub start_path: Option<String>,
}

/// How regular files are handed to the desktop.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OpenerConfig {
    /// Launcher program, called with the file path as its only argument.
    pub command: Option<String>,
}

/// Listing display settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ViewConfig {
    /// Use nerd font icons (false = ASCII tags).
    pub use_icons: Option<bool>,
    /// Maximum number of recursive-view lines drawn.
    pub recursive_display_limit: Option<usize>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// "error", "warn", "info", "debug" or "trace".
    pub level: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub opener: OpenerConfig,
    pub view: ViewConfig,
    pub logging: LoggingConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default cap on drawn recursive-view lines.
pub const DEFAULT_RECURSIVE_DISPLAY_LIMIT: usize = 100;
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "FEXPLORE_CONFIG";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".fexplore.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fexplore").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                start_path: other
                    .general
                    .start_path
                    .clone()
                    .or(self.general.start_path),
            },
            opener: OpenerConfig {
                command: other.opener.command.clone().or(self.opener.command),
            },
            view: ViewConfig {
                use_icons: other.view.use_icons.or(self.view.use_icons),
                recursive_display_limit: other
                    .view
                    .recursive_display_limit
                    .or(self.view.recursive_display_limit),
            },
            logging: LoggingConfig {
                level: other.logging.level.clone().or(self.logging.level),
                file: other.logging.file.clone().or(self.logging.file),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Configured start directory, if any.
    pub fn start_path(&self) -> Option<PathBuf> {
        self.general.start_path.as_deref().map(expand_home)
    }

    /// Launcher used to open regular files.
    pub fn opener_command(&self) -> &str {
        self.opener
            .command
            .as_deref()
            .unwrap_or(opener::default_program())
    }

    /// Whether to use nerd font icons.
    pub fn use_icons(&self) -> bool {
        self.view.use_icons.unwrap_or(true)
    }

    /// Maximum recursive-view lines drawn.
    pub fn recursive_display_limit(&self) -> usize {
        self.view
            .recursive_display_limit
            .unwrap_or(DEFAULT_RECURSIVE_DISPLAY_LIMIT)
    }

    /// Log level name.
    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log file path: configured, else `<data dir>/fexplore/fexplore.log`.
    pub fn log_file(&self) -> Option<PathBuf> {
        match self.logging.file.as_deref() {
            Some(path) => Some(expand_home(path)),
            None => dirs::data_local_dir().map(|d| d.join("fexplore").join("fexplore.log")),
        }
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
