//! Handing regular files to the desktop launcher.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{AppError, Result};

/// Hands a file to whatever the desktop uses to open it.
pub trait FileOpener {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Platform launcher program used when none is configured.
pub fn default_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Opens files by running an external launcher such as `xdg-open`.
///
/// Waits for the launcher itself to exit, not for the application it starts.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
}

impl SystemOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new(default_program())
    }
}

impl FileOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| AppError::Open {
                path: path.to_path_buf(),
                reason: format!("{}: {}", self.program, e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(AppError::Open {
                path: path.to_path_buf(),
                reason: format!("{} exited with {}", self.program, status),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_launcher() {
        let opener = SystemOpener::new("true");
        assert!(opener.open(Path::new("/tmp/anything")).is_ok());
    }

    #[test]
    fn failing_launcher_reports_status() {
        let opener = SystemOpener::new("false");
        let err = opener.open(Path::new("/tmp/a.png")).unwrap_err();
        assert!(matches!(err, AppError::Open { .. }));
        assert!(err.to_string().contains("false exited with"));
    }

    #[test]
    fn missing_launcher_is_an_open_error() {
        let opener = SystemOpener::new("/definitely/not/a/launcher");
        let err = opener.open(Path::new("/tmp/a.png")).unwrap_err();
        assert!(matches!(err, AppError::Open { .. }));
    }

    #[test]
    fn default_program_is_platform_launcher() {
        let opener = SystemOpener::default();
        assert_eq!(opener.program(), default_program());
    }
}
