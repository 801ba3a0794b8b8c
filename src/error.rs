use std::path::PathBuf;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from terminal or filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The path to list is missing or is not a directory.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Metadata for a single child could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    EntryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The default application could not be launched for a file.
    #[error("Cannot open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },
}
