use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod report;
pub use report::{ProjectLine, SizeOutcome, SizeReport, TrimOutcome, TrimReport};

/// Errors raised while cleaning the config file.
///
/// `Read` means nothing was mutated. `Write` means the trim was computed but
/// could not be persisted. Both carry the backup path when one was created so
/// the caller can point the user at it.
#[derive(Error, Debug)]
pub enum TrimError {
    #[error("could not determine home directory")]
    HomeDir,

    #[error("failed to create backup {} of {}: {source}", .backup.display(), .path.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        backup: Option<PathBuf>,
        #[source]
        source: ReadError,
    },

    #[error("error saving cleaned config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        backup: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

impl TrimError {
    /// Backup left on disk by the failed run, if any.
    pub fn backup_path(&self) -> Option<&Path> {
        match self {
            TrimError::Read { backup, .. } | TrimError::Write { backup, .. } => backup.as_deref(),
            TrimError::HomeDir | TrimError::Backup { .. } => None,
        }
    }
}

/// Why a config file could not be loaded.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected shape: {0}")]
    Shape(String),
}

pub type TrimResult<T> = std::result::Result<T, TrimError>;
