use std::fmt;
use std::path::PathBuf;

/// Files above this size get a cleanup warning.
pub const SIZE_WARNING_MB: f64 = 1.0;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Result of trimming a single project's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLine {
    pub path: String,
    pub removed: usize,
    pub original_count: usize,
    pub max_entries: usize,
}

impl ProjectLine {
    pub fn trimmed(&self) -> bool {
        self.removed > 0
    }
}

impl fmt::Display for ProjectLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.trimmed() {
            write!(
                f,
                "Project {}: removed {} entries ({} → {})",
                self.path, self.removed, self.original_count, self.max_entries
            )
        } else {
            write!(
                f,
                "Project {}: {} entries (no cleanup needed)",
                self.path, self.original_count
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrimReport {
    pub backup_path: Option<PathBuf>,
    pub projects: Vec<ProjectLine>,
    pub total_removed: usize,
    pub written: bool,
    /// Size in bytes of the rewritten file.
    pub written_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrimOutcome {
    NotFound(PathBuf),
    Trimmed(TrimReport),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeReport {
    pub bytes: u64,
    pub megabytes: f64,
    pub exceeds_limit: bool,
}

impl SizeReport {
    pub fn from_bytes(bytes: u64) -> Self {
        let megabytes = bytes as f64 / BYTES_PER_MB;
        Self {
            bytes,
            megabytes,
            exceeds_limit: megabytes > SIZE_WARNING_MB,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SizeOutcome {
    NotFound(PathBuf),
    Size(SizeReport),
}
