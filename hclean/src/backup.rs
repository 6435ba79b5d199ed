use chrono::NaiveDateTime;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// `<dir>/<name>.backup-YYYYMMDD-HHMMSS`, next to the original file.
pub fn backup_path_for(path: &Path, at: &NaiveDateTime) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("config"));
    name.push(".backup-");
    name.push(at.format(BACKUP_TIMESTAMP_FORMAT).to_string());
    path.with_file_name(name)
}

/// Copy `path` to `backup` byte for byte. An existing backup with the same
/// name is overwritten.
pub fn create_backup(path: &Path, backup: &Path) -> io::Result<u64> {
    fs::copy(path, backup)
}
