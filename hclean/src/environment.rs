use hclean_types::{TrimError, TrimResult};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".claude.json";
pub const CONFIG_ENV: &str = "HCLEAN_CONFIG";
pub const DEFAULT_MAX_ENTRIES: usize = 10;

pub fn default_config_path() -> TrimResult<PathBuf> {
    let home = dirs::home_dir().ok_or(TrimError::HomeDir)?;
    Ok(home.join(CONFIG_FILE_NAME))
}

/// An explicit path wins over the default; a leading `~` is expanded.
pub fn resolve_config_path(explicit: Option<&Path>) -> TrimResult<PathBuf> {
    match explicit {
        Some(path) => {
            let raw = path.to_string_lossy();
            Ok(PathBuf::from(shellexpand::tilde(&raw).into_owned()))
        }
        None => default_config_path(),
    }
}
