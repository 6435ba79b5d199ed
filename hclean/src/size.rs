use hclean_types::{ReadError, SizeOutcome, SizeReport, TrimError, TrimResult};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Report the on-disk size of the config file. Never touches its contents.
pub fn check_size(config_path: &Path) -> TrimResult<SizeOutcome> {
    match fs::metadata(config_path) {
        Ok(meta) => {
            let report = SizeReport::from_bytes(meta.len());
            debug!(
                "{} is {} bytes ({:.2} MB)",
                config_path.display(),
                report.bytes,
                report.megabytes
            );
            Ok(SizeOutcome::Size(report))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Ok(SizeOutcome::NotFound(config_path.to_path_buf()))
        }
        Err(err) => Err(TrimError::Read {
            path: config_path.to_path_buf(),
            backup: None,
            source: ReadError::Io(err),
        }),
    }
}
