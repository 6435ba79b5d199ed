use crate::backup;
use crate::document::ConfigDocument;
use crate::persist;
use chrono::Local;
use hclean_types::{ProjectLine, TrimError, TrimOutcome, TrimReport, TrimResult};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// What `trim_document` did to an in-memory document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrimSummary {
    pub projects: Vec<ProjectLine>,
    pub total_removed: usize,
}

/// Cap every project's history at `max_entries`, keeping the newest entries.
pub fn trim_document(document: &mut ConfigDocument, max_entries: usize) -> TrimSummary {
    let mut summary = TrimSummary::default();

    for (path, mut entry) in document.projects_mut() {
        let original_count = entry.history_len();
        let removed = entry.retain_latest(max_entries);
        if removed > 0 {
            debug!("{path}: trimmed history {original_count} -> {max_entries}");
        }
        summary.total_removed += removed;
        summary.projects.push(ProjectLine {
            path: path.to_string(),
            removed,
            original_count,
            max_entries,
        });
    }

    summary
}

/// Load the config at `config_path`, trim it and write it back if anything
/// was removed.
///
/// With `make_backup` the file is copied verbatim before it is parsed, so the
/// backup exists even when parsing or saving fails afterwards.
pub fn trim(config_path: &Path, max_entries: usize, make_backup: bool) -> TrimResult<TrimOutcome> {
    if !config_path.exists() {
        debug!("config not found: {}", config_path.display());
        return Ok(TrimOutcome::NotFound(config_path.to_path_buf()));
    }

    let backup_path = if make_backup {
        let backup = backup::backup_path_for(config_path, &Local::now().naive_local());
        backup::create_backup(config_path, &backup).map_err(|source| TrimError::Backup {
            path: config_path.to_path_buf(),
            backup: backup.clone(),
            source,
        })?;
        info!("created backup {}", backup.display());
        Some(backup)
    } else {
        None
    };

    let mut document = match ConfigDocument::load(config_path) {
        Ok(document) => document,
        Err(source) => {
            return Err(TrimError::Read {
                path: config_path.to_path_buf(),
                backup: backup_path,
                source,
            });
        }
    };

    let summary = trim_document(&mut document, max_entries);
    let mut report = TrimReport {
        backup_path,
        projects: summary.projects,
        total_removed: summary.total_removed,
        written: false,
        written_size: None,
    };

    if report.total_removed > 0 {
        let size = save(&document, config_path).map_err(|source| TrimError::Write {
            path: config_path.to_path_buf(),
            backup: report.backup_path.clone(),
            source,
        })?;
        info!(
            "removed {} history entries, {} is now {size} bytes",
            report.total_removed,
            config_path.display()
        );
        report.written = true;
        report.written_size = Some(size);
    } else {
        debug!("nothing to trim, leaving {} untouched", config_path.display());
    }

    Ok(TrimOutcome::Trimmed(report))
}

fn save(document: &ConfigDocument, path: &Path) -> io::Result<u64> {
    let contents = document.to_pretty_string()?;
    persist::write_atomic(path, contents.as_bytes())?;
    Ok(fs::metadata(path)?.len())
}
