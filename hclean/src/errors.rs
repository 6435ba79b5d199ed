use hclean_types::TrimError;
use std::process::ExitCode;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_READ_ERROR: u8 = 3;
pub const EXIT_WRITE_ERROR: u8 = 4;
pub const EXIT_BACKUP_ERROR: u8 = 5;

/// Exit status for a failed run. 2 is left to clap for usage errors.
pub fn exit_code(err: &TrimError) -> u8 {
    match err {
        TrimError::HomeDir => EXIT_FAILURE,
        TrimError::Read { .. } => EXIT_READ_ERROR,
        TrimError::Write { .. } => EXIT_WRITE_ERROR,
        TrimError::Backup { .. } => EXIT_BACKUP_ERROR,
    }
}

/// Print the error without a backtrace, and tell the user where the backup
/// of the untouched file lives.
pub fn display_user_error(err: &TrimError) -> ExitCode {
    eprintln!("hclean: {err}");
    match err {
        TrimError::Write { .. } => {
            eprintln!("hclean: the cleaned config was not saved");
        }
        TrimError::Read { .. } => {
            eprintln!("hclean: config left unchanged");
        }
        _ => {}
    }
    if let Some(backup) = err.backup_path() {
        eprintln!("hclean: backup kept at {}", backup.display());
    }
    ExitCode::from(exit_code(err))
}
