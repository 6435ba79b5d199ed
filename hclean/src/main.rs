use anyhow::Result;
use clap::Parser;
use hclean::environment::{self, DEFAULT_MAX_ENTRIES};
use hclean::errors::display_user_error;
use hclean::{check_size, trim};
use hclean_types::{SizeOutcome, SizeReport, TrimOutcome, TrimResult};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Trim per-project chat history in the assistant config file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Maximum history entries to keep per project
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ENTRIES)]
    max_entries: usize,

    /// Skip creating a backup file
    #[arg(long)]
    no_backup: bool,

    /// Only check the file size, don't clean
    #[arg(long)]
    check_only: bool,

    /// Config file to clean (defaults to ~/.claude.json)
    #[arg(long, value_name = "PATH", env = environment::CONFIG_ENV)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    if let Err(err) = init_tracing() {
        eprintln!("Failed to initialize tracing: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => display_user_error(&err),
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("{err}"))?;
    Ok(())
}

fn run(cli: &Cli) -> TrimResult<()> {
    let config_path = environment::resolve_config_path(cli.config.as_deref())?;
    debug!("using config {}", config_path.display());

    if cli.check_only {
        check(&config_path)
    } else {
        clean(&config_path, cli.max_entries, !cli.no_backup)
    }
}

fn check(config_path: &Path) -> TrimResult<()> {
    match check_size(config_path)? {
        SizeOutcome::NotFound(path) => println!("No config file found at {}", path.display()),
        SizeOutcome::Size(report) => {
            println!("Current config file size: {:.2} MB", report.megabytes);
            if report.exceeds_limit {
                println!("⚠️  Config file is large, consider running cleanup");
            }
        }
    }
    Ok(())
}

fn clean(config_path: &Path, max_entries: usize, make_backup: bool) -> TrimResult<()> {
    println!("Cleaning history (keeping {max_entries} entries per project)...");

    let report = match trim(config_path, max_entries, make_backup)? {
        TrimOutcome::NotFound(path) => {
            println!("No config file found at {}", path.display());
            return Ok(());
        }
        TrimOutcome::Trimmed(report) => report,
    };

    if let Some(backup) = &report.backup_path {
        println!("Created backup: {}", backup.display());
    }
    for line in &report.projects {
        println!("{line}");
    }

    match report.written_size {
        Some(bytes) => {
            let size = SizeReport::from_bytes(bytes);
            println!("✅ Cleaned config saved. File size: {:.2} MB", size.megabytes);
            println!("Total history entries removed: {}", report.total_removed);
        }
        None => println!("No cleanup needed"),
    }
    Ok(())
}
