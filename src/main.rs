//! taskboard - A terminal kanban board with a pomodoro timer.
//!
//! This is the main binary that launches the TUI application.

use std::path::Path;

use anyhow::Context;
use taskboard_config::Config;
use taskboard_store::{FileStorage, PreferenceStore, TaskRepository};
use taskboard_tui::{App, terminal};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
const LOG_ENV: &str = "TASKBOARD_LOG";

/// Log file name inside the data directory.
const LOG_FILE: &str = "taskboard.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().await.context("failed to load configuration")?;
    let data_dir = config
        .resolve_data_dir()
        .context("failed to resolve the data directory")?;

    // Creating the storage creates the directory the log file goes in.
    let task_storage = FileStorage::new(&data_dir)?;
    let pref_storage = FileStorage::new(&data_dir)?;

    // Keep the guard alive until exit so buffered log lines are flushed.
    let _log_guard = init_logging(&config.log_level, &data_dir);

    let repo = TaskRepository::load(Box::new(task_storage));
    let prefs = PreferenceStore::load(Box::new(pref_storage));
    tracing::info!(
        data_dir = %data_dir.display(),
        tasks = repo.len(),
        "taskboard starting"
    );

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();

    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(repo, prefs, &config.pomodoro);
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    tracing::info!("taskboard exiting");
    result
}

/// Initializes file-based logging in `dir`.
///
/// Logs never go to stdout, since ratatui owns the terminal. The filter
/// comes from `TASKBOARD_LOG` when set, otherwise from `level`.
fn init_logging(level: &str, dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    guard
}
