use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use vtu_term::application::cli;
use vtu_term::application::ui;
use vtu_term::{Config, ConfigKey, HttpBackend};

fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

// Logs go to a file: stdout belongs to the TUI.
fn setup_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_file = PathBuf::from(Config::get(ConfigKey::LogFile));
    let directory = log_file.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)?;
    let file_name = log_file
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("vtu-term.log"));

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();

    return Ok(guard);
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    let matches = cli::build().get_matches();
    Config::load(&matches).await?;

    let _guard = setup_logging()?;

    let backend = HttpBackend::new()?;
    return ui::start_loop(Box::new(backend)).await;
}
