use corridors::app;

/// Environment variable holding the log level (error, warn, info, debug, trace)
const LOG_LEVEL_ENV: &str = "CORRIDORS_LOG";
const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "corridors.log";

/// Log to a file, since the terminal is owned by the UI.
/// The returned guard must stay alive for buffered logs to be written.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|level| level.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    let file_appender = tracing_appender::rolling::never(LOG_DIR, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_names(true)
        .with_max_level(level)
        .init();
    guard
}

fn main() -> std::io::Result<()> {
    let _guard = init_logging();
    tracing::info!("starting corridors");

    let mut stdout = std::io::stdout();
    app::setup_terminal(&mut stdout)?;
    let result = app::run(&mut stdout);
    app::restore_terminal(&mut stdout)?;

    if let Err(e) = &result {
        tracing::error!("app exited with error: {}", e);
    }
    result
}
