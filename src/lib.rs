pub mod archive;
pub mod brief;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod notify;
pub mod pipeline;
pub mod render;
pub mod state;
pub mod store;

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

/// Log file name inside the data directory.
pub const LOG_FILE: &str = "briefgen.log";

/// Install the global subscriber writing to `<log_dir>/briefgen.log`.
///
/// Log level is controlled by `RUST_LOG`; defaults to `info`. The returned
/// guard flushes the non-blocking writer on drop and must be kept alive for
/// the lifetime of the application.
pub fn init_tracing(log_dir: &Path) -> WorkerGuard {
    // tracing_appender::rolling::never panics if the directory is missing.
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init();

    guard
}

/// Briefgen Tauri application entry point.
///
/// Logs go to the data directory:
///   Linux    ~/.local/share/briefgen/briefgen.log
///   macOS    ~/Library/Application Support/briefgen/briefgen.log
///   Windows  %LOCALAPPDATA%\briefgen\briefgen.log
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Invalid config falls back to defaults (archive disabled).
    let (cfg, cfg_error) = match config::load_default() {
        Ok(cfg) => (cfg, None),
        Err(e) => (config::AppConfig::default(), Some(e)),
    };

    let log_dir = cfg
        .data_dir()
        .unwrap_or_else(|| std::env::temp_dir().join(config::APP_DIR));
    let _tracing_guard = init_tracing(&log_dir);

    tracing::info!("Briefgen starting");
    if let Some(e) = cfg_error {
        tracing::error!(error = %e, "configuration rejected; using defaults");
    }

    let state = match state::AppState::from_config(&cfg) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "cannot initialise application state");
            return;
        }
    };

    let result = tauri::Builder::default()
        .manage(state)
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            commands::form::get_brief,
            commands::form::update_field,
            commands::form::append_list_item,
            commands::form::remove_list_item,
            commands::form::reset_brief,
            commands::file::import_brief,
            commands::file::export_brief,
            commands::generate::generate_brief,
            commands::generate::regenerate_saved_brief,
            commands::library::save_brief,
            commands::library::list_saved_briefs,
            commands::library::load_saved_brief,
            commands::library::delete_saved_brief,
            commands::archive::list_archive,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!(error = %e, "tauri application exited with an error");
    }
}
