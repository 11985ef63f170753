//! Logging Infrastructure
//!
//! Logs go to stderr, or to a daily rolling file when a log directory is
//! given, so they never interleave with shell output on stdout.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional file output.
///
/// `RUST_LOG` wins over `log_level` when set. The returned guard must be
/// held until exit so buffered file output is flushed.
pub fn init_logger_with_file(log_level: &str, json: bool, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "bowl-console");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let subscriber = subscriber.with_writer(writer).with_ansi(false);
            if json {
                subscriber.json().init();
            } else {
                subscriber.init();
            }
            return Some(guard);
        }
        eprintln!("cannot create log directory {dir}; logging to stderr");
    }

    let subscriber = subscriber.with_writer(std::io::stderr);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
    None
}
