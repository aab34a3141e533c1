use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::DetectionError;

const LOG_FILE: &str = "keyboard-presence.log";

fn default_directive(level: &str) -> String {
    format!("keyboard_presence={},warn", level)
}

/// `RUST_LOG` when set, otherwise the configured level. Shared by every layer.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

/// Initialize console logging and, optionally, daily-rotated JSON file logging.
///
/// Returns a guard that must be kept alive for the duration of the application.
/// When the guard is dropped, any remaining logs are flushed.
pub fn init_logging(
    logs_dir: &Path,
    level: &str,
    file_logging: bool,
) -> Result<Option<WorkerGuard>, DetectionError> {
    if file_logging {
        fs::create_dir_all(logs_dir)?;
    }

    // Logs go to stderr so stdout stays clean for reports
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(env_filter(level));

    if file_logging {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, LOG_FILE);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter(level));

        if tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .is_ok()
        {
            tracing::info!(
                logs_dir = ?logs_dir,
                level = level,
                "Logging initialized with file output"
            );
        }

        Ok(Some(guard))
    } else {
        let _ = tracing_subscriber::registry()
            .with(console_layer)
            .try_init();

        tracing::info!(level = level, "Logging initialized (console only)");

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("debug"), "keyboard_presence=debug,warn");
    }

    #[test]
    fn test_filter_follows_configured_level() {
        if env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(
            env_filter("trace").to_string(),
            EnvFilter::new(default_directive("trace")).to_string()
        );
    }

    #[test]
    fn test_file_logging_creates_logs_dir() {
        let temp_dir = env::temp_dir().join("keyboard_presence_log_test");
        let _ = fs::remove_dir_all(&temp_dir);

        let guard = init_logging(&temp_dir, "info", true).unwrap();
        assert!(guard.is_some());
        assert!(temp_dir.exists());

        drop(guard);
        let _ = fs::remove_dir_all(&temp_dir);
    }
}
