//! Logging system initialization
//!
//! Writes tracing output to `%APPDATA%\QuickLauncher\app.log`. Every startup
//! shifts the previous sessions to `app.log.1` .. `app.log.9` so each session
//! keeps its own file.

use crate::config::ConfigStore;
use crate::error::{QuickLauncherError, Result, StringError};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Number of previous sessions kept next to the live log
const MAX_LOG_FILES: u8 = 9;

const LOG_FILE_NAME: &str = "app.log";

/// Initialize logging in the application data folder
///
/// Level defaults to INFO; `RUST_LOG` overrides it.
pub fn init_logging() -> Result<PathBuf> {
    init_logging_in(&ConfigStore::app_dir())
}

/// Initialize logging into `log_dir`, returning the live log path
pub fn init_logging_in(log_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join(LOG_FILE_NAME);
    rotate_logs(&log_path, MAX_LOG_FILES)?;

    // Rotation happens per session above, never by time
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("app")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| QuickLauncherError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| QuickLauncherError::ConfigError(Box::new(e)))?;

    tracing::info!("QuickLauncher v{} started", env!("CARGO_PKG_VERSION"));
    Ok(log_path)
}

/// Shift `app.log` to `app.log.1`, `app.log.1` to `app.log.2` and so on,
/// dropping whatever would land past `keep`
///
/// Does nothing when the live log does not exist yet.
fn rotate_logs(log_path: &Path, keep: u8) -> Result<()> {
    if !log_path.exists() || keep == 0 {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| QuickLauncherError::ConfigError(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| QuickLauncherError::ConfigError(StringError::new("Invalid log filename")))?
        .to_string_lossy();
    let numbered = |i: u8| log_dir.join(format!("{log_name}.{i}"));

    let oldest = numbered(keep);
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }

    for i in (1..keep).rev() {
        let current = numbered(i);
        if current.exists() {
            std::fs::rename(&current, numbered(i + 1))?;
        }
    }

    std::fs::rename(log_path, numbered(1))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;
    use std::fs;

    fn write_session(path: &Path, session: u32) {
        fs::write(path, format!("session {session}")).unwrap();
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_rotate_moves_live_log_aside() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join(LOG_FILE_NAME);
        write_session(&log_path, 1);

        rotate_logs(&log_path, MAX_LOG_FILES).unwrap();

        assert!(!log_path.exists());
        assert_eq!(read(temp_dir.path().join("app.log.1")), "session 1");
    }

    #[test]
    fn test_rotate_without_live_log_is_noop() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join(LOG_FILE_NAME);

        rotate_logs(&log_path, MAX_LOG_FILES).unwrap();

        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rotate_keeps_newest_sessions() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join(LOG_FILE_NAME);

        for session in 1..=12 {
            write_session(&log_path, session);
            rotate_logs(&log_path, MAX_LOG_FILES).unwrap();
        }

        assert_eq!(read(temp_dir.path().join("app.log.1")), "session 12");
        assert_eq!(read(temp_dir.path().join("app.log.9")), "session 4");
        assert!(!temp_dir.path().join("app.log.10").exists());
    }

    #[test]
    fn test_rotate_with_gaps_in_history() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join(LOG_FILE_NAME);
        write_session(&log_path, 3);
        write_session(&temp_dir.path().join("app.log.2"), 1);

        rotate_logs(&log_path, 3).unwrap();

        assert_eq!(read(temp_dir.path().join("app.log.1")), "session 3");
        assert!(!temp_dir.path().join("app.log.2").exists());
        assert_eq!(read(temp_dir.path().join("app.log.3")), "session 1");
    }
}
