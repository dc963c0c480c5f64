// Conditional logging macros - only active in debug builds.
// Failures an operator must see go through log::warn!/log::error! directly.

use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const LOG_FILE_NAME: &str = "wordle.log";

/// `<cache dir>/polyglot-wordle/wordle.log`, or the same under the temp dir
/// on platforms without a cache dir. Never stderr: the TUI owns the terminal.
pub fn default_log_path() -> PathBuf {
    log_path_under(dirs::cache_dir())
}

fn log_path_under(cache_dir: Option<PathBuf>) -> PathBuf {
    cache_dir
        .unwrap_or_else(std::env::temp_dir)
        .join("polyglot-wordle")
        .join(LOG_FILE_NAME)
}

/// Opens `path` for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs `env_logger` writing timestamped records to `path`.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logger(path: &Path) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.target(Target::Pipe(Box::new(open_log_file(path)?)));
    // A logger may already be installed (tests, embedding); keep that one.
    let _ = builder.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join(LOG_FILE_NAME);
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "hello").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_default_log_path_file_name() {
        assert!(default_log_path().ends_with("polyglot-wordle/wordle.log"));
    }

    #[test]
    fn test_missing_cache_dir_falls_back_to_temp() {
        let path = log_path_under(None);
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with("polyglot-wordle/wordle.log"));

        let cache = PathBuf::from("/var/cache/me");
        assert_eq!(
            log_path_under(Some(cache)),
            PathBuf::from("/var/cache/me/polyglot-wordle/wordle.log")
        );
    }
}
