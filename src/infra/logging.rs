use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{
    config::LogConfig,
    error::AppError,
    storage_layout::{StorageLayout, LOG_FILE_NAME},
};

/// Installs the global subscriber. Output goes to a file because the TUI
/// owns the terminal. Keep the guard alive until exit so buffered lines are
/// flushed.
pub fn init(config: &LogConfig) -> Result<WorkerGuard, AppError> {
    let path = log_path(config);
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir).map_err(|source| AppError::LogDirCreate {
        path: dir.clone(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| LOG_FILE_NAME.into());
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    Ok(guard)
}

fn log_path(config: &LogConfig) -> PathBuf {
    config
        .file
        .clone()
        .unwrap_or_else(|| StorageLayout::resolve().log_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_file_wins_over_cache_dir() {
        let config = LogConfig {
            level: "debug".to_owned(),
            file: Some(PathBuf::from("/tmp/custom.log")),
        };

        assert_eq!(log_path(&config), PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn default_file_lives_in_cache_dir() {
        assert_eq!(
            log_path(&LogConfig::default()),
            StorageLayout::resolve().log_file()
        );
    }
}
