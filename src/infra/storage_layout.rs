use std::{env, path::PathBuf};

const APP_DIR_NAME: &str = "matrix-terminal";
pub const LOG_FILE_NAME: &str = "matrix-terminal.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub cache_dir: PathBuf,
}

impl StorageLayout {
    /// Falls back to the temp dir when the platform has no cache directory.
    pub fn resolve() -> Self {
        let cache_base = dirs::cache_dir().unwrap_or_else(env::temp_dir);

        Self {
            cache_dir: cache_base.join(APP_DIR_NAME),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.cache_dir.join(LOG_FILE_NAME)
    }
}
