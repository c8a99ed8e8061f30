use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::infra::{
    config::{load, AppConfig},
    contracts::ConfigAdapter,
};

/// Loads config from TOML and the environment, then applies command-line
/// overrides on top.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
    webhook_url: Option<String>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            webhook_url: None,
        }
    }

    pub fn with_webhook_url(mut self, url: Option<&str>) -> Self {
        self.webhook_url = url.map(str::to_owned);
        self
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        let mut config = load(self.path.as_deref())?;
        if let Some(url) = &self.webhook_url {
            config.webhook.url = Some(url.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::env_lock;

    #[test]
    fn command_line_url_wins_over_everything() {
        let _guard = env_lock();
        let adapter = FileConfigAdapter::new(Some(Path::new("./missing-config.toml")))
            .with_webhook_url(Some("http://127.0.0.1:9999/hook"));

        let config = adapter.load().expect("config loads");

        assert_eq!(config.webhook.url.as_deref(), Some("http://127.0.0.1:9999/hook"));
    }
}
