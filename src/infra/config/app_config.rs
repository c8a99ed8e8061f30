use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub webhook: WebhookConfig,
    pub rain: RainConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log file; the cache directory is used when unset.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Explicit endpoint. Takes precedence over host-based selection.
    pub url: Option<String>,
    /// Host the terminal is deployed for; `localhost` selects the dev server.
    pub host: String,
    pub user: String,
    /// No timeout when unset.
    pub timeout_ms: Option<u64>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_owned(),
            user: "terminal_user".to_owned(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RainConfig {
    pub cell_width: u16,
    pub frame_interval_ms: u64,
    pub fade: f32,
    pub reset_chance: f64,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            cell_width: 2,
            frame_interval_ms: 33,
            fade: 0.04,
            reset_chance: 0.025,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    pub bot_name: String,
    pub fallback_delay_ms: u64,
    pub glitch_chance: f64,
    pub glitch_ms: u64,
    pub max_messages: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: "N8N Bot".to_owned(),
            fallback_delay_ms: 1_000,
            glitch_chance: 0.2,
            glitch_ms: 300,
            max_messages: 500,
        }
    }
}
