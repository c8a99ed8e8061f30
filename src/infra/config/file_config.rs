use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, ChatConfig, LogConfig, RainConfig, WebhookConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub webhook: Option<FileWebhookConfig>,
    pub rain: Option<FileRainConfig>,
    pub chat: Option<FileChatConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(webhook) = self.webhook {
            webhook.merge_into(&mut config.webhook);
        }

        if let Some(rain) = self.rain {
            rain.merge_into(&mut config.rain);
        }

        if let Some(chat) = self.chat {
            chat.merge_into(&mut config.chat);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileWebhookConfig {
    pub url: Option<String>,
    pub host: Option<String>,
    pub user: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl FileWebhookConfig {
    fn merge_into(self, config: &mut WebhookConfig) {
        if let Some(url) = self.url {
            config.url = Some(url);
        }

        if let Some(host) = self.host {
            config.host = host;
        }

        if let Some(user) = self.user {
            config.user = user;
        }

        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = Some(timeout_ms);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileRainConfig {
    pub cell_width: Option<u16>,
    pub frame_interval_ms: Option<u64>,
    pub fade: Option<f32>,
    pub reset_chance: Option<f64>,
}

impl FileRainConfig {
    fn merge_into(self, config: &mut RainConfig) {
        if let Some(cell_width) = self.cell_width {
            config.cell_width = cell_width.max(1);
        }

        if let Some(frame_interval_ms) = self.frame_interval_ms {
            config.frame_interval_ms = frame_interval_ms.max(1);
        }

        if let Some(fade) = self.fade {
            config.fade = fade.clamp(0.0, 1.0);
        }

        if let Some(reset_chance) = self.reset_chance {
            config.reset_chance = reset_chance.clamp(0.0, 1.0);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub bot_name: Option<String>,
    pub fallback_delay_ms: Option<u64>,
    pub glitch_chance: Option<f64>,
    pub glitch_ms: Option<u64>,
    pub max_messages: Option<usize>,
}

impl FileChatConfig {
    fn merge_into(self, config: &mut ChatConfig) {
        if let Some(bot_name) = self.bot_name {
            config.bot_name = bot_name;
        }

        if let Some(fallback_delay_ms) = self.fallback_delay_ms {
            config.fallback_delay_ms = fallback_delay_ms;
        }

        if let Some(glitch_chance) = self.glitch_chance {
            config.glitch_chance = glitch_chance.clamp(0.0, 1.0);
        }

        if let Some(glitch_ms) = self.glitch_ms {
            config.glitch_ms = glitch_ms;
        }

        if let Some(max_messages) = self.max_messages {
            config.max_messages = max_messages.max(1);
        }
    }
}
