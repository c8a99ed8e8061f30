use std::{
    path::Path,
    sync::mpsc,
    time::{Duration, Instant},
};

use crate::{
    domain::{
        chat_message::Transcript,
        conversation_state::ConversationState,
        rain::{RainField, RainSettings},
        shell_state::ShellState,
    },
    infra::{
        self,
        config::{AppConfig, FileConfigAdapter, RainConfig},
        contracts::ConfigAdapter,
        error::AppError,
        webhook::{select_endpoint, HttpWebhookDispatcher, WebhookHttp},
    },
    ui::CrosstermEventSource,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        conversation::{ChatSettings, ConversationController},
        shell::DefaultShellOrchestrator,
    },
};

pub struct ShellComposition {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

pub fn bootstrap(
    config_path: Option<&Path>,
    webhook_url: Option<&str>,
) -> Result<AppContext, AppError> {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();

    let adapter = FileConfigAdapter::new(config_path).with_webhook_url(webhook_url);
    let mut context = build_context(&adapter)?;
    context.log_guard = Some(infra::logging::init(&context.config.logging)?);

    tracing::info!(endpoint = %context.endpoint, "webhook endpoint selected");
    Ok(context)
}

fn build_context(adapter: &dyn ConfigAdapter) -> Result<AppContext, AppError> {
    let config = adapter.load()?;
    let endpoint = select_endpoint(&config.webhook);

    Ok(AppContext::new(config, endpoint))
}

pub fn compose_shell(context: &AppContext) -> Result<ShellComposition, AppError> {
    let (events_tx, events_rx) = mpsc::channel();
    let http = WebhookHttp::new(&context.config.webhook)?;
    let dispatcher = HttpWebhookDispatcher::new(http, events_tx);

    let (width, height) = crossterm::terminal::size().map_err(AppError::TerminalSize)?;
    let rain = RainField::new(
        width,
        height,
        rain_settings(&context.config.rain),
        &mut rand::thread_rng(),
    );

    let mut conversation = ConversationState::new(
        context.endpoint.clone(),
        Transcript::with_capacity(context.config.chat.max_messages),
    );
    let mut controller = ConversationController::new(dispatcher, chat_settings(&context.config));
    let now = Instant::now();
    controller.announce(&mut conversation, "MATRIX TERMINAL ONLINE", now);
    controller.announce(
        &mut conversation,
        format!("Webhook endpoint: {}", context.endpoint),
        now,
    );
    controller.announce(&mut conversation, "Press Ctrl+/ for help", now);

    let orchestrator =
        DefaultShellOrchestrator::new(ShellState::new(rain, conversation), controller);
    let event_source = CrosstermEventSource::new(
        events_rx,
        Duration::from_millis(context.config.rain.frame_interval_ms),
    );

    Ok(ShellComposition {
        event_source: Box::new(event_source),
        orchestrator: Box::new(orchestrator),
    })
}

pub fn rain_settings(config: &RainConfig) -> RainSettings {
    RainSettings {
        cell_width: config.cell_width.max(1),
        fade: config.fade,
        reset_chance: config.reset_chance,
    }
}

pub fn chat_settings(config: &AppConfig) -> ChatSettings {
    ChatSettings {
        bot_name: config.chat.bot_name.clone(),
        user: config.webhook.user.clone(),
        fallback_delay: Duration::from_millis(config.chat.fallback_delay_ms),
        glitch_chance: config.chat.glitch_chance,
        glitch_length: Duration::from_millis(config.chat.glitch_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{config::WebhookConfig, stubs::StubConfigAdapter, webhook::LOCAL_WEBHOOK_URL};

    #[test]
    fn builds_context_with_local_endpoint_by_default() {
        let context = build_context(&StubConfigAdapter::default())
            .expect("context should build from defaults");

        assert_eq!(context.config, AppConfig::default());
        assert_eq!(context.endpoint, LOCAL_WEBHOOK_URL);
        assert!(context.log_guard.is_none());
    }

    #[test]
    fn builds_context_with_configured_url() {
        let adapter = StubConfigAdapter {
            config: AppConfig {
                webhook: WebhookConfig {
                    url: Some("https://n8n.example/webhook/1".to_owned()),
                    ..WebhookConfig::default()
                },
                ..AppConfig::default()
            },
        };

        let context = build_context(&adapter).expect("context builds");

        assert_eq!(context.endpoint, "https://n8n.example/webhook/1");
    }

    #[test]
    fn chat_settings_follow_config() {
        let mut config = AppConfig::default();
        config.chat.fallback_delay_ms = 250;
        config.webhook.user = "kiosk".to_owned();

        let settings = chat_settings(&config);

        assert_eq!(settings.fallback_delay, Duration::from_millis(250));
        assert_eq!(settings.user, "kiosk");
        assert_eq!(settings.bot_name, "N8N Bot");
    }

    #[test]
    fn rain_settings_never_use_zero_cell_width() {
        let config = RainConfig {
            cell_width: 0,
            ..RainConfig::default()
        };

        assert_eq!(rain_settings(&config).cell_width, 1);
    }
}
