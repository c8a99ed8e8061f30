use anyhow::Result;
use chrono::Utc;

use crate::{
    cli::{Cli, Command},
    domain::{self, webhook::WebhookPayload},
    infra::{self, webhook::WebhookHttp},
    ui,
    usecases::{
        self, bootstrap,
        context::AppContext,
        send_message::SendMessageCommand,
    },
};

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref(), cli.webhook_url.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    match cli.command_or_default() {
        Command::Run => {
            let mut shell = bootstrap::compose_shell(&context)?;
            ui::shell::start(
                &context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            )?;
        }
        Command::Send { message } => {
            let reply = send_once(&context, &message)?;
            println!("{reply}");
        }
    }

    Ok(())
}

/// Posts a single message outside the TUI and returns the reply text.
fn send_once(context: &AppContext, message: &str) -> Result<String> {
    let command = SendMessageCommand::new(message);
    let text = command.validated_text()?;

    let http = WebhookHttp::new(&context.config.webhook)?;
    let payload = WebhookPayload::new(text, &context.config.webhook.user, Utc::now());

    match http.post_blocking(&context.endpoint, &payload) {
        Ok(reply) => Ok(reply.reply_text()),
        Err(error) => {
            tracing::warn!(
                code = error.code(),
                error = %error,
                endpoint = %context.endpoint,
                "one-shot webhook request failed"
            );
            Err(anyhow::anyhow!(
                "webhook request to {} failed: {error}",
                context.endpoint
            ))
        }
    }
}
