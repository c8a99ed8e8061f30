//! HTTP side of the webhook exchange.

use std::{sync::mpsc::Sender, time::Duration};

use reqwest::{header::CONTENT_TYPE, Client};
use tokio::runtime::Runtime;

use crate::{
    domain::{
        events::AppEvent,
        reply::ReplyPayload,
        webhook::{is_configured, OutboundRequest, WebhookError, WebhookOutcome, WebhookPayload},
    },
    infra::{config::WebhookConfig, error::AppError},
    usecases::send_message::WebhookDispatcher,
};

pub const LOCAL_WEBHOOK_URL: &str = "http://localhost:8000/webhook";
pub const PRODUCTION_WEBHOOK_PATH: &str = "/api/webhook";

const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Picks the endpoint for this session: an explicit URL wins, local hosts
/// get the dev server, anything else gets the deployed API path.
pub fn select_endpoint(config: &WebhookConfig) -> String {
    if let Some(url) = config.url.as_deref().filter(|url| !url.trim().is_empty()) {
        return url.trim().to_owned();
    }

    let host = config.host.trim().trim_end_matches('/');
    if LOCAL_HOSTS.contains(&host) {
        return LOCAL_WEBHOOK_URL.to_owned();
    }

    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{host}{PRODUCTION_WEBHOOK_PATH}")
    } else {
        format!("https://{host}{PRODUCTION_WEBHOOK_PATH}")
    }
}

/// Posts one payload and classifies the response.
pub async fn post_webhook(
    client: &Client,
    endpoint: &str,
    payload: &WebhookPayload,
) -> WebhookOutcome {
    if !is_configured(endpoint) {
        return Err(WebhookError::NotConfigured);
    }

    let response = client
        .post(endpoint)
        .header(CONTENT_TYPE, "application/json")
        .json(payload)
        .send()
        .await
        .map_err(|error| WebhookError::Transport(error.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(WebhookError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|error| WebhookError::Transport(error.to_string()))?;

    ReplyPayload::from_body(&body)
}

/// HTTP client plus the runtime its futures run on.
pub struct WebhookHttp {
    runtime: Runtime,
    client: Client,
}

impl WebhookHttp {
    pub fn new(config: &WebhookConfig) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("matrix-webhook")
            .enable_all()
            .build()
            .map_err(AppError::Runtime)?;

        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build().map_err(AppError::HttpClient)?;

        Ok(Self { runtime, client })
    }

    /// Blocks the calling thread until the round trip finishes.
    pub fn post_blocking(&self, endpoint: &str, payload: &WebhookPayload) -> WebhookOutcome {
        self.runtime
            .block_on(post_webhook(&self.client, endpoint, payload))
    }
}

impl std::fmt::Debug for WebhookHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookHttp").finish_non_exhaustive()
    }
}

/// Runs each request as its own task and reports back over `events`.
#[derive(Debug)]
pub struct HttpWebhookDispatcher {
    http: WebhookHttp,
    events: Sender<AppEvent>,
}

impl HttpWebhookDispatcher {
    pub fn new(http: WebhookHttp, events: Sender<AppEvent>) -> Self {
        Self { http, events }
    }
}

impl WebhookDispatcher for HttpWebhookDispatcher {
    fn dispatch(&self, request: OutboundRequest) {
        let client = self.http.client.clone();
        let events = self.events.clone();

        self.http.runtime.spawn(async move {
            let outcome = post_webhook(&client, &request.endpoint, &request.payload).await;
            match &outcome {
                Ok(_) => tracing::debug!(request_id = request.id.value(), "webhook replied"),
                Err(error) => tracing::warn!(
                    request_id = request.id.value(),
                    code = error.code(),
                    error = %error,
                    "webhook request failed"
                ),
            }

            if events
                .send(AppEvent::WebhookCompleted {
                    request_id: request.id,
                    outcome,
                })
                .is_err()
            {
                tracing::debug!(
                    request_id = request.id.value(),
                    "shell closed before webhook completed"
                );
            }
        });
    }
}
