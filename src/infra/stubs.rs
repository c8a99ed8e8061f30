use std::cell::RefCell;

use anyhow::Result;

use crate::{
    domain::webhook::OutboundRequest,
    infra::{config::AppConfig, contracts::ConfigAdapter},
    usecases::send_message::WebhookDispatcher,
};

#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter {
    pub config: AppConfig,
}

impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        Ok(self.config.clone())
    }
}

/// Keeps every dispatched request instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    requests: RefCell<Vec<OutboundRequest>>,
}

impl RecordingDispatcher {
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.borrow().clone()
    }
}

impl WebhookDispatcher for RecordingDispatcher {
    fn dispatch(&self, request: OutboundRequest) {
        self.requests.borrow_mut().push(request);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::webhook::{RequestId, WebhookPayload};

    #[test]
    fn stub_config_returns_what_it_holds() {
        let adapter = StubConfigAdapter::default();
        let config = adapter.load().expect("stub config must load");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn recording_dispatcher_keeps_order() {
        let dispatcher = RecordingDispatcher::default();
        for id in [1, 2] {
            dispatcher.dispatch(OutboundRequest {
                id: RequestId::new(id),
                endpoint: "http://localhost:8000/webhook".to_owned(),
                payload: WebhookPayload::new("x", "terminal_user", Utc::now()),
            });
        }

        let ids: Vec<_> = dispatcher.requests().iter().map(|r| r.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
