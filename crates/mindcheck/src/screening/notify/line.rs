use std::time::Duration;

use serde_json::json;
use ureq::Agent;

use super::{PushError, PushGateway};

const LINE_PUSH_URL: &str = "https://api.line.me/v2/bot/message/push";
const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Production push gateway for the LINE Messaging API.
///
/// Blocking on purpose: once a warranted alert starts sending it runs to
/// completion regardless of what happens to the originating request.
pub struct LineMessagingClient {
    agent: Agent,
    endpoint: String,
}

impl LineMessagingClient {
    pub fn new() -> Self {
        Self::with_endpoint(LINE_PUSH_URL)
    }

    /// Point the client at a different endpoint (test doubles, mock servers).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(PUSH_TIMEOUT))
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }
}

impl Default for LineMessagingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PushGateway for LineMessagingClient {
    fn push(&self, credential: &str, destination: &str, text: &str) -> Result<(), PushError> {
        let payload = json!({
            "to": destination,
            "messages": [{ "type": "text", "text": text }],
        });

        let mut response = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", &format!("Bearer {credential}"))
            .send_json(&payload)
            .map_err(|err| PushError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .body_mut()
                .read_to_string()
                .unwrap_or_default();
            return Err(PushError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
