//! LINE webhook payload handling.
//!
//! The webhook exists to surface channel/group identifiers during setup and
//! to acknowledge delivery callbacks. Signature verification is a pluggable
//! yes/no decision behind [`WebhookVerifier`]; the receiver always replies
//! 200 because LINE retries otherwise.

use serde::Deserialize;

/// Decides whether an incoming webhook call is authentic.
pub trait WebhookVerifier: Send + Sync {
    fn verify(&self, signature: Option<&str>, body: &[u8]) -> bool;
}

/// Accept-everything verifier for setup and local development.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnverifiedWebhooks;

impl WebhookVerifier for UnverifiedWebhooks {
    fn verify(&self, _signature: Option<&str>, _body: &[u8]) -> bool {
        true
    }
}

/// Envelope LINE posts to the webhook endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub source: Option<EventSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Log every source identifier found in the payload. This is how operators
/// discover the group id to configure as an alert destination.
pub fn log_event_sources(payload: &WebhookPayload) {
    for event in &payload.events {
        let Some(source) = &event.source else {
            continue;
        };
        if let Some(group_id) = &source.group_id {
            tracing::info!(%group_id, "webhook event from group");
        } else if let Some(room_id) = &source.room_id {
            tracing::info!(%room_id, "webhook event from room");
        } else if let Some(user_id) = &source.user_id {
            tracing::info!(%user_id, "webhook event from user");
        }
    }
}
