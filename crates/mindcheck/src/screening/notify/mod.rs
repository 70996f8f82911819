mod line;
pub mod webhook;

pub use line::LineMessagingClient;

use std::sync::Arc;

use serde::Serialize;

use crate::config::NotifyConfig;
use crate::screening::assessment::RiskAssessment;
use crate::screening::domain::SubjectInfo;

/// One alert destination: an opaque identity understood by the push gateway
/// plus a human-readable label for outcome reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub destination: String,
    pub label: String,
}

/// Per-channel delivery result. `disabled` marks the idempotent no-op taken
/// when dispatch is switched off globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationOutcome {
    pub channel: String,
    pub success: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotificationOutcome {
    fn delivered(channel: &Channel) -> Self {
        Self {
            channel: channel.label.clone(),
            success: true,
            disabled: false,
            error: None,
        }
    }

    fn skipped_disabled(channel: &Channel) -> Self {
        Self {
            channel: channel.label.clone(),
            success: true,
            disabled: true,
            error: None,
        }
    }

    fn failed(channel: &Channel, error: String) -> Self {
        Self {
            channel: channel.label.clone(),
            success: false,
            disabled: false,
            error: Some(error),
        }
    }
}

/// Aggregate over all configured channels, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub all_succeeded: bool,
    pub outcomes: Vec<NotificationOutcome>,
}

/// Error from a single push attempt. Stays inside the dispatcher boundary;
/// callers only ever see it flattened into a `NotificationOutcome`.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),
    #[error("push rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("push transport failed: {0}")]
    Transport(String),
}

/// Seam to the external messaging API: push text to a destination on behalf
/// of a delivery credential.
pub trait PushGateway: Send + Sync {
    fn push(&self, credential: &str, destination: &str, text: &str) -> Result<(), PushError>;
}

/// Dispatches one alert text to every configured channel, collecting
/// per-channel outcomes independently. A failing channel never aborts its
/// siblings, and the returned outcomes keep the input channel order.
pub struct AlertDispatcher<G> {
    config: NotifyConfig,
    gateway: Arc<G>,
}

impl<G> AlertDispatcher<G>
where
    G: PushGateway,
{
    pub fn new(config: NotifyConfig, gateway: Arc<G>) -> Self {
        Self { config, gateway }
    }

    pub fn dispatch(&self, text: &str, channels: &[Channel]) -> DispatchSummary {
        let outcomes: Vec<NotificationOutcome> = channels
            .iter()
            .map(|channel| self.attempt(channel, text))
            .collect();

        DispatchSummary {
            all_succeeded: outcomes.iter().all(|outcome| outcome.success),
            outcomes,
        }
    }

    fn attempt(&self, channel: &Channel, text: &str) -> NotificationOutcome {
        if !self.config.enabled {
            tracing::debug!(channel = %channel.label, "alert dispatch disabled by configuration");
            return NotificationOutcome::skipped_disabled(channel);
        }

        let credential = match self
            .config
            .access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
        {
            Some(token) => token,
            None => {
                let error =
                    PushError::ConfigurationMissing("delivery credential is not set".to_string());
                return NotificationOutcome::failed(channel, error.to_string());
            }
        };

        if channel.destination.trim().is_empty() {
            let error = PushError::ConfigurationMissing(format!(
                "no destination for channel '{}'",
                channel.label
            ));
            return NotificationOutcome::failed(channel, error.to_string());
        }

        match self.gateway.push(credential, &channel.destination, text) {
            Ok(()) => NotificationOutcome::delivered(channel),
            Err(err) => {
                tracing::warn!(channel = %channel.label, error = %err, "alert push failed");
                NotificationOutcome::failed(channel, err.to_string())
            }
        }
    }
}

/// Render the alert text pushed when a screening crosses the notify
/// threshold.
pub fn alert_text(assessment: &RiskAssessment, subject: &SubjectInfo) -> String {
    format!(
        "Suicide-risk alert: level {}\nName: {}\n8Q score: {}",
        assessment.level.label().to_uppercase(),
        subject.display_name(),
        assessment.eight_q_total,
    )
}
