use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::assessment::{self, AssessmentError};
use super::domain::ScreeningSubmission;
use super::notify::{alert_text, AlertDispatcher, Channel, DispatchSummary, PushGateway};
use super::reporting::{self, LegacyScreeningRow, SeverityDistribution};
use super::repository::{
    RepositoryError, ScreeningId, ScreeningRecord, ScreeningRepository, StoredScreening,
};
use crate::config::NotifyConfig;

/// Orchestrates one screening submission: classify, persist, and alert.
///
/// Persistence and notification are independent side effects. A storage
/// failure is captured in the report and never blocks the alert; a channel
/// failure is captured per channel and never blocks its siblings. Only an
/// unscorable questionnaire aborts the submission, before any side effect.
pub struct ScreeningService<R, G> {
    repository: Arc<R>,
    dispatcher: AlertDispatcher<G>,
    channels: Vec<Channel>,
    notify: NotifyConfig,
}

impl<R, G> ScreeningService<R, G>
where
    R: ScreeningRepository + 'static,
    G: PushGateway + 'static,
{
    pub fn new(repository: Arc<R>, gateway: Arc<G>, notify: NotifyConfig) -> Self {
        let channels = notify.channels();
        let dispatcher = AlertDispatcher::new(notify.clone(), gateway);
        Self {
            repository,
            dispatcher,
            channels,
            notify,
        }
    }

    /// Run a completed questionnaire through the full pipeline.
    pub fn submit(
        &self,
        submission: ScreeningSubmission,
    ) -> Result<SubmissionReport, AssessmentError> {
        let assessment = assessment::classify(&submission)?;
        let record = ScreeningRecord {
            subject: submission.subject,
            assessment,
        };

        let (id, persisted, persist_error) = match self.repository.insert(record.clone()) {
            Ok(stored) => (Some(stored.id), true, None),
            Err(err) => {
                warn!(error = %err, "failed to persist screening record");
                (None, false, Some(err.to_string()))
            }
        };

        let notification = if assessment::should_notify(record.assessment.level, self.notify.threshold)
        {
            let text = alert_text(&record.assessment, &record.subject);
            let summary = self.dispatcher.dispatch(&text, &self.channels);
            info!(
                level = record.assessment.level.label(),
                all_succeeded = summary.all_succeeded,
                channels = summary.outcomes.len(),
                "risk alert dispatched"
            );
            Some(summary)
        } else {
            None
        };

        Ok(SubmissionReport {
            id,
            notified: notification.is_some(),
            record,
            persisted,
            persist_error,
            notification,
        })
    }

    /// Most recent screenings, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<StoredScreening>, RepositoryError> {
        self.repository.recent(limit)
    }

    /// Severity distribution over recent screenings, resolved through the
    /// legacy-row adapter.
    pub fn severity_summary(&self, limit: usize) -> Result<SeverityDistribution, RepositoryError> {
        let rows = self.repository.recent(limit)?;
        Ok(reporting::summarize(
            rows.iter().map(LegacyScreeningRow::from),
        ))
    }
}

/// Aggregate result of one submission: which steps ran and how each fared.
/// Partial failures are described here, never raised.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ScreeningId>,
    #[serde(flatten)]
    pub record: ScreeningRecord,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_error: Option<String>,
    pub notified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<DispatchSummary>,
}

impl SubmissionReport {
    /// True when every side effect that ran succeeded.
    pub fn fully_succeeded(&self) -> bool {
        let notification_ok = self
            .notification
            .as_ref()
            .map(|summary| summary.all_succeeded)
            .unwrap_or(true);
        self.persisted && notification_ok
    }
}
