//! Screening intake, risk classification, and alert dispatch.

pub mod assessment;
pub mod auth;
pub mod domain;
pub mod notify;
pub mod reporting;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use assessment::{classify, should_notify, AssessmentError, RiskAssessment};
pub use auth::{CapabilityToken, HistoryGate, StaticCredentialGate};
pub use domain::{
    EightQAnswers, RiskLevel, ScreeningInputs, ScreeningSubmission, SubjectInfo, TwoQAnswers,
};
pub use notify::{
    alert_text, AlertDispatcher, Channel, DispatchSummary, LineMessagingClient,
    NotificationOutcome, PushError, PushGateway,
};
pub use reporting::{LegacyScreeningRow, SeverityBucket, SeverityDistribution};
pub use repository::{
    RepositoryError, ScreeningId, ScreeningRecord, ScreeningRepository, ScreeningRowView,
    StoredScreening,
};
pub use router::{screening_router, ScreeningApi};
pub use service::{ScreeningService, SubmissionReport};
