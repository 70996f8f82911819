use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::config::{HistoryConfig, NotifyConfig};
use crate::screening::auth::StaticCredentialGate;
use crate::screening::domain::{RiskLevel, ScreeningSubmission, SubjectInfo, TwoQAnswers};
use crate::screening::notify::{PushError, PushGateway};
use crate::screening::repository::{
    RepositoryError, ScreeningId, ScreeningRecord, ScreeningRepository, StoredScreening,
};
use crate::screening::service::ScreeningService;

pub(super) fn submission(
    stress: Option<u8>,
    (q1, q2, q3): (u8, u8, u8),
    eight_q: &[u8],
) -> ScreeningSubmission {
    ScreeningSubmission {
        subject: SubjectInfo {
            citizen_id: Some("1103700000001".to_string()),
            fullname: Some("Somsri T.".to_string()),
            facility_code: Some("10731".to_string()),
        },
        stress_score: stress,
        two_q: TwoQAnswers { q1, q2, q3 },
        eight_q: eight_q.to_vec(),
    }
}

pub(super) fn anonymous_submission(stress: Option<u8>) -> ScreeningSubmission {
    ScreeningSubmission {
        subject: SubjectInfo::default(),
        stress_score: stress,
        two_q: TwoQAnswers::default(),
        eight_q: Vec::new(),
    }
}

pub(super) fn notify_config() -> NotifyConfig {
    NotifyConfig {
        enabled: true,
        access_token: Some("test-channel-token".to_string()),
        group_id: Some("Cgroup01".to_string()),
        alert_user_id: None,
        threshold: RiskLevel::Medium,
    }
}

pub(super) fn history_config() -> HistoryConfig {
    HistoryConfig {
        username: Some("admin".to_string()),
        password: Some("screening-history".to_string()),
    }
}

/// Recorded push request for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PushRequest {
    pub destination: String,
    pub text: String,
}

/// Gateway double that records pushes and fails only the destinations it
/// was told to fail, so mixed-outcome dispatches can be scripted.
#[derive(Default)]
pub(super) struct ScriptedGateway {
    pushes: Mutex<Vec<PushRequest>>,
    failing: HashSet<String>,
}

impl ScriptedGateway {
    pub(super) fn failing_destination(destination: &str) -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            failing: HashSet::from([destination.to_string()]),
        }
    }

    pub(super) fn pushes(&self) -> Vec<PushRequest> {
        self.pushes.lock().expect("push log mutex poisoned").clone()
    }
}

impl PushGateway for ScriptedGateway {
    fn push(&self, _credential: &str, destination: &str, text: &str) -> Result<(), PushError> {
        self.pushes
            .lock()
            .expect("push log mutex poisoned")
            .push(PushRequest {
                destination: destination.to_string(),
                text: text.to_string(),
            });

        if self.failing.contains(destination) {
            return Err(PushError::Rejected {
                status: 401,
                body: format!("invalid token for {destination}"),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    rows: Mutex<Vec<StoredScreening>>,
    sequence: AtomicU64,
}

impl MemoryRepository {
    pub(super) fn rows(&self) -> Vec<StoredScreening> {
        self.rows.lock().expect("row mutex poisoned").clone()
    }
}

impl ScreeningRepository for MemoryRepository {
    fn insert(&self, record: ScreeningRecord) -> Result<StoredScreening, RepositoryError> {
        let stored = StoredScreening {
            id: ScreeningId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1),
            created_at: Utc::now(),
            record,
        };
        self.rows
            .lock()
            .expect("row mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    fn recent(&self, limit: usize) -> Result<Vec<StoredScreening>, RepositoryError> {
        let rows = self.rows.lock().expect("row mutex poisoned");
        Ok(rows.iter().rev().take(limit).cloned().collect())
    }
}

/// Repository double whose writes always fail.
pub(super) struct SaturatedRepository;

impl ScreeningRepository for SaturatedRepository {
    fn insert(&self, _record: ScreeningRecord) -> Result<StoredScreening, RepositoryError> {
        Err(RepositoryError::Unavailable(
            "connection pool exhausted".to_string(),
        ))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<StoredScreening>, RepositoryError> {
        Err(RepositoryError::Unavailable(
            "connection pool exhausted".to_string(),
        ))
    }
}

pub(super) fn build_service(
    notify: NotifyConfig,
) -> (
    ScreeningService<MemoryRepository, ScriptedGateway>,
    Arc<MemoryRepository>,
    Arc<ScriptedGateway>,
) {
    build_service_with(ScriptedGateway::default(), notify)
}

pub(super) fn build_service_with(
    gateway: ScriptedGateway,
    notify: NotifyConfig,
) -> (
    ScreeningService<MemoryRepository, ScriptedGateway>,
    Arc<MemoryRepository>,
    Arc<ScriptedGateway>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let gateway = Arc::new(gateway);
    let service = ScreeningService::new(repository.clone(), gateway.clone(), notify);
    (service, repository, gateway)
}

pub(super) fn history_gate() -> StaticCredentialGate {
    StaticCredentialGate::new(&history_config())
}
