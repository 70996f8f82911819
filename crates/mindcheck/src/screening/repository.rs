use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assessment::RiskAssessment;
use super::domain::SubjectInfo;

/// Identifier assigned by the store at insert time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreeningId(pub u64);

/// A classified screening ready for persistence: the assessment plus the
/// subject it belongs to. Immutable once stored; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub subject: SubjectInfo,
    pub assessment: RiskAssessment,
}

/// A record as returned by the store, with the server-assigned identifier
/// and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredScreening {
    pub id: ScreeningId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: ScreeningRecord,
}

impl StoredScreening {
    /// Flat row shape matching the store schema, used by the history and
    /// export surfaces.
    pub fn row_view(&self) -> ScreeningRowView {
        let assessment = &self.record.assessment;
        ScreeningRowView {
            id: self.id,
            citizen_id: self.record.subject.citizen_id.clone(),
            fullname: self.record.subject.fullname.clone(),
            facility_code: self.record.subject.facility_code.clone(),
            stress_score: assessment.inputs.stress_score,
            q1: assessment.inputs.two_q.q1,
            q2: assessment.inputs.two_q.q2,
            q3: assessment.inputs.two_q.q3,
            q8_total: assessment.eight_q_total,
            risk_level: assessment.level.label(),
            recommendation: assessment.recommendation.clone(),
            created_at: self.created_at,
        }
    }
}

/// Flat per-row view of a stored screening.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningRowView {
    pub id: ScreeningId,
    pub citizen_id: Option<String>,
    pub fullname: Option<String>,
    pub facility_code: Option<String>,
    pub stress_score: Option<u8>,
    pub q1: u8,
    pub q2: u8,
    pub q3: u8,
    pub q8_total: u8,
    pub risk_level: &'static str,
    pub recommendation: String,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction so the service can be exercised in isolation. The
/// store assigns `id` and `created_at` and serializes its own writes.
pub trait ScreeningRepository: Send + Sync {
    fn insert(&self, record: ScreeningRecord) -> Result<StoredScreening, RepositoryError>;
    /// Most recent screenings, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<StoredScreening>, RepositoryError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
