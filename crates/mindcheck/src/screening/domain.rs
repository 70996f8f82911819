use serde::{Deserialize, Serialize};

/// Lowest stress answer on the five point scale.
pub const STRESS_SCALE_MIN: u8 = 1;
/// Highest stress answer on the five point scale; 5 reads "most severe".
pub const STRESS_SCALE_MAX: u8 = 5;
/// A stress answer at or above this value contributes low risk on its own.
pub const STRESS_ELEVATED_AT: u8 = 4;

/// Ordered risk classification. Drives both the recommendation text and the
/// notification threshold, so the ordering is part of the contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Parse a configuration label such as "medium". Case-insensitive.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(RiskLevel::None),
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

/// Answers to the 2Q plus depression screener, encoded 0/1 as on the wire.
/// `q1` covers depressed mood, `q2` anhedonia; `q3` (suicidal ideation) is
/// the gating question deciding whether the 8Q module is administered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TwoQAnswers {
    pub q1: u8,
    pub q2: u8,
    pub q3: u8,
}

impl TwoQAnswers {
    pub fn ideation(&self) -> bool {
        self.q3 == 1
    }

    pub fn depression_positive(&self) -> bool {
        self.q1 == 1 || self.q2 == 1
    }
}

/// Validated answers to the eight item suicide-risk module. Items seven and
/// eight (1-indexed) are the emergency items: a positive answer to either
/// forces the highest risk tier regardless of total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EightQAnswers(pub [u8; 8]);

impl EightQAnswers {
    pub fn total(&self) -> u8 {
        self.0.iter().sum()
    }

    pub fn emergency(&self) -> bool {
        self.0[6] == 1 || self.0[7] == 1
    }
}

/// Optional subject identifiers. Never required for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubjectInfo {
    #[serde(default)]
    pub citizen_id: Option<String>,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub facility_code: Option<String>,
}

impl SubjectInfo {
    /// Display name for alert text; "-" when the subject stayed anonymous.
    pub fn display_name(&self) -> &str {
        self.fullname
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("-")
    }
}

/// Wire shape accepted by the intake endpoint: a completed questionnaire.
/// `eight_q` may be empty when the gating question was negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSubmission {
    #[serde(default)]
    pub subject: SubjectInfo,
    #[serde(default)]
    pub stress_score: Option<u8>,
    pub two_q: TwoQAnswers,
    #[serde(default)]
    pub eight_q: Vec<u8>,
}

/// The raw answers that produced an assessment, retained for audit/export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningInputs {
    pub stress_score: Option<u8>,
    pub two_q: TwoQAnswers,
    pub eight_q: Option<EightQAnswers>,
}
