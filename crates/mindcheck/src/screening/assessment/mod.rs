mod policy;
mod rules;

pub use policy::should_notify;

use serde::{Deserialize, Serialize};

use crate::screening::domain::{RiskLevel, ScreeningInputs, ScreeningSubmission};

/// Outcome of classifying one completed questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// True iff an 8Q emergency item fired.
    pub emergency: bool,
    pub eight_q_total: u8,
    pub recommendation: String,
    /// Raw answers retained for audit and export.
    pub inputs: ScreeningInputs,
}

/// Error raised when a questionnaire cannot be scored. Rejected before any
/// side effect; nothing is saved and nothing is notified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid screening input: {0}")]
    InvalidInput(String),
}

/// Classify a completed questionnaire into a risk assessment.
///
/// Pure and deterministic: no I/O, no clock, no randomness. Re-running on
/// identical inputs yields an identical assessment.
pub fn classify(submission: &ScreeningSubmission) -> Result<RiskAssessment, AssessmentError> {
    let signals = rules::extract_signals(submission)?;
    let (level, emergency, eight_q_total) = rules::decide_level(&signals);

    Ok(RiskAssessment {
        level,
        emergency,
        eight_q_total,
        recommendation: policy::recommendation_for(level).to_string(),
        inputs: ScreeningInputs {
            stress_score: submission.stress_score,
            two_q: submission.two_q,
            eight_q: signals.eight_q,
        },
    })
}
