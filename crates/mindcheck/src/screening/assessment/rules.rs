use super::AssessmentError;
use crate::screening::domain::{
    EightQAnswers, RiskLevel, ScreeningSubmission, STRESS_ELEVATED_AT, STRESS_SCALE_MAX,
    STRESS_SCALE_MIN,
};

/// Signals extracted from a validated submission before the level decision.
pub(crate) struct RiskSignals {
    pub stress_elevated: bool,
    pub depression_positive: bool,
    pub ideation: bool,
    pub eight_q: Option<EightQAnswers>,
}

/// Validate the raw answers and pull out the classification signals.
///
/// A missing stress score means the scale was not administered and never
/// contributes risk. When the gating question is negative the 8Q module is
/// treated as not administered: any supplied answers are ignored rather than
/// rejected, because the intake wizard submits an all-zero array in that
/// path. When the gating question is positive, a module with fewer than
/// eight answers is a caller contract violation, not a scorable state.
pub(crate) fn extract_signals(
    submission: &ScreeningSubmission,
) -> Result<RiskSignals, AssessmentError> {
    if let Some(score) = submission.stress_score {
        if !(STRESS_SCALE_MIN..=STRESS_SCALE_MAX).contains(&score) {
            return Err(AssessmentError::InvalidInput(format!(
                "stress score {score} is outside the {STRESS_SCALE_MIN}-{STRESS_SCALE_MAX} scale"
            )));
        }
    }

    for (name, value) in [
        ("q1", submission.two_q.q1),
        ("q2", submission.two_q.q2),
        ("q3", submission.two_q.q3),
    ] {
        if value > 1 {
            return Err(AssessmentError::InvalidInput(format!(
                "2Q item {name} must be 0 or 1, got {value}"
            )));
        }
    }

    let eight_q = if submission.two_q.ideation() {
        Some(validate_eight_q(&submission.eight_q)?)
    } else {
        None
    };

    Ok(RiskSignals {
        stress_elevated: submission
            .stress_score
            .map(|score| score >= STRESS_ELEVATED_AT)
            .unwrap_or(false),
        depression_positive: submission.two_q.depression_positive(),
        ideation: submission.two_q.ideation(),
        eight_q,
    })
}

fn validate_eight_q(answers: &[u8]) -> Result<EightQAnswers, AssessmentError> {
    let items: [u8; 8] = answers.try_into().map_err(|_| {
        AssessmentError::InvalidInput(format!(
            "8Q module requires exactly 8 answers, got {}",
            answers.len()
        ))
    })?;

    if let Some(value) = items.iter().find(|value| **value > 1) {
        return Err(AssessmentError::InvalidInput(format!(
            "8Q answers must be 0 or 1, got {value}"
        )));
    }

    Ok(EightQAnswers(items))
}

/// Decide the risk level. Returns (level, emergency flag, 8Q total).
///
/// The emergency check runs before the total-based thresholds and overrides
/// them: specific intent outranks cumulative symptom count.
pub(crate) fn decide_level(signals: &RiskSignals) -> (RiskLevel, bool, u8) {
    if signals.ideation {
        let total = signals.eight_q.map(|answers| answers.total()).unwrap_or(0);
        let emergency = signals
            .eight_q
            .map(|answers| answers.emergency())
            .unwrap_or(false);

        let level = if emergency || total >= 4 {
            RiskLevel::High
        } else if total >= 2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        return (level, emergency, total);
    }

    if signals.depression_positive || signals.stress_elevated {
        (RiskLevel::Low, false, 0)
    } else {
        (RiskLevel::None, false, 0)
    }
}
