use crate::screening::domain::RiskLevel;

/// Fixed clinical-guidance text keyed by risk level.
pub(crate) fn recommendation_for(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::None => {
            "No clear mental-health risk identified. Encourage routine self-care \
             and re-screen when circumstances change."
        }
        RiskLevel::Low => {
            "Low risk. Offer brief counselling or psycho-education, assign a buddy \
             for ongoing observation, and follow up within one month."
        }
        RiskLevel::Medium => {
            "Moderate suicide risk. Refer to a physician or psychiatrist for a \
             detailed assessment, agree a treatment plan, and schedule follow-up."
        }
        RiskLevel::High => {
            "Severe suicide risk. Refer to hospital immediately, keep the person \
             under close round-the-clock observation, and secure their safety."
        }
    }
}

/// Alert policy: notify once the level reaches the configured threshold.
/// `none` and `low` never notify under the default `medium` threshold; the
/// threshold is a configuration dial, not classifier behavior.
pub fn should_notify(level: RiskLevel, threshold: RiskLevel) -> bool {
    level >= threshold
}
