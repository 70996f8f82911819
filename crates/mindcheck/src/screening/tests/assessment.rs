use super::common::*;
use crate::screening::assessment::{classify, AssessmentError};
use crate::screening::domain::RiskLevel;

#[test]
fn calm_subject_has_no_risk() {
    let assessment = classify(&submission(Some(2), (0, 0, 0), &[])).expect("classifies");
    assert_eq!(assessment.level, RiskLevel::None);
    assert!(!assessment.emergency);
    assert_eq!(assessment.eight_q_total, 0);
}

#[test]
fn maximum_stress_alone_is_low_risk() {
    let assessment = classify(&submission(Some(5), (0, 0, 0), &[])).expect("classifies");
    assert_eq!(assessment.level, RiskLevel::Low);
    assert!(!assessment.emergency);
}

#[test]
fn emergency_item_forces_high_despite_low_total() {
    // Item 7 fires; total is only 1.
    let assessment =
        classify(&submission(None, (1, 0, 1), &[0, 0, 0, 0, 0, 0, 1, 0])).expect("classifies");
    assert_eq!(assessment.level, RiskLevel::High);
    assert!(assessment.emergency);
    assert_eq!(assessment.eight_q_total, 1);
}

#[test]
fn item_eight_is_also_an_emergency_item() {
    let assessment =
        classify(&submission(None, (0, 0, 1), &[0, 0, 0, 0, 0, 0, 0, 1])).expect("classifies");
    assert_eq!(assessment.level, RiskLevel::High);
    assert!(assessment.emergency);
}

#[test]
fn moderate_total_without_emergency_is_medium() {
    let assessment =
        classify(&submission(None, (0, 0, 1), &[1, 1, 0, 0, 0, 0, 0, 0])).expect("classifies");
    assert_eq!(assessment.level, RiskLevel::Medium);
    assert!(!assessment.emergency);
    assert_eq!(assessment.eight_q_total, 2);
}

#[test]
fn eight_q_tier_thresholds() {
    let cases = [
        (&[0, 0, 0, 0, 0, 0, 0, 0][..], RiskLevel::Low),
        (&[1, 0, 0, 0, 0, 0, 0, 0][..], RiskLevel::Low),
        (&[1, 1, 0, 0, 0, 0, 0, 0][..], RiskLevel::Medium),
        (&[1, 1, 1, 0, 0, 0, 0, 0][..], RiskLevel::Medium),
        (&[1, 1, 1, 1, 0, 0, 0, 0][..], RiskLevel::High),
    ];

    for (answers, expected) in cases {
        let assessment = classify(&submission(None, (0, 0, 1), answers)).expect("classifies");
        assert_eq!(assessment.level, expected, "answers {answers:?}");
        assert!(!assessment.emergency, "answers {answers:?}");
    }
}

#[test]
fn without_ideation_no_input_reaches_the_suicide_tiers() {
    for stress in 1..=5u8 {
        for (q1, q2) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let assessment =
                classify(&submission(Some(stress), (q1, q2, 0), &[])).expect("classifies");
            assert!(
                assessment.level <= RiskLevel::Low,
                "stress={stress} q1={q1} q2={q2} produced {:?}",
                assessment.level
            );
        }
    }
}

#[test]
fn eight_q_is_ignored_when_gating_question_is_negative() {
    // The intake wizard submits an all-zero array in this path; a stale
    // non-zero array must not leak risk either.
    let assessment =
        classify(&submission(Some(2), (0, 0, 0), &[1, 1, 1, 1, 1, 1, 1, 1])).expect("classifies");
    assert_eq!(assessment.level, RiskLevel::None);
    assert!(!assessment.emergency);
    assert_eq!(assessment.eight_q_total, 0);
    assert!(assessment.inputs.eight_q.is_none());
}

#[test]
fn missing_stress_score_contributes_no_risk() {
    let assessment = classify(&anonymous_submission(None)).expect("classifies");
    assert_eq!(assessment.level, RiskLevel::None);
}

#[test]
fn classification_is_deterministic() {
    let input = submission(Some(4), (1, 0, 1), &[1, 0, 1, 0, 0, 0, 0, 0]);
    let first = classify(&input).expect("classifies");
    let second = classify(&input).expect("classifies");
    assert_eq!(first, second);
}

#[test]
fn short_eight_q_module_is_rejected_when_required() {
    let error = classify(&submission(None, (0, 0, 1), &[1, 0, 1])).expect_err("rejected");
    let AssessmentError::InvalidInput(message) = error;
    assert!(message.contains("exactly 8"), "message: {message}");
}

#[test]
fn non_binary_answers_are_rejected() {
    let error =
        classify(&submission(None, (0, 2, 0), &[])).expect_err("2Q item out of range rejected");
    assert!(matches!(error, AssessmentError::InvalidInput(_)));

    let error = classify(&submission(None, (0, 0, 1), &[0, 0, 3, 0, 0, 0, 0, 0]))
        .expect_err("8Q item out of range rejected");
    assert!(matches!(error, AssessmentError::InvalidInput(_)));
}

#[test]
fn out_of_scale_stress_score_is_rejected() {
    let error = classify(&submission(Some(9), (0, 0, 0), &[])).expect_err("rejected");
    let AssessmentError::InvalidInput(message) = error;
    assert!(message.contains("stress score"), "message: {message}");
}

#[test]
fn recommendation_tracks_the_level() {
    let none = classify(&submission(Some(1), (0, 0, 0), &[])).expect("classifies");
    let high =
        classify(&submission(Some(1), (0, 0, 1), &[0, 0, 0, 0, 0, 0, 1, 1])).expect("classifies");
    assert_ne!(none.recommendation, high.recommendation);
    assert!(high.recommendation.to_lowercase().contains("hospital"));
}
