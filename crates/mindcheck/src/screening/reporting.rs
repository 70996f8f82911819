//! Severity normalization for the reporting path.
//!
//! The store has carried several schema revisions: risk may appear as a
//! free-text level label or as one of several numeric score columns. All of
//! that drift is absorbed here, in one adapter at the storage boundary, so
//! dashboards and exports see a single canonical bucket. Intake scoring does
//! not use this module.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::repository::StoredScreening;

/// Canonical severity bucket for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBucket {
    Normal,
    Mild,
    Moderate,
    Severe,
    /// Neither a recognizable label nor a parseable score was present.
    Unknown,
}

/// A stored row as any historical schema revision may have written it.
/// Level labels are tried first, then the numeric score columns in fixed
/// priority order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyScreeningRow {
    #[serde(default)]
    pub nine_q_level: Option<String>,
    #[serde(default)]
    pub phq9_level: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub nine_q_score: Option<Value>,
    #[serde(default)]
    pub phq9_total: Option<Value>,
    #[serde(default)]
    pub phq9_score: Option<Value>,
    #[serde(default)]
    pub q9_total: Option<Value>,
    #[serde(default)]
    pub score_9q: Option<Value>,
    #[serde(default)]
    pub phq9: Option<Value>,
}

impl LegacyScreeningRow {
    fn level_label(&self) -> Option<&str> {
        [&self.nine_q_level, &self.phq9_level, &self.risk_level]
            .into_iter()
            .find_map(|label| label.as_deref().filter(|value| !value.trim().is_empty()))
    }

    fn score(&self) -> Option<f64> {
        [
            &self.nine_q_score,
            &self.phq9_total,
            &self.phq9_score,
            &self.q9_total,
            &self.score_9q,
            &self.phq9,
        ]
        .into_iter()
        .find_map(|value| value.as_ref().and_then(parse_score))
    }
}

impl From<&StoredScreening> for LegacyScreeningRow {
    /// Adapter for rows written under the current schema.
    fn from(stored: &StoredScreening) -> Self {
        LegacyScreeningRow {
            risk_level: Some(stored.record.assessment.level.label().to_string()),
            ..LegacyScreeningRow::default()
        }
    }
}

/// Resolve a row to its severity bucket: label synonym table first, then the
/// first score column that parses, mapped through the fixed breakpoints.
pub fn normalize(row: &LegacyScreeningRow) -> SeverityBucket {
    if let Some(bucket) = row.level_label().and_then(bucket_for_label) {
        return bucket;
    }

    match row.score() {
        Some(score) => bucket_for_score(score),
        None => SeverityBucket::Unknown,
    }
}

/// Fixed synonym table, case/whitespace-normalized. Canonical intake levels
/// map alongside the labels older revisions wrote.
fn bucket_for_label(label: &str) -> Option<SeverityBucket> {
    let normalized = label
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    match normalized.as_str() {
        "normal" | "minimal" | "none" => Some(SeverityBucket::Normal),
        "mild" | "low" => Some(SeverityBucket::Mild),
        "moderate" | "medium" => Some(SeverityBucket::Moderate),
        "moderately severe" | "moderate-severe" | "mod-severe" | "mod severe" | "severe"
        | "high" => Some(SeverityBucket::Severe),
        _ => None,
    }
}

/// Score breakpoints shared by the 9Q/PHQ-9 style columns.
fn bucket_for_score(score: f64) -> SeverityBucket {
    if score <= 4.0 {
        SeverityBucket::Normal
    } else if score <= 9.0 {
        SeverityBucket::Mild
    } else if score <= 14.0 {
        SeverityBucket::Moderate
    } else {
        SeverityBucket::Severe
    }
}

/// Accept numbers and strings that fully parse as a number after trimming.
/// Empty or non-numeric strings are `None`, never zero: a missing score must
/// not silently become a "normal" bucket.
fn parse_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|parsed| parsed.is_finite()),
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
        }
        _ => None,
    }
}

/// Bucket counts for the dashboard summary surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityDistribution {
    pub normal: usize,
    pub mild: usize,
    pub moderate: usize,
    pub severe: usize,
    pub unknown: usize,
    pub total: usize,
}

impl SeverityDistribution {
    pub fn tally(&mut self, bucket: SeverityBucket) {
        match bucket {
            SeverityBucket::Normal => self.normal += 1,
            SeverityBucket::Mild => self.mild += 1,
            SeverityBucket::Moderate => self.moderate += 1,
            SeverityBucket::Severe => self.severe += 1,
            SeverityBucket::Unknown => self.unknown += 1,
        }
        self.total += 1;
    }
}

/// Summarize a batch of rows into a distribution.
pub fn summarize<I>(rows: I) -> SeverityDistribution
where
    I: IntoIterator<Item = LegacyScreeningRow>,
{
    let mut distribution = SeverityDistribution::default();
    for row in rows {
        distribution.tally(normalize(&row));
    }
    distribution
}
