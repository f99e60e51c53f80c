use std::cmp::Ordering;

use crate::errors::ConfigError;
use crate::reconcile::CanonicalRecord;

use super::model::{Classification, ScoredRecord, ScoringTable, SubScore};

/// Default score at or above which a record raises an alert.
pub const DEFAULT_ALERT_THRESHOLD: u8 = 80;

/// Scores canonical records against a weighted rule table.
///
/// Scoring is pure: the same record and engine always produce the same
/// `ScoredRecord`.
#[derive(Clone, Debug)]
pub struct ScoringEngine {
    table: ScoringTable,
    alert_threshold: u8,
}

impl ScoringEngine {
    pub fn new(table: ScoringTable, alert_threshold: u8) -> Result<Self, ConfigError> {
        table.validate()?;
        if alert_threshold > 100 {
            return Err(ConfigError::AlertThreshold(alert_threshold));
        }
        Ok(Self {
            table,
            alert_threshold,
        })
    }

    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    pub fn alert_threshold(&self) -> u8 {
        self.alert_threshold
    }

    pub fn score(&self, record: CanonicalRecord) -> ScoredRecord {
        let rules = self.table.rules();
        let raw: Vec<f64> = rules
            .iter()
            .map(|rule| rule.credit(rule.metric.read(&record).value()))
            .collect();

        let points = apportion(&raw);
        let sub_scores: Vec<SubScore> = rules
            .iter()
            .zip(points)
            .map(|(rule, points)| SubScore {
                metric: rule.metric,
                weight: rule.weight,
                points,
            })
            .collect();

        let score = sub_scores
            .iter()
            .map(|s| u32::from(s.points))
            .sum::<u32>()
            .min(100) as u8;

        ScoredRecord {
            record,
            score,
            sub_scores,
            alert: score >= self.alert_threshold,
            classification: Classification::from_score(score),
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            table: ScoringTable::default(),
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
        }
    }
}

/// Integer points per rule that sum to the rounded raw total.
///
/// Each rule keeps the floor of its raw credit; the points left over go one
/// each to the largest fractional parts, earlier rules first on ties. A rule
/// with no fractional part (including a missing value) never gains a point.
fn apportion(raw: &[f64]) -> Vec<u8> {
    let total = raw.iter().sum::<f64>().round().clamp(0.0, 100.0) as u32;
    let mut points: Vec<u8> = raw.iter().map(|r| r.floor().clamp(0.0, 100.0) as u8).collect();
    let floor_sum: u32 = points.iter().map(|p| u32::from(*p)).sum();
    let mut remaining = total.saturating_sub(floor_sum);

    let fraction = |i: usize| raw[i] - raw[i].floor();
    let mut order: Vec<usize> = (0..raw.len()).filter(|&i| fraction(i) > 0.0).collect();
    order.sort_by(|&a, &b| {
        fraction(b)
            .partial_cmp(&fraction(a))
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    for i in order {
        if remaining == 0 {
            break;
        }
        points[i] += 1;
        remaining -= 1;
    }
    points
}
