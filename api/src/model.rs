use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::catalog::BreedEntry;

/// Format of every stored timestamp, e.g. `2024-01-01 10:00:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the `predictions` table.
#[derive(Debug, Clone, PartialEq, Deserialize, FromRow, Serialize)]
pub struct PredictionRecord {
    pub timestamp: String,
    #[sqlx(rename = "breed")]
    #[serde(rename = "breed")]
    pub breed_name: String,
    pub confidence: f64,
}

impl PredictionRecord {
    pub fn new(
        timestamp: impl Into<String>,
        breed_name: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            breed_name: breed_name.into(),
            confidence,
        }
    }

    /// Must round-trip through [`TIMESTAMP_FORMAT`] so text order is time order.
    pub fn has_valid_timestamp(&self) -> bool {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map(|parsed| parsed.format(TIMESTAMP_FORMAT).to_string() == self.timestamp)
            .unwrap_or(false)
    }

    pub fn has_valid_confidence(&self) -> bool {
        self.confidence > 0.0 && self.confidence <= 1.0
    }
}

pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// A single ranked guess produced by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPrediction {
    pub breed: BreedEntry,
    pub confidence: f64,
}

impl ScoredPrediction {
    pub fn percent(&self) -> f64 {
        self.confidence * 100.0
    }

    /// All predictions of one scoring event share `timestamp`.
    pub fn to_record(&self, timestamp: &str) -> PredictionRecord {
        PredictionRecord::new(timestamp, self.breed.name.clone(), self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_timestamp_uses_fixed_format() {
        let record = PredictionRecord::new(now_timestamp(), "Pug", 0.95);
        assert_eq!(record.timestamp.len(), "2024-01-01 10:00:00".len());
        assert!(record.has_valid_timestamp());
    }

    #[test]
    fn rejects_unpadded_fields() {
        for raw in ["2024-9-01 10:00:00", "2024-09-1 10:00:00", "2024-09-01 9:00:00"] {
            assert!(!PredictionRecord::new(raw, "Pug", 0.95).has_valid_timestamp(), "{raw}");
        }
    }

    #[test]
    fn rejects_iso_timestamps() {
        let record = PredictionRecord::new("2024-01-01T10:00:00Z", "Pug", 0.95);
        assert!(!record.has_valid_timestamp());
    }

    #[test]
    fn confidence_bounds() {
        assert!(PredictionRecord::new("2024-01-01 10:00:00", "Pug", 1.0).has_valid_confidence());
        assert!(!PredictionRecord::new("2024-01-01 10:00:00", "Pug", 0.0).has_valid_confidence());
        assert!(!PredictionRecord::new("2024-01-01 10:00:00", "Pug", 1.2).has_valid_confidence());
    }
}
