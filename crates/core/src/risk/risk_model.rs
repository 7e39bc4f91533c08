//! Risk assessment domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SCORE, MIN_SCORE};

/// A trader's daily risk self-assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    #[serde(default)]
    pub id: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    /// 1-10 scale
    pub emotional_score: i32,
    /// 1-10 scale
    pub fomo_score: i32,
    /// 1-10 scale
    pub bias_score: i32,
    /// Entered by the trader, or the average of the three components when left at 0.
    #[serde(default)]
    pub overall_score: i32,
    #[serde(default)]
    pub notes: String,
}

impl RiskAssessment {
    /// A blank assessment dated now.
    pub fn new() -> Self {
        Self {
            id: String::new(),
            date: Utc::now(),
            emotional_score: 0,
            fomo_score: 0,
            bias_score: 0,
            overall_score: 0,
            notes: String::new(),
        }
    }

    /// Integer average of the three component scores.
    pub fn calculate_overall(&mut self) {
        self.overall_score = (self.emotional_score + self.fomo_score + self.bias_score) / 3;
    }

    /// Component scores outside the 1-10 scale. They are stored as given.
    pub fn out_of_scale_fields(&self) -> Vec<&'static str> {
        [
            ("emotionalScore", self.emotional_score),
            ("fomoScore", self.fomo_score),
            ("biasScore", self.bias_score),
        ]
        .into_iter()
        .filter(|(_, value)| !(MIN_SCORE..=MAX_SCORE).contains(value))
        .map(|(field, _)| field)
        .collect()
    }
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self::new()
    }
}
