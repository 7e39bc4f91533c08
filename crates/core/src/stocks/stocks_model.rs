//! Stock rating domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SCORE, MIN_SCORE};

/// A rating for one ticker on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockRating {
    #[serde(default)]
    pub id: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    pub symbol: String,
    #[serde(default)]
    pub sector: String,
    /// 1-10 scale
    pub stock_sentiment: i32,
    #[serde(default)]
    pub price_target: Option<f64>,
    /// 1-10 scale
    pub confidence: i32,
    #[serde(default)]
    pub notes: String,
}

impl StockRating {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            date: Utc::now(),
            symbol: symbol.into(),
            sector: String::new(),
            stock_sentiment: 0,
            price_target: None,
            confidence: 0,
            notes: String::new(),
        }
    }

    /// Scores outside the 1-10 scale. They are stored as given.
    pub fn out_of_scale_fields(&self) -> Vec<&'static str> {
        [
            ("stockSentiment", self.stock_sentiment),
            ("confidence", self.confidence),
        ]
        .into_iter()
        .filter(|(_, value)| !(MIN_SCORE..=MAX_SCORE).contains(value))
        .map(|(field, _)| field)
        .collect()
    }
}
