use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{EXPORT_FORMAT_VERSION, KEY_LAYOUT_VERSION};
use crate::position::PositionSettings;
use crate::risk::RiskAssessment;
use crate::stocks::StockRating;
use crate::trades::Trade;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

/// Snapshot of every journal collection, as written to an export file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    #[serde(default = "current_layout_version")]
    pub layout_version: u32,
    pub export_date: DateTime<Utc>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub position_settings: PositionSettings,
    #[serde(default)]
    pub risk_assessments: Vec<RiskAssessment>,
    #[serde(default)]
    pub stock_ratings: Vec<StockRating>,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

fn current_layout_version() -> u32 {
    KEY_LAYOUT_VERSION
}

impl ExportDocument {
    pub fn new(
        position_settings: PositionSettings,
        risk_assessments: Vec<RiskAssessment>,
        stock_ratings: Vec<StockRating>,
        trades: Vec<Trade>,
    ) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION.to_string(),
            layout_version: KEY_LAYOUT_VERSION,
            export_date: Utc::now(),
            preferences: Preferences::default(),
            position_settings,
            risk_assessments,
            stock_ratings,
            trades,
        }
    }
}

/// Counts of what an import file contains.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub version: String,
    pub risk_assessments: usize,
    pub stock_ratings: usize,
    /// Distinct trade ids, not legs.
    pub trades: usize,
    pub trade_legs: usize,
    pub has_position_settings: bool,
}
