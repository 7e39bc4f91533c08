//! Trade domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// One leg of an options trade.
///
/// Legs of a multi-leg strategy share the same `id` and are told apart by
/// their expiration date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub sector: String,
    /// Strategy category, e.g. "Vertical Spreads".
    #[serde(default)]
    pub strategy: String,
    /// Specific strategy type, e.g. "Bull Call Spread".
    #[serde(rename = "type", default)]
    pub trade_type: String,
    /// Calendar week number, for display.
    #[serde(default)]
    pub week: u32,
    /// Required. A payload without it is rejected with "missing field `entryDate`".
    pub entry_date: DateTime<Utc>,
    /// Required, and part of the leg's storage key.
    pub expiration_date: DateTime<Utc>,
    #[serde(default)]
    pub entry_price: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_leg_number")]
    pub leg_number: u32,
    #[serde(default)]
    pub is_multi_leg: bool,
    /// Free text about the short leg expiry of calendar/diagonal spreads.
    #[serde(default)]
    pub short_leg_exp: String,
    /// Trading timeframe, e.g. "2 weeks".
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub entry: f64,
    #[serde(default)]
    pub stop: f64,
    #[serde(default)]
    pub target: f64,
}

fn default_leg_number() -> u32 {
    1
}

impl Trade {
    /// Symbol, sector, strategy and type must all be present.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("symbol", &self.symbol),
            ("sector", &self.sector),
            ("strategy", &self.strategy),
            ("type", &self.trade_type),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field.to_string()).into());
            }
        }
        Ok(())
    }
}
