//! Position sizing settings model.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Account-wide position sizing rules. Stored as a single record.
///
/// Percentages are expressed as whole numbers (`2.0` means 2 %).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionSettings {
    pub account_value: f64,
    pub account_risk_per_trade: f64,
    pub max_portfolio_exposure: f64,
    pub stop_loss_percent: f64,
    pub risk_reward_ratio: f64,
    pub daily_loss_limit: f64,
    pub weekly_loss_limit: f64,
    pub position_scaling: f64,
    pub correlation_adjustment: f64,
    pub volatility_multiplier: f64,
    pub max_drawdown_tolerance: f64,
}

impl Default for PositionSettings {
    fn default() -> Self {
        Self {
            account_value: 25000.0,
            account_risk_per_trade: 2.0,
            max_portfolio_exposure: 20.0,
            stop_loss_percent: 50.0,
            risk_reward_ratio: 1.0,
            daily_loss_limit: 3.0,
            weekly_loss_limit: 7.0,
            position_scaling: 100.0,
            correlation_adjustment: 1.0,
            volatility_multiplier: 1.0,
            max_drawdown_tolerance: 15.0,
        }
    }
}

impl PositionSettings {
    fn fields(&self) -> [(&'static str, f64); 11] {
        [
            ("accountValue", self.account_value),
            ("accountRiskPerTrade", self.account_risk_per_trade),
            ("maxPortfolioExposure", self.max_portfolio_exposure),
            ("stopLossPercent", self.stop_loss_percent),
            ("riskRewardRatio", self.risk_reward_ratio),
            ("dailyLossLimit", self.daily_loss_limit),
            ("weeklyLossLimit", self.weekly_loss_limit),
            ("positionScaling", self.position_scaling),
            ("correlationAdjustment", self.correlation_adjustment),
            ("volatilityMultiplier", self.volatility_multiplier),
            ("maxDrawdownTolerance", self.max_drawdown_tolerance),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((field, _)) = self.fields().iter().find(|(_, v)| !v.is_finite()) {
            return Err(
                ValidationError::InvalidInput(format!("{} must be a finite number", field)).into(),
            );
        }
        if self.account_value < 0.0 {
            return Err(ValidationError::InvalidInput(
                "accountValue cannot be negative".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_account_template() {
        let json = serde_json::to_value(PositionSettings::default()).unwrap();
        assert_eq!(json["accountValue"], 25000.0);
        assert_eq!(json["stopLossPercent"], 50.0);
        assert_eq!(json["positionScaling"], 100.0);
        assert_eq!(json["maxDrawdownTolerance"], 15.0);
    }

    #[test]
    fn rejects_negative_account_value() {
        let settings = PositionSettings {
            account_value: -1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_nan() {
        let settings = PositionSettings {
            risk_reward_ratio: f64::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
