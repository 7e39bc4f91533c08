use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::records::{DeleteOutcome, RecordSet};
use crate::trades::trades_model::Trade;
use crate::utils::time_utils::within_range;

/// Trait for trade repository operations.
pub trait TradeRepositoryTrait: Send + Sync {
    /// Upserts one leg, assigning a fresh id when empty.
    fn save(&self, trade: Trade) -> Result<Trade>;
    /// Every leg stored under `id`, ordered by expiration.
    fn get(&self, id: &str) -> Result<Vec<Trade>>;
    /// Removes every leg stored under `id`, continuing past individual failures.
    fn delete(&self, id: &str) -> Result<DeleteOutcome>;
    /// Removes the legs of `id` whose expiration is not in `keep`.
    fn prune_legs(&self, id: &str, keep: &[DateTime<Utc>]) -> Result<DeleteOutcome>;
    /// All legs, most recent entry first.
    fn get_all(&self) -> Result<RecordSet<Trade>>;

    /// Exact, case-sensitive match.
    fn get_by_symbol(&self, symbol: &str) -> Result<RecordSet<Trade>> {
        Ok(self.get_all()?.filter(|t| t.symbol == symbol))
    }

    /// Exact, case-sensitive match.
    fn get_by_sector(&self, sector: &str) -> Result<RecordSet<Trade>> {
        Ok(self.get_all()?.filter(|t| t.sector == sector))
    }

    /// Legs entered within `[start, end]`.
    fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RecordSet<Trade>> {
        Ok(self
            .get_all()?
            .filter(|t| within_range(&t.entry_date, &start, &end)))
    }
}

/// Trait for trade service operations.
pub trait TradeServiceTrait: Send + Sync {
    fn get_trades(&self) -> Result<RecordSet<Trade>>;
    fn get_trade_legs(&self, id: &str) -> Result<Vec<Trade>>;
    fn get_trades_by_symbol(&self, symbol: &str) -> Result<RecordSet<Trade>>;
    fn get_trades_by_sector(&self, sector: &str) -> Result<RecordSet<Trade>>;
    fn get_trades_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RecordSet<Trade>>;
    fn save_trade(&self, trade: Trade) -> Result<Trade>;
    fn save_trade_legs(&self, legs: Vec<Trade>) -> Result<Vec<Trade>>;
    fn delete_trade(&self, id: &str) -> Result<DeleteOutcome>;
}
