use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

use super::trades_model::Trade;
use super::trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::records::{DeleteOutcome, RecordSet};

pub struct TradeService {
    repository: Arc<dyn TradeRepositoryTrait>,
}

impl TradeService {
    pub fn new(repository: Arc<dyn TradeRepositoryTrait>) -> Self {
        TradeService { repository }
    }

    /// Legs are keyed by expiration, so two legs of one trade cannot share it.
    fn validate_legs(legs: &[Trade]) -> Result<()> {
        if legs.is_empty() {
            return Err(
                ValidationError::InvalidInput("a trade needs at least one leg".to_string()).into(),
            );
        }
        let mut expirations = HashSet::new();
        for leg in legs {
            leg.validate()?;
            if !expirations.insert(leg.expiration_date) {
                return Err(ValidationError::InvalidInput(format!(
                    "legs of one trade need distinct expiration dates ({} is repeated)",
                    leg.expiration_date
                ))
                .into());
            }
        }
        Ok(())
    }

    fn complete_or_partial(id: &str, outcome: DeleteOutcome) -> Result<DeleteOutcome> {
        if outcome.is_complete() {
            return Ok(outcome);
        }
        warn!(
            "Trade {} only partially deleted: {} of {} legs failed",
            id,
            outcome.failed_keys.len(),
            outcome.attempted()
        );
        Err(Error::PartialDelete {
            deleted: outcome.deleted_keys,
            failed: outcome.failed_keys,
        })
    }
}

impl TradeServiceTrait for TradeService {
    fn get_trades(&self) -> Result<RecordSet<Trade>> {
        self.repository.get_all()
    }

    fn get_trade_legs(&self, id: &str) -> Result<Vec<Trade>> {
        self.repository.get(id)
    }

    fn get_trades_by_symbol(&self, symbol: &str) -> Result<RecordSet<Trade>> {
        self.repository.get_by_symbol(symbol)
    }

    fn get_trades_by_sector(&self, sector: &str) -> Result<RecordSet<Trade>> {
        self.repository.get_by_sector(sector)
    }

    fn get_trades_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RecordSet<Trade>> {
        self.repository.get_by_date_range(start, end)
    }

    fn save_trade(&self, trade: Trade) -> Result<Trade> {
        trade.validate()?;
        self.repository.save(trade)
    }

    fn save_trade_legs(&self, mut legs: Vec<Trade>) -> Result<Vec<Trade>> {
        Self::validate_legs(&legs)?;

        let multi_leg = legs.len() > 1;
        let mut shared_id = legs
            .iter()
            .map(|leg| leg.id.clone())
            .find(|id| !id.is_empty())
            .unwrap_or_default();
        let resaving = !shared_id.is_empty();

        let mut saved = Vec::with_capacity(legs.len());
        for (index, leg) in legs.iter_mut().enumerate() {
            leg.id = shared_id.clone();
            leg.leg_number = index as u32 + 1;
            leg.is_multi_leg = multi_leg;
            let stored = self.repository.save(leg.clone())?;
            shared_id = stored.id.clone();
            saved.push(stored);
        }
        debug!("Saved {} leg(s) under trade {}", saved.len(), shared_id);

        // Legs from an earlier save that are no longer part of the trade.
        if resaving {
            let keep: Vec<DateTime<Utc>> = saved.iter().map(|leg| leg.expiration_date).collect();
            let outcome = self.repository.prune_legs(&shared_id, &keep)?;
            Self::complete_or_partial(&shared_id, outcome)?;
        }
        Ok(saved)
    }

    fn delete_trade(&self, id: &str) -> Result<DeleteOutcome> {
        let outcome = self.repository.delete(id)?;
        Self::complete_or_partial(id, outcome)
    }
}
