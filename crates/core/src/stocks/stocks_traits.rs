use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::records::RecordSet;
use crate::stocks::stocks_model::StockRating;
use crate::utils::time_utils::{same_calendar_day, within_range};

/// Trait for stock rating repository operations.
pub trait StockRatingRepositoryTrait: Send + Sync {
    fn save(&self, rating: StockRating) -> Result<StockRating>;
    fn get(&self, id: &str) -> Result<StockRating>;
    fn delete(&self, id: &str) -> Result<()>;
    /// All ratings, oldest first.
    fn get_all(&self) -> Result<RecordSet<StockRating>>;

    fn get_by_date(&self, date: DateTime<Utc>) -> Result<RecordSet<StockRating>> {
        Ok(self
            .get_all()?
            .filter(|r| same_calendar_day(&r.date, &date)))
    }

    fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RecordSet<StockRating>> {
        Ok(self
            .get_all()?
            .filter(|r| within_range(&r.date, &start, &end)))
    }

    /// Exact, case-sensitive match.
    fn get_by_sector(&self, sector: &str) -> Result<RecordSet<StockRating>> {
        Ok(self.get_all()?.filter(|r| r.sector == sector))
    }

    /// Exact, case-sensitive match.
    fn get_by_symbol(&self, symbol: &str) -> Result<RecordSet<StockRating>> {
        Ok(self.get_all()?.filter(|r| r.symbol == symbol))
    }
}

/// Trait for stock rating service operations.
pub trait StockRatingServiceTrait: Send + Sync {
    fn get_stock_ratings(&self) -> Result<RecordSet<StockRating>>;
    fn get_stock_rating(&self, id: &str) -> Result<StockRating>;
    fn get_stock_ratings_by_date(&self, date: DateTime<Utc>) -> Result<RecordSet<StockRating>>;
    fn get_stock_ratings_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RecordSet<StockRating>>;
    fn get_stock_ratings_by_sector(&self, sector: &str) -> Result<RecordSet<StockRating>>;
    fn get_stock_ratings_by_symbol(&self, symbol: &str) -> Result<RecordSet<StockRating>>;
    fn save_stock_rating(&self, rating: StockRating) -> Result<StockRating>;
    fn delete_stock_rating(&self, id: &str) -> Result<()>;
}
