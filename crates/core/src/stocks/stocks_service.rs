use chrono::{DateTime, Utc};
use log::warn;
use std::sync::Arc;

use super::stocks_model::StockRating;
use super::stocks_traits::{StockRatingRepositoryTrait, StockRatingServiceTrait};
use crate::errors::Result;
use crate::records::RecordSet;

pub struct StockRatingService {
    repository: Arc<dyn StockRatingRepositoryTrait>,
}

impl StockRatingService {
    pub fn new(repository: Arc<dyn StockRatingRepositoryTrait>) -> Self {
        StockRatingService { repository }
    }
}

impl StockRatingServiceTrait for StockRatingService {
    fn get_stock_ratings(&self) -> Result<RecordSet<StockRating>> {
        self.repository.get_all()
    }

    fn get_stock_rating(&self, id: &str) -> Result<StockRating> {
        self.repository.get(id)
    }

    fn get_stock_ratings_by_date(&self, date: DateTime<Utc>) -> Result<RecordSet<StockRating>> {
        self.repository.get_by_date(date)
    }

    fn get_stock_ratings_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RecordSet<StockRating>> {
        self.repository.get_by_date_range(start, end)
    }

    fn get_stock_ratings_by_sector(&self, sector: &str) -> Result<RecordSet<StockRating>> {
        self.repository.get_by_sector(sector)
    }

    fn get_stock_ratings_by_symbol(&self, symbol: &str) -> Result<RecordSet<StockRating>> {
        self.repository.get_by_symbol(symbol)
    }

    fn save_stock_rating(&self, rating: StockRating) -> Result<StockRating> {
        let off_scale = rating.out_of_scale_fields();
        if !off_scale.is_empty() {
            warn!(
                "Saving {} rating with scores off the 1-10 scale: {:?}",
                rating.symbol, off_scale
            );
        }
        self.repository.save(rating)
    }

    fn delete_stock_rating(&self, id: &str) -> Result<()> {
        self.repository.delete(id)
    }
}
