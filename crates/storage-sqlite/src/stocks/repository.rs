use std::sync::Arc;

use crate::db::KeyValueStore;
use crate::repository::{EntityRepository, StoredEntity};
use stonk_core::errors::Result;
use stonk_core::records::RecordSet;
use stonk_core::stocks::{StockRating, StockRatingRepositoryTrait};

pub const STOCK_PREFIX: &str = "stock:";

impl StoredEntity for StockRating {
    const PREFIX: &'static str = STOCK_PREFIX;
    const KIND: &'static str = "stock rating";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

pub struct StockRatingRepository {
    entities: EntityRepository<StockRating>,
}

impl StockRatingRepository {
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        StockRatingRepository {
            entities: EntityRepository::new(store),
        }
    }
}

impl StockRatingRepositoryTrait for StockRatingRepository {
    fn save(&self, rating: StockRating) -> Result<StockRating> {
        self.entities.save(rating)
    }

    fn get(&self, id: &str) -> Result<StockRating> {
        self.entities.get(id)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.entities.delete(id)
    }

    fn get_all(&self) -> Result<RecordSet<StockRating>> {
        let mut set = self.entities.list()?;
        set.records.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreOptions;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn repository(dir: &std::path::Path) -> StockRatingRepository {
        let store = KeyValueStore::open(StoreOptions::new(dir).without_compaction()).unwrap();
        StockRatingRepository::new(Arc::new(store))
    }

    fn rating(symbol: &str, sector: &str, day: u32, hour: u32) -> StockRating {
        StockRating {
            date: Utc.with_ymd_and_hms(2024, 7, day, hour, 30, 0).unwrap(),
            sector: sector.to_string(),
            stock_sentiment: 6,
            price_target: Some(185.5),
            confidence: 8,
            notes: "earnings next week".to_string(),
            ..StockRating::new(symbol)
        }
    }

    #[test]
    fn round_trip_keeps_every_field() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let saved = repo.save(rating("AAPL", "Technology", 1, 14)).unwrap();
        assert_eq!(repo.get(&saved.id).unwrap(), saved);
    }

    #[test]
    fn same_day_lookup_ignores_time_of_day() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());
        repo.save(rating("AAPL", "Technology", 8, 0)).unwrap();
        repo.save(rating("MSFT", "Technology", 8, 23)).unwrap();
        repo.save(rating("XOM", "Energy", 9, 0)).unwrap();

        let probe = Utc.with_ymd_and_hms(2024, 7, 8, 12, 0, 0).unwrap();
        let same_day = repo.get_by_date(probe).unwrap();
        let symbols: Vec<&str> = same_day.records.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn sector_and_symbol_matches_are_exact() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());
        repo.save(rating("AAPL", "Technology", 1, 9)).unwrap();
        repo.save(rating("AAPL", "technology", 2, 9)).unwrap();
        repo.save(rating("AAP", "Consumer", 3, 9)).unwrap();

        assert_eq!(repo.get_by_sector("Technology").unwrap().len(), 1);
        assert_eq!(repo.get_by_symbol("AAPL").unwrap().len(), 2);
        assert_eq!(repo.get_by_symbol("aapl").unwrap().len(), 0);
    }

    #[test]
    fn bad_record_does_not_hide_good_ones() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());
        repo.save(rating("NVDA", "Technology", 5, 9)).unwrap();
        repo.entities
            .store()
            .put_raw("stock:zzz", b"[1, 2, 3]".to_vec())
            .unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all.has_skipped());
    }
}
