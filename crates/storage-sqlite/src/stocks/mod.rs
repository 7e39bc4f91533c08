mod repository;

pub use repository::{StockRatingRepository, STOCK_PREFIX};
