//! Stock ratings module - per-ticker sentiment models, services, and traits.

mod stocks_model;
mod stocks_service;
mod stocks_traits;

pub use stocks_model::StockRating;
pub use stocks_service::StockRatingService;
pub use stocks_traits::{StockRatingRepositoryTrait, StockRatingServiceTrait};
