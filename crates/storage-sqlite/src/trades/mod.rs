mod repository;

pub use repository::{trade_key, TradeRepository, TRADE_PREFIX};
