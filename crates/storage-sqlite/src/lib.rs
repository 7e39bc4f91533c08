//! SQLite storage implementation for the Stonk risk journal.
//!
//! This crate provides all database-related functionality using Diesel with SQLite.
//! It implements the repository traits defined in `stonk-core` and contains:
//! - A single-connection pool holding the journal file's exclusive lock
//! - Diesel migrations
//! - An ordered key-value store with background compaction
//! - Repository implementations for every journal entity
//!
//! # Architecture
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!     repositories ── JSON documents
//!              │
//!              ▼
//!       KeyValueStore ── kv_entries table
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod repository;
pub mod schema;

// Repository implementations
pub mod position;
pub mod risk;
pub mod stocks;
pub mod trades;

// Re-export database utilities
pub use db::{
    compact_pool, create_pool, get_connection, run_migrations, DbConnection, DbPool,
    KeyValueStore, KvEntry, StoreOptions,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use position::PositionSettingsRepository;
pub use risk::RiskAssessmentRepository;
pub use stocks::StockRatingRepository;
pub use trades::TradeRepository;

// Re-export from stonk-core for convenience
pub use stonk_core::errors::{DatabaseError, Error, Result};
