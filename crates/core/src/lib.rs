//! Stonk Core - Domain entities, services, and traits.
//!
//! This crate contains the journaling rules for the risk management desktop app.
//! It is storage-agnostic and defines repository traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod export;
pub mod maintenance;
pub mod position;
pub mod records;
pub mod risk;
pub mod stocks;
pub mod trades;
pub mod utils;

// Re-export the shared result containers
pub use records::{DeleteOutcome, FailedKey, RecordSet, SkippedRecord};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
