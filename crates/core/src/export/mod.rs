//! Whole-journal export and import documents.

mod export_model;
mod export_service;
mod export_traits;

pub use export_model::{ExportDocument, ImportSummary, Preferences};
pub use export_service::{resolve_path, ExportService};
pub use export_traits::ExportServiceTrait;
