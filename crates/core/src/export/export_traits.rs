use std::path::{Path, PathBuf};

use super::export_model::{ExportDocument, ImportSummary};
use crate::errors::Result;

pub trait ExportServiceTrait: Send + Sync {
    fn build_document(&self) -> Result<ExportDocument>;
    /// Writes the export file and returns the absolute path written.
    fn export_data(&self, path: &Path) -> Result<PathBuf>;
    /// Reads and validates an export file. Nothing is written to the store.
    fn import_data(&self, path: &Path) -> Result<ImportSummary>;
}
