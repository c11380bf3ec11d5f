//! Report writing port trait.

use crate::domain::error::AssetlabError;
use crate::domain::report::ReportRow;
use std::path::Path;

/// Port for writing assembled per-ticker metric reports.
pub trait ReportPort {
    fn write(&self, rows: &[ReportRow], output_path: &Path) -> Result<(), AssetlabError>;
}
