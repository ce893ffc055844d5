//! Collaborator seams consumed by the matching engine

use crate::{ImageAccessError, Report, ReportId, Result};
use bytes::Bytes;

/// Source of report records, and sink for reunification and deletion
pub trait ReportStore: Send + Sync {
    /// Every non-reunited report, both categories, owner info populated
    fn active_reports(&self) -> Result<Vec<Report>>;

    fn get(&self, id: &ReportId) -> Result<Option<Report>>;

    fn insert(&self, report: Report) -> Result<()>;

    /// Returns `false` if no such report exists
    fn mark_reunited(&self, id: &ReportId) -> Result<bool>;

    /// Returns `false` if no such report exists
    fn delete(&self, id: &ReportId) -> Result<bool>;
}

/// Raw image bytes by path
pub trait ImageStore: Send + Sync {
    fn read(&self, path: &str) -> std::result::Result<Bytes, ImageAccessError>;
}
