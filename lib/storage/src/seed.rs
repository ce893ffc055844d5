//! Bulk import of reports from a JSON array

use pawmatch_core::{Report, ReportStore, Result};
use std::path::Path;
use tracing::info;

/// Load every report in `path` into `store`, returning how many were imported
pub fn import_reports<P: AsRef<Path>>(store: &dyn ReportStore, path: P) -> Result<usize> {
    let data = std::fs::read(path.as_ref())?;
    let reports: Vec<Report> = serde_json::from_slice(&data)?;
    let count = reports.len();
    for report in reports {
        store.insert(report)?;
    }
    info!("Imported {} reports from {:?}", count, path.as_ref());
    Ok(count)
}
