use ahash::AHashMap;
use pawmatch_core::{Report, ReportId, ReportStore, Result};
use parking_lot::RwLock;
use std::sync::Arc;

/// In-process report store
#[derive(Debug, Clone, Default)]
pub struct MemoryReportStore {
    reports: Arc<RwLock<AHashMap<ReportId, Report>>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reports(reports: impl IntoIterator<Item = Report>) -> Self {
        let store = Self::new();
        {
            let mut map = store.reports.write();
            for report in reports {
                map.insert(report.id, report);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.reports.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.read().is_empty()
    }
}

impl ReportStore for MemoryReportStore {
    fn active_reports(&self) -> Result<Vec<Report>> {
        Ok(self
            .reports
            .read()
            .values()
            .filter(|r| !r.reunited)
            .cloned()
            .collect())
    }

    fn get(&self, id: &ReportId) -> Result<Option<Report>> {
        Ok(self.reports.read().get(id).cloned())
    }

    fn insert(&self, report: Report) -> Result<()> {
        self.reports.write().insert(report.id, report);
        Ok(())
    }

    fn mark_reunited(&self, id: &ReportId) -> Result<bool> {
        let mut reports = self.reports.write();
        match reports.get_mut(id) {
            Some(report) => {
                report.reunited = true;
                report.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: &ReportId) -> Result<bool> {
        Ok(self.reports.write().remove(id).is_some())
    }
}
