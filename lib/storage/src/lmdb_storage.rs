// LMDB-backed report store
use anyhow::Result as AnyResult;
use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};
use pawmatch_core::{Error, Report, ReportId, ReportStore, Result};
use std::path::Path;
use std::sync::Arc;

const DB_REPORTS: &str = "reports";

pub struct LmdbReportStore {
    env: Arc<Env>,
    reports_db: Database<Str, Bytes>,
}

impl LmdbReportStore {
    pub fn new<P: AsRef<Path>>(path: P) -> AnyResult<Self> {
        std::fs::create_dir_all(&path)?;

        let env = Arc::new(unsafe {
            EnvOpenOptions::new()
                .map_size(1024 * 1024 * 1024) // 1GB
                .max_dbs(4)
                .open(path)?
        });

        let mut wtxn = env.write_txn()?;
        let reports_db = env.create_database(&mut wtxn, Some(DB_REPORTS))?;
        wtxn.commit()?;

        Ok(Self { env, reports_db })
    }

    fn put(&self, report: &Report) -> AnyResult<()> {
        let data = bincode::serialize(report)?;
        let key = report.id.to_string();
        let mut wtxn = self.env.write_txn()?;
        self.reports_db.put(&mut wtxn, &key, &data)?;
        wtxn.commit()?;
        Ok(())
    }

    fn load(&self, id: &ReportId) -> AnyResult<Option<Report>> {
        let rtxn = self.env.read_txn()?;
        let key = id.to_string();
        match self.reports_db.get(&rtxn, &key)? {
            Some(data) => Ok(Some(bincode::deserialize(data)?)),
            None => Ok(None),
        }
    }

    fn load_all(&self) -> AnyResult<Vec<Report>> {
        let rtxn = self.env.read_txn()?;
        let mut reports = Vec::new();
        for result in self.reports_db.iter(&rtxn)? {
            let (_, data) = result?;
            reports.push(bincode::deserialize(data)?);
        }
        Ok(reports)
    }

    fn remove(&self, id: &ReportId) -> AnyResult<bool> {
        let mut wtxn = self.env.write_txn()?;
        let key = id.to_string();
        let existed = self.reports_db.delete(&mut wtxn, &key)?;
        wtxn.commit()?;
        Ok(existed)
    }
}

fn storage_err(e: anyhow::Error) -> Error {
    Error::Storage(format!("{:#}", e))
}

impl ReportStore for LmdbReportStore {
    fn active_reports(&self) -> Result<Vec<Report>> {
        let mut reports = self.load_all().map_err(storage_err)?;
        reports.retain(|r| !r.reunited);
        Ok(reports)
    }

    fn get(&self, id: &ReportId) -> Result<Option<Report>> {
        self.load(id).map_err(storage_err)
    }

    fn insert(&self, report: Report) -> Result<()> {
        self.put(&report).map_err(storage_err)
    }

    fn mark_reunited(&self, id: &ReportId) -> Result<bool> {
        match self.load(id).map_err(storage_err)? {
            Some(mut report) => {
                report.reunited = true;
                report.updated_at = chrono::Utc::now();
                self.put(&report).map_err(storage_err)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: &ReportId) -> Result<bool> {
        self.remove(id).map_err(storage_err)
    }
}
