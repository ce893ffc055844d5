//! Match engine
//!
//! Entry point for one matching request. Dependencies are passed in
//! explicitly so tests can run the whole pipeline against a stub extractor.

use crate::explain::MatchResponse;
use crate::extractor::ExtractorHandle;
use crate::features::FeatureExtractionStage;
use crate::matcher::{scope_to_user, PairwiseMatcher};
use crate::policy::MatchPolicy;
use pawmatch_core::{Error, ImageStore, Report, ReportStore, Result};
use std::sync::Arc;
use tracing::debug;

/// Runs Report Store -> extraction -> pairwise matching -> scoping
#[derive(Clone)]
pub struct MatchEngine {
    reports: Arc<dyn ReportStore>,
    images: Arc<dyn ImageStore>,
    extractor: ExtractorHandle,
    matcher: PairwiseMatcher,
}

impl MatchEngine {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        images: Arc<dyn ImageStore>,
        extractor: ExtractorHandle,
        policy: MatchPolicy,
    ) -> Result<Self> {
        policy
            .validate()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(Self {
            reports,
            images,
            extractor,
            matcher: PairwiseMatcher::new(policy),
        })
    }

    pub fn extractor(&self) -> &ExtractorHandle {
        &self.extractor
    }

    pub fn reports(&self) -> &Arc<dyn ReportStore> {
        &self.reports
    }

    /// Compute candidate matches visible to `requesting_user`
    ///
    /// The full pairwise scan runs regardless of the requester; scoping is
    /// applied to its output. Features live until the scan completes.
    pub fn run(&self, requesting_user: &str) -> Result<MatchResponse> {
        if requesting_user.is_empty() {
            return Err(Error::Unauthorized("missing caller identity".to_string()));
        }
        let extractor = self.extractor.get()?;

        let mut reports: Vec<Report> = self
            .reports
            .active_reports()?
            .into_iter()
            .filter(|r| !r.reunited)
            .collect();
        reports.sort_by_key(Report::ordering_key);
        let considered = reports.len();

        let stage = FeatureExtractionStage::new(
            self.images.as_ref(),
            extractor.as_ref(),
            self.matcher.policy().histogram(),
        );
        let extraction = stage.extract_all(reports)?;

        let (candidates, mut stats) = self.matcher.match_all(&extraction.reports)?;
        stats.reports_considered = considered;
        stats.reports_skipped = extraction.skipped.len();
        drop(extraction);

        let visible = scope_to_user(candidates, requesting_user);
        stats.candidates_visible = visible.len();

        debug!(user = requesting_user, ?stats, "matching run finished");
        Ok(MatchResponse::new(visible, stats))
    }
}
