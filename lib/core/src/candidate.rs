use crate::{Category, Owner, Report, ReportId};
use serde::{Deserialize, Serialize};

/// The public face of one side of a candidate match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub report_id: ReportId,
    pub pet_id: u64,
    pub image_path: Option<String>,
    pub category: Category,
    pub owner: Owner,
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        Self {
            report_id: report.id,
            pet_id: report.pet_id,
            image_path: report.image_path.clone(),
            category: report.category,
            owner: report.owner.clone(),
        }
    }
}

/// A Lost/Found pairing that passed every gate, with integer percentage scores
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchCandidate {
    pub report_a: ReportSummary,
    pub report_b: ReportSummary,
    pub embedding_similarity: u8,
    pub color_similarity: u8,
    pub breed_similarity: u8,
}

impl MatchCandidate {
    /// True if `user_id` owns either side
    #[inline]
    pub fn involves(&self, user_id: &str) -> bool {
        self.report_a.owner.id == user_id || self.report_b.owner.id == user_id
    }
}
