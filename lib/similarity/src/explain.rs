//! Match statistics and response shaping
//!
//! Counts are taken over the full pairwise scan, before access scoping, so
//! they describe the run rather than what the caller is allowed to see.

use pawmatch_core::MatchCandidate;
use serde::Serialize;

/// Why a pair did not become a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SameOwner,
    SameCategory,
    Breed,
    Embedding,
    Color,
}

/// Counters for one matching run
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MatchStats {
    pub reports_considered: usize,
    pub reports_skipped: usize,
    pub pairs_compared: usize,
    pub rejected_same_owner_or_category: usize,
    pub rejected_breed: usize,
    pub rejected_embedding: usize,
    pub rejected_color: usize,
    pub candidates_total: usize,
    pub candidates_visible: usize,
}

impl MatchStats {
    pub fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::SameOwner | Rejection::SameCategory => {
                self.rejected_same_owner_or_category += 1
            }
            Rejection::Breed => self.rejected_breed += 1,
            Rejection::Embedding => self.rejected_embedding += 1,
            Rejection::Color => self.rejected_color += 1,
        }
    }
}

/// Response of a matching request
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    /// Candidates visible to the requesting user
    pub result: Vec<MatchCandidate>,
    pub stats: MatchStats,
}

impl MatchResponse {
    pub fn new(result: Vec<MatchCandidate>, stats: MatchStats) -> Self {
        Self { result, stats }
    }
}
