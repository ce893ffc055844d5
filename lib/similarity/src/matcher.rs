//! Pairwise matcher and access scoping
//!
//! Every unordered pair of extracted reports is run through the gates in
//! order of cost: ownership and category first, then breed text, then the
//! embedding and color-histogram comparisons.

use crate::distance::{breed_similarity, color_similarity, embedding_score, embedding_similarity};
use crate::explain::{MatchStats, Rejection};
use crate::features::ExtractedReport;
use crate::policy::MatchPolicy;
use pawmatch_core::{Error, MatchCandidate, ReportSummary, Result};

/// Result of comparing one pair
#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Rejected(Rejection),
    Candidate(MatchCandidate),
}

/// Scores and gates report pairs
#[derive(Debug, Clone, Default)]
pub struct PairwiseMatcher {
    policy: MatchPolicy,
}

impl PairwiseMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Compare `a` and `b`; `a` becomes the first side of any candidate
    pub fn compare(&self, a: &ExtractedReport, b: &ExtractedReport) -> Result<PairOutcome> {
        let (ra, rb) = (&a.report, &b.report);

        if ra.owner_id() == rb.owner_id() {
            return Ok(PairOutcome::Rejected(Rejection::SameOwner));
        }
        if !ra.category.is_counterpart_of(rb.category) {
            return Ok(PairOutcome::Rejected(Rejection::SameCategory));
        }

        let breed = breed_similarity(ra.breed_or_empty(), rb.breed_or_empty());
        if breed < self.policy.breed_threshold {
            return Ok(PairOutcome::Rejected(Rejection::Breed));
        }

        let (ea, eb) = (&a.features.embedding, &b.features.embedding);
        if ea.dim() != eb.dim() {
            return Err(Error::InvalidDimension {
                expected: ea.dim(),
                actual: eb.dim(),
            });
        }
        let embedding = embedding_similarity(ea, eb);
        if embedding < self.policy.embedding_floor {
            return Ok(PairOutcome::Rejected(Rejection::Embedding));
        }

        let color = color_similarity(&a.features.histogram, &b.features.histogram);
        if color <= self.policy.color_floor {
            return Ok(PairOutcome::Rejected(Rejection::Color));
        }

        Ok(PairOutcome::Candidate(MatchCandidate {
            report_a: ReportSummary::from(ra),
            report_b: ReportSummary::from(rb),
            embedding_similarity: embedding_score(embedding),
            color_similarity: color,
            breed_similarity: breed,
        }))
    }

    /// Compare all unordered pairs in slice order
    ///
    /// The returned stats carry pair and gate counts; report counts and
    /// visibility are left for the caller to fill in.
    pub fn match_all(&self, extracted: &[ExtractedReport]) -> Result<(Vec<MatchCandidate>, MatchStats)> {
        let mut stats = MatchStats::default();
        let mut candidates = Vec::new();

        for (i, a) in extracted.iter().enumerate() {
            for b in &extracted[i + 1..] {
                stats.pairs_compared += 1;
                match self.compare(a, b)? {
                    PairOutcome::Candidate(candidate) => candidates.push(candidate),
                    PairOutcome::Rejected(rejection) => stats.record(rejection),
                }
            }
        }

        stats.candidates_total = candidates.len();
        Ok((candidates, stats))
    }
}

/// Keep only candidates where `user_id` owns one of the two reports
pub fn scope_to_user(candidates: Vec<MatchCandidate>, user_id: &str) -> Vec<MatchCandidate> {
    candidates
        .into_iter()
        .filter(|c| c.involves(user_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawmatch_core::{Category, FeatureSet, Owner, Report, Vector};

    fn extracted(
        category: Category,
        owner: &str,
        breed: &str,
        embedding: Vec<f32>,
        histogram: Vec<f32>,
    ) -> ExtractedReport {
        let report = Report::new(1, category, Owner::new(owner, owner.to_uppercase(), None))
            .with_breed(breed)
            .with_image("dog.png");
        let features = FeatureSet::new(report.id, Vector::new(embedding), Vector::new(histogram));
        ExtractedReport { report, features }
    }

    fn default_pair(category_b: Category, owner_b: &str, breed_b: &str) -> (ExtractedReport, ExtractedReport) {
        (
            extracted(Category::Lost, "u1", "Shih Tzu", vec![1.0, 0.5, 0.2], vec![0.5, 0.5, 0.0]),
            extracted(category_b, owner_b, breed_b, vec![1.0, 0.5, 0.2], vec![0.5, 0.5, 0.0]),
        )
    }

    #[test]
    fn test_identical_cross_pair_scores_full() {
        let matcher = PairwiseMatcher::default();
        let (a, b) = default_pair(Category::Found, "u2", "shih tzu");
        match matcher.compare(&a, &b).unwrap() {
            PairOutcome::Candidate(c) => {
                assert_eq!(c.breed_similarity, 100);
                assert_eq!(c.embedding_similarity, 100);
                assert_eq!(c.color_similarity, 100);
                assert_eq!(c.report_a.owner.id, "u1");
                assert_eq!(c.report_b.category, Category::Found);
            }
            other => panic!("expected candidate, got {other:?}"),
        }
    }

    #[test]
    fn test_same_owner_rejected() {
        let matcher = PairwiseMatcher::default();
        let (a, b) = default_pair(Category::Found, "u1", "Shih Tzu");
        assert_eq!(
            matcher.compare(&a, &b).unwrap(),
            PairOutcome::Rejected(Rejection::SameOwner)
        );
    }

    #[test]
    fn test_same_category_rejected() {
        let matcher = PairwiseMatcher::default();
        let (a, b) = default_pair(Category::Lost, "u2", "Shih Tzu");
        assert_eq!(
            matcher.compare(&a, &b).unwrap(),
            PairOutcome::Rejected(Rejection::SameCategory)
        );
    }

    #[test]
    fn test_breed_prefilter_ignores_identical_images() {
        let matcher = PairwiseMatcher::default();
        let (a, b) = default_pair(Category::Found, "u2", "Dalmatian");
        assert_eq!(
            matcher.compare(&a, &b).unwrap(),
            PairOutcome::Rejected(Rejection::Breed)
        );
    }

    #[test]
    fn test_negative_embedding_rejected() {
        let matcher = PairwiseMatcher::default();
        let a = extracted(Category::Lost, "u1", "Aspin", vec![1.0, 0.0], vec![1.0, 0.0]);
        let b = extracted(Category::Found, "u2", "Aspin", vec![-1.0, 0.0], vec![1.0, 0.0]);
        assert_eq!(
            matcher.compare(&a, &b).unwrap(),
            PairOutcome::Rejected(Rejection::Embedding)
        );
    }

    #[test]
    fn test_orthogonal_embedding_passes_weak_gate() {
        let matcher = PairwiseMatcher::default();
        let a = extracted(Category::Lost, "u1", "Aspin", vec![1.0, 0.0], vec![1.0, 0.0]);
        let b = extracted(Category::Found, "u2", "Aspin", vec![0.0, 1.0], vec![1.0, 0.0]);
        match matcher.compare(&a, &b).unwrap() {
            PairOutcome::Candidate(c) => assert_eq!(c.embedding_similarity, 0),
            other => panic!("expected candidate, got {other:?}"),
        }
    }

    #[test]
    fn test_disjoint_histograms_rejected() {
        let matcher = PairwiseMatcher::default();
        let a = extracted(Category::Lost, "u1", "Aspin", vec![1.0, 0.0], vec![1.0, 0.0]);
        let b = extracted(Category::Found, "u2", "Aspin", vec![1.0, 0.0], vec![0.0, 1.0]);
        assert_eq!(
            matcher.compare(&a, &b).unwrap(),
            PairOutcome::Rejected(Rejection::Color)
        );
    }

    #[test]
    fn test_embedding_dimension_mismatch_errors() {
        let matcher = PairwiseMatcher::default();
        let a = extracted(Category::Lost, "u1", "Aspin", vec![1.0, 0.0], vec![1.0]);
        let b = extracted(Category::Found, "u2", "Aspin", vec![1.0, 0.0, 0.0], vec![1.0]);
        assert!(matches!(
            matcher.compare(&a, &b),
            Err(Error::InvalidDimension { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_match_all_and_scope() {
        let matcher = PairwiseMatcher::default();
        let reports = vec![
            extracted(Category::Lost, "u1", "Aspin", vec![1.0, 0.2], vec![0.6, 0.4]),
            extracted(Category::Found, "u2", "Aspin", vec![0.9, 0.3], vec![0.5, 0.5]),
            extracted(Category::Found, "u3", "Aspin", vec![0.8, 0.1], vec![0.7, 0.3]),
            extracted(Category::Lost, "u3", "Beagle", vec![0.8, 0.1], vec![0.7, 0.3]),
        ];
        let (candidates, stats) = matcher.match_all(&reports).unwrap();

        assert_eq!(stats.pairs_compared, 6);
        // u1-u2 and u1-u3 match; u2-u3 same category; beagle vs aspin fails breed;
        // the two u3 reports share an owner
        assert_eq!(candidates.len(), 2);
        assert_eq!(stats.candidates_total, 2);
        assert_eq!(stats.rejected_breed, 1);
        assert_eq!(stats.rejected_same_owner_or_category, 3);

        assert_eq!(scope_to_user(candidates.clone(), "u1").len(), 2);
        assert_eq!(scope_to_user(candidates.clone(), "u2").len(), 1);
        assert_eq!(scope_to_user(candidates, "u9").len(), 0);
    }
}
