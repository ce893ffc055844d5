//! # pawmatch Similarity
//!
//! The match-scoring engine: proposes candidate matches between lost and
//! found dog reports.
//!
//! ## Signals
//!
//! - **Embedding similarity**: cosine similarity of visual embeddings from an
//!   injected [`FeatureExtractor`]
//! - **Color similarity**: cosine similarity of 48-bin RGB histograms
//! - **Breed similarity**: bigram Dice coefficient of lower-cased breed names
//!
//! ## Example
//!
//! ```rust
//! use pawmatch_similarity::{breed_similarity, color_similarity, embedding_similarity};
//! use pawmatch_core::Vector;
//!
//! assert_eq!(breed_similarity("Aspin", "aspin"), 100);
//!
//! let e = Vector::new(vec![0.2, 0.4, 0.1]);
//! assert_eq!(embedding_similarity(&e, &e), 100.0);
//!
//! let h = Vector::new(vec![0.5, 0.5]);
//! assert_eq!(color_similarity(&h, &h), 100);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Report    │────>│  Feature    │────>│  Pairwise   │
//! │   Store     │     │ Extraction  │     │  Matcher    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                       │         │              │
//!              ┌────────┘         └──────┐       │
//!              v                         v       v
//!       ┌─────────────┐         ┌─────────────┐ ┌─────────────┐
//!       │  Extractor  │         │  Histogram  │ │   Scoping   │
//!       │ (embedding) │         │  (48 bins)  │ │ (requester) │
//!       └─────────────┘         └─────────────┘ └─────────────┘
//! ```

pub mod distance;
pub mod engine;
pub mod explain;
pub mod extractor;
pub mod features;
pub mod histogram;
pub mod matcher;
pub mod policy;

// Re-export main types for convenience
pub use distance::{
    breed_similarity,
    color_similarity,
    dice_coefficient,
    embedding_score,
    embedding_similarity,
};
pub use engine::MatchEngine;
pub use explain::{MatchResponse, MatchStats, Rejection};
pub use extractor::{ExtractorHandle, FeatureExtractor, DEFAULT_INPUT_SIZE};
#[cfg(feature = "onnx")]
pub use extractor::OnnxExtractor;
pub use features::{ExtractedReport, Extraction, FeatureExtractionStage};
pub use histogram::{ColorHistogram, DEFAULT_HISTOGRAM_BINS, DEFAULT_HISTOGRAM_SIZE};
pub use matcher::{scope_to_user, PairOutcome, PairwiseMatcher};
pub use policy::{MatchPolicy, PolicyError};
