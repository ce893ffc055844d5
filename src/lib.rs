//! # pawmatch
//!
//! Proposes candidate matches between independently submitted "lost" and
//! "found" dog reports.
//!
//! Each pair of reports is scored on three independent signals:
//!
//! - **Visual embedding similarity** from a pretrained image backbone
//! - **Color-histogram similarity** over 48 RGB bins
//! - **Breed-name similarity** using a bigram Dice coefficient
//!
//! Pairs owned by the same user, or not forming a Lost/Found pair, are never
//! proposed. Breed similarity below 50 rejects a pair before any image math.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install pawmatch --features onnx
//! pawmatch --model mobilenet.onnx --tokens tokens.json --image-root ./images
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use pawmatch::prelude::*;
//! use std::sync::Arc;
//!
//! # fn extractor() -> Arc<dyn FeatureExtractor> { unimplemented!() }
//! let reports = Arc::new(MemoryReportStore::new());
//! let images = Arc::new(FsImageStore::new("./images"));
//! let engine = MatchEngine::new(
//!     reports,
//!     images,
//!     ExtractorHandle::ready(extractor()),
//!     MatchPolicy::default(),
//! )
//! .unwrap();
//!
//! let response = engine.run("user-1").unwrap();
//! for candidate in response.result {
//!     println!("{} <-> {}", candidate.report_a.pet_id, candidate.report_b.pet_id);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `pawmatch-core` - Reports, feature sets, candidates, vector math
//! - `pawmatch-similarity` - Scorers, histogram builder, extraction, matcher
//! - `pawmatch-storage` - Report stores (memory, LMDB) and filesystem images
//! - `pawmatch-api` - REST API with bearer authentication

// Re-export core types
pub use pawmatch_core::{
    Category, Owner, Report, ReportId, UserId,
    FeatureSet, ImageTensor, MatchCandidate, ReportSummary,
    ImageStore, ReportStore, Vector,
    Error, ImageAccessError, Result,
};

// Re-export the engine
pub use pawmatch_similarity::{
    breed_similarity, color_similarity, embedding_similarity,
    ColorHistogram, ExtractorHandle, FeatureExtractor,
    MatchEngine, MatchPolicy, MatchResponse, MatchStats,
};

// Re-export storage
pub use pawmatch_storage::{FsImageStore, LmdbReportStore, MemoryReportStore};

// Re-export API
pub use pawmatch_api::{AppState, RestApi, TokenAuthenticator};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Category, Owner, Report,
        MatchCandidate, Vector,
        Error, Result,
        ExtractorHandle, FeatureExtractor,
        MatchEngine, MatchPolicy, MatchResponse,
        FsImageStore, MemoryReportStore, ReportStore,
    };
}
