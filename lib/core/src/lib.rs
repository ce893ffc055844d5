//! # pawmatch Core
//!
//! Core data model for the pawmatch match-scoring engine.
//!
//! This crate provides the types every other pawmatch crate speaks:
//!
//! - [`Report`] - A lost or found dog submission, owned by the report store
//! - [`FeatureSet`] - Per-request embedding and color histogram of one report
//! - [`MatchCandidate`] - A scored Lost/Found pairing visible to its owners
//! - [`Vector`] - Dense float vector with cosine math
//! - [`ReportStore`] / [`ImageStore`] - The collaborator seams the engine consumes
//!
//! ## Example
//!
//! ```rust
//! use pawmatch_core::{Category, Owner, Report, Vector};
//!
//! let owner = Owner::new("u1", "Maria", Some("0917 555 0101".to_string()));
//! let report = Report::new(1, Category::Lost, owner)
//!     .with_breed("Shih Tzu")
//!     .with_image("reports/1.jpg");
//! assert_eq!(report.owner_id(), "u1");
//!
//! let a = Vector::new(vec![1.0, 0.0]);
//! let b = Vector::new(vec![1.0, 0.0]);
//! assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-6);
//! ```

pub mod candidate;
pub mod error;
pub mod feature;
pub mod report;
pub mod store;
pub mod vector;

pub use candidate::{MatchCandidate, ReportSummary};
pub use error::{Error, ImageAccessError, Result};
pub use feature::{FeatureSet, ImageTensor, HISTOGRAM_LEN};
pub use report::{Category, Owner, Report, ReportId, UserId};
pub use store::{ImageStore, ReportStore};
pub use vector::Vector;
