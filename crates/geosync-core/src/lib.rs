// crates/geosync-core/src/lib.rs

//! # geosync-core
//!
//! Resolves free-text place names (misspelled, abbreviated, qualified with a
//! region) against a hierarchical gazetteer and reconciles whole batches of
//! them: one best match per row, a confidence score, a "name changed" flag
//! and duplicate classification.
//!
//! ```
//! use geosync_core::prelude::*;
//!
//! let gazetteer = Gazetteer::from_tree(&[
//!     AreaRaw::new("1", "Москва"),
//!     AreaRaw::new("2", "Кировск (Ленинградская область)"),
//!     AreaRaw::new("3", "Кировск (Мурманская область)"),
//! ]);
//! let reconciler = Reconciler::new(&gazetteer, MatchConfig::default())?;
//! let batch = reconciler.reconcile([Some("Москва"), Some("москва "), None]);
//!
//! assert_eq!(batch.rows()[0].status, StatusTag::Exact);
//! assert_eq!(batch.rows()[1].status, StatusTag::DuplicateOfInput);
//! assert_eq!(batch.rows()[2].status, StatusTag::Empty);
//! # Ok::<(), geosync_core::GeoSyncError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod batch;
pub mod config;
pub mod error;
pub mod gazetteer;
pub mod loader;
pub mod rank;
pub mod raw;
pub mod resolver;
pub mod review;
pub mod score;
pub mod search;
pub mod text;
pub mod tokenize;
pub mod traits;

pub mod prelude;

// Re-exports
pub use crate::batch::{Progress, Reconciler, Reconciliation, ResultRow, StatusTag};
pub use crate::config::{MatchConfig, Threshold};
pub use crate::error::{GeoSyncError, Result};
pub use crate::gazetteer::{AreaRecord, Gazetteer};
pub use crate::loader::DEFAULT_AREAS_URL;
pub use crate::raw::AreaRaw;
pub use crate::resolver::{MatchResult, MatchTier, Resolver};
pub use crate::review::{BatchSummary, OverrideChoice};
pub use crate::search::Candidate;
pub use crate::traits::GazetteerSearch;
