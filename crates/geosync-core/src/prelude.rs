//! geosync prelude: bring the common types and traits into scope.

pub use crate::batch::{Progress, Reconciler, Reconciliation, ResultRow, StatusTag};
pub use crate::config::{MatchConfig, Threshold};
pub use crate::error::{GeoSyncError, Result};
pub use crate::gazetteer::{AreaRecord, Gazetteer};
pub use crate::raw::AreaRaw;
pub use crate::resolver::{MatchResult, MatchTier, Resolver};
pub use crate::review::{BatchSummary, OverrideChoice};
pub use crate::search::Candidate;
pub use crate::traits::GazetteerSearch;
