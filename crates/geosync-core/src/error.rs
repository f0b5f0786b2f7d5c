// crates/geosync-core/src/error.rs
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GeoSyncError>;

/// Every failure the engine can report.
///
/// Row-level conditions (blank or unmatched input) are never errors; they end
/// up as `Empty` / `NotFound` rows. Errors are reserved for the session-level
/// preconditions (a usable gazetteer, a valid threshold) and for rejected
/// manual overrides.
#[derive(Debug, Error)]
pub enum GeoSyncError {
    /// The gazetteer could not be obtained, parsed, or was empty.
    #[error("gazetteer source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "cache")]
    #[error("index cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Threshold outside the accepted `50..=100` range.
    #[error("threshold {0} is outside the accepted range 50..=100")]
    InvalidThreshold(i64),

    /// A reconciler was requested over an index with no entries.
    #[error("gazetteer index is empty")]
    EmptyGazetteer,

    #[error("no row with id {0}")]
    UnknownRow(usize),

    #[error("'{0}' is not a gazetteer entry")]
    UnknownArea(String),

    #[error("row {0} has no input to reconcile")]
    BlankRow(usize),
}

impl GeoSyncError {
    /// True for every failure that means "the gazetteer could not be obtained".
    pub fn is_source_unavailable(&self) -> bool {
        match self {
            GeoSyncError::SourceUnavailable(_) | GeoSyncError::Io(_) => true,
            #[cfg(feature = "json")]
            GeoSyncError::Json(_) => true,
            #[cfg(feature = "cache")]
            GeoSyncError::Bincode(_) => true,
            #[cfg(feature = "fetch")]
            GeoSyncError::Http(_) => true,
            _ => false,
        }
    }
}
