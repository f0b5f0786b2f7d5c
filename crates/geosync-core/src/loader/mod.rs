// crates/geosync-core/src/loader/mod.rs

//! # Gazetteer Loader
//!
//! Handles the physical layer (files, decompression, cache, HTTP) and hands
//! the parsed area tree to [`Gazetteer::from_tree`]. An index that ends up
//! empty is reported as [`GeoSyncError::SourceUnavailable`]: the engine never
//! runs against a partial or missing gazetteer.

use crate::error::{GeoSyncError, Result};
use crate::gazetteer::Gazetteer;
use crate::raw::AreaRaw;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "cache")]
mod cache;
#[cfg(feature = "fetch")]
mod fetch;

#[cfg(feature = "cache")]
pub use cache::{cache_path_for, CACHE_SUFFIX};
#[cfg(feature = "fetch")]
pub use fetch::{download_tree, fetch_tree};

/// Public endpoint serving the full area tree as JSON.
pub const DEFAULT_AREAS_URL: &str = "https://api.hh.ru/areas";

impl Gazetteer {
    /// Loads a gazetteer from a JSON tree (`.json`, `.json.gz`) or a
    /// prebuilt index (`.bin`).
    ///
    /// With the `cache` feature a JSON source is indexed once and the index
    /// is stored next to it; later loads reuse it while it is newer than the
    /// source.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if is_index_file(path) {
            #[cfg(feature = "cache")]
            return cache::read_index(path).and_then(ensure_not_empty);
            #[cfg(not(feature = "cache"))]
            return Err(GeoSyncError::SourceUnavailable(format!(
                "{}: binary index support disabled (enable the 'cache' feature)",
                path.display()
            )));
        }

        #[cfg(feature = "cache")]
        return Self::load_via_cache(path);
        #[cfg(not(feature = "cache"))]
        return Self::load_raw_json(path);
    }

    /// Loads without touching any cache.
    pub fn load_raw_json(path: impl AsRef<Path>) -> Result<Self> {
        let reader = open_stream(path.as_ref())?;
        Self::from_reader(reader)
    }

    /// Parses a JSON area tree from any reader.
    #[cfg(feature = "json")]
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let roots: Vec<AreaRaw> = serde_json::from_reader(reader)?;
        ensure_not_empty(Gazetteer::from_tree(&roots))
    }

    #[cfg(not(feature = "json"))]
    pub fn from_reader<R: Read>(_reader: R) -> Result<Self> {
        Err(GeoSyncError::SourceUnavailable(
            "JSON support disabled (enable the 'json' feature)".into(),
        ))
    }

    /// Parses a JSON area tree held in memory.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let roots: Vec<AreaRaw> = serde_json::from_str(json)?;
        ensure_not_empty(Gazetteer::from_tree(&roots))
    }

    /// Builds a non-empty gazetteer from an already materialized tree.
    pub fn try_from_tree(roots: &[AreaRaw]) -> Result<Self> {
        ensure_not_empty(Gazetteer::from_tree(roots))
    }
}

pub(crate) fn ensure_not_empty(gz: Gazetteer) -> Result<Gazetteer> {
    if gz.is_empty() {
        Err(GeoSyncError::SourceUnavailable(
            "gazetteer tree contains no areas".into(),
        ))
    } else {
        Ok(gz)
    }
}

fn is_index_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bin")
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Opens a file, buffers it, and unwraps gzip when the name ends in `.gz`.
pub(crate) fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoSyncError::SourceUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(GeoSyncError::SourceUnavailable(format!(
                "{}: gzip support disabled (enable the 'compact' feature)",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}
