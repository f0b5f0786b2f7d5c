// crates/geosync-core/src/loader/cache.rs
use super::{ensure_not_empty, open_stream};
use crate::error::{GeoSyncError, Result};
use crate::gazetteer::Gazetteer;
use bincode::Options;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Suffix appended to the source file name for the binary index.
pub const CACHE_SUFFIX: &str = "idx.bin";

/// Upper bound for a cached index, guards against corrupt length prefixes.
const MAX_INDEX_BYTES: u64 = 256 * 1024 * 1024;

/// `areas.json.gz` -> `areas.json.gz.idx.bin`
pub fn cache_path_for(source: &Path) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "gazetteer".to_string());
    source.with_file_name(format!("{filename}.{CACHE_SUFFIX}"))
}

impl Gazetteer {
    /// **Smart Load:** reuses a fresh cache, otherwise builds from source and
    /// writes the cache best-effort.
    pub(super) fn load_via_cache(path: &Path) -> Result<Self> {
        let cache_path = cache_path_for(path);

        if is_cache_fresh(path, &cache_path) {
            match read_index(&cache_path) {
                Ok(gz) if !gz.is_empty() => {
                    debug!(cache = %cache_path.display(), areas = gz.len(), "loaded cached index");
                    return Ok(gz);
                }
                Ok(_) => warn!(cache = %cache_path.display(), "cached index is empty, rebuilding"),
                Err(e) => warn!(cache = %cache_path.display(), error = %e, "unreadable index cache, rebuilding"),
            }
        }

        let gz = Self::load_raw_json(path)?;
        if let Err(e) = gz.save_index(&cache_path) {
            warn!(cache = %cache_path.display(), error = %e, "could not write index cache");
        }
        Ok(gz)
    }

    /// Writes the flattened index as bincode.
    pub fn save_index(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

pub(super) fn read_index(path: &Path) -> Result<Gazetteer> {
    let mut bytes = Vec::new();
    open_stream(path)?.read_to_end(&mut bytes)?;
    let gz: Gazetteer = bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_INDEX_BYTES)
        .allow_trailing_bytes()
        .deserialize(&bytes)
        .map_err(GeoSyncError::Bincode)?;
    ensure_not_empty(gz)
}

fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
    let cache_time = match fs::metadata(cache).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match fs::metadata(source).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= cache_time,
        Err(_) => false,
    }
}
