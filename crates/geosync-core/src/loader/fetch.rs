// crates/geosync-core/src/loader/fetch.rs
use crate::error::{GeoSyncError, Result};
use crate::gazetteer::Gazetteer;
use crate::raw::AreaRaw;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

const USER_AGENT: &str = concat!("geosync/", env!("CARGO_PKG_VERSION"));

fn client() -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(60))
        .build()?)
}

fn get_text(url: &str) -> Result<String> {
    let response = client()?.get(url).send()?;
    if !response.status().is_success() {
        return Err(GeoSyncError::SourceUnavailable(format!(
            "{url} answered {}",
            response.status()
        )));
    }
    Ok(response.text()?)
}

/// Downloads and parses the area tree.
pub fn fetch_tree(url: &str) -> Result<Vec<AreaRaw>> {
    info!(url, "fetching gazetteer tree");
    let body = get_text(url)?;
    Ok(serde_json::from_str(&body)?)
}

/// Downloads the area tree and stores it verbatim at `out`.
///
/// The body is validated as an area tree before anything is written.
pub fn download_tree(url: &str, out: &Path) -> Result<usize> {
    let body = get_text(url)?;
    let roots: Vec<AreaRaw> = serde_json::from_str(&body)?;
    let gz = Gazetteer::try_from_tree(&roots)?;
    fs::write(out, body)?;
    info!(url, out = %out.display(), areas = gz.len(), "gazetteer tree saved");
    Ok(gz.len())
}

impl Gazetteer {
    /// Fetches the tree over HTTP and flattens it.
    pub fn fetch(url: &str) -> Result<Self> {
        Self::try_from_tree(&fetch_tree(url)?)
    }
}
