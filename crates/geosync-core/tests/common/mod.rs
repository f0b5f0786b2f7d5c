//! Shared fixture loading for the integration tests.

#![allow(dead_code)]

use geosync_core::{AreaRaw, Gazetteer};
use std::path::PathBuf;

/// Path to a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The fixture area tree, parsed.
pub fn fixture_tree() -> Vec<AreaRaw> {
    let json = std::fs::read_to_string(fixture_path("areas.json"))
        .unwrap_or_else(|e| panic!("cannot read fixture: {e}"));
    serde_json::from_str(&json).expect("fixture is a valid area tree")
}

/// The fixture gazetteer (16 areas).
pub fn fixture_gazetteer() -> Gazetteer {
    Gazetteer::from_tree(&fixture_tree())
}

/// The three-entry gazetteer used by the worked examples.
pub fn example_gazetteer() -> Gazetteer {
    Gazetteer::from_tree(&[
        AreaRaw::new("1", "Москва"),
        AreaRaw::new("1020", "Кировск (Ленинградская область)"),
        AreaRaw::new("1067", "Кировск (Мурманская область)"),
    ])
}
