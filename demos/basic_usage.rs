//! Basic usage example for geosync-rs
//!
//! This example demonstrates how to:
//! - Load a gazetteer from a JSON area tree
//! - Resolve single place names and inspect the match tier
//! - Reconcile a batch and read the per-row status

use geosync_rs::prelude::*;
use std::path::PathBuf;

fn sample_gazetteer_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("crates/geosync-core/tests/fixtures/areas.json")
}

fn main() -> Result<()> {
    println!("=== geosync-rs Basic Usage Example ===\n");

    println!("Loading gazetteer...");
    let gazetteer = Gazetteer::load_raw_json(sample_gazetteer_path())?;
    println!("✓ {} areas loaded\n", gazetteer.len());

    println!("--- Example 1: Resolve single names ---");
    let resolver = Resolver::new(&gazetteer, MatchConfig::default());
    for query in [
        "Москва",
        "Кировск Ленинградская обл",
        "Екатеринбур",
        "Нижний Новгород Нижегородская обл",
        "Атлантида",
    ] {
        let result = resolver.resolve(query);
        match (&result.matched_name, result.tier) {
            (Some(name), Some(tier)) => {
                println!("  {query:<36} -> {name} ({:.1}, {tier:?})", result.score)
            }
            _ => println!("  {query:<36} -> no match"),
        }
    }
    println!();

    println!("--- Example 2: Reconcile a batch ---");
    let reconciler = Reconciler::new(&gazetteer, MatchConfig::default())?;
    let batch = reconciler.reconcile([
        Some("Москва"),
        Some("Кировск"),
        None,
        Some("москва"),
        Some("Мурманск"),
        Some("Zzzxyz"),
    ]);
    for row in batch.rows() {
        println!(
            "  #{} {:<10} -> {:<34} {:>5.1} {:<20} changed={}",
            row.row_id,
            row.original,
            row.resolved_name.as_deref().unwrap_or("-"),
            row.score,
            row.status,
            row.changed
        );
    }
    println!();

    let s = batch.summary();
    println!(
        "Summary: {} rows, {} exact, {} approximate, {} duplicates, {} not found, {} empty",
        s.total,
        s.exact,
        s.approximate,
        s.duplicates(),
        s.not_found,
        s.empty
    );

    Ok(())
}
