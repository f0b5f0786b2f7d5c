//! Error handling example for geosync-rs
//!
//! Shows which conditions are errors (unusable gazetteer, bad threshold,
//! rejected overrides) and which are ordinary row outcomes.

use geosync_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geosync-rs Error Handling Example ===\n");

    println!("--- Example 1: Missing gazetteer source ---");
    match Gazetteer::load_from_path("does/not/exist/areas.json") {
        Ok(gz) => println!("  loaded {} areas?", gz.len()),
        Err(e) if e.is_source_unavailable() => println!("  source unavailable: {e}"),
        Err(e) => return Err(e),
    }
    println!();

    println!("--- Example 2: Empty area tree ---");
    match Gazetteer::try_from_tree(&[]) {
        Ok(_) => println!("  empty tree accepted?"),
        Err(e) => println!("  {e}"),
    }
    println!();

    println!("--- Example 3: Threshold validation ---");
    for value in [49, 50, 85, 100, 101] {
        match Threshold::new(value) {
            Ok(t) => println!("  {value:>3}: ok ({t})"),
            Err(e) => println!("  {value:>3}: {e}"),
        }
    }
    println!();

    println!("--- Example 4: Unmatched and blank rows are not errors ---");
    let gazetteer = Gazetteer::try_from_tree(&[AreaRaw::new("1", "Москва")])?;
    let reconciler = Reconciler::new(&gazetteer, MatchConfig::default())?;
    let mut batch = reconciler.reconcile([Some("Zzzxyz"), Some("  "), None]);
    for row in batch.rows() {
        println!("  #{} {:?} -> {}", row.row_id, row.original, row.status);
    }
    println!();

    println!("--- Example 5: Rejected overrides ---");
    for (row_id, choice) in [
        (1, OverrideChoice::Pick("Москва".into())),
        (9, OverrideChoice::NoMatch),
        (0, OverrideChoice::Pick("Атлантида".into())),
    ] {
        match batch.apply_override(&gazetteer, row_id, choice) {
            Ok(row) => println!("  row {row_id}: now {}", row.status),
            Err(e) => println!("  row {row_id}: {e}"),
        }
    }

    Ok(())
}
