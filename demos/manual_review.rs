//! Manual review example for geosync-rs
//!
//! Reconciles a batch, walks the review queue and applies reviewer
//! decisions before exporting the remaining rows.

use geosync_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geosync-rs Manual Review Example ===\n");

    let gazetteer = Gazetteer::from_tree(&[AreaRaw::new("113", "Россия").with_children(vec![
        AreaRaw::new("1", "Москва"),
        AreaRaw::new("145", "Ленинградская область").with_children(vec![AreaRaw::new(
            "1020",
            "Кировск (Ленинградская область)",
        )]),
        AreaRaw::new("1061", "Мурманская область").with_children(vec![AreaRaw::new(
            "1067",
            "Кировск (Мурманская область)",
        )]),
    ])]);

    let reconciler = Reconciler::new(&gazetteer, MatchConfig::default())?;
    let mut batch = reconciler.reconcile([Some("Москва"), Some("Кировск"), Some("Кировскк")]);

    println!("--- Review queue ---");
    let queue: Vec<usize> = batch
        .review_queue()
        .into_iter()
        .map(|(row, candidates)| {
            println!(
                "  #{} '{}' -> {:?} ({:.1})",
                row.row_id, row.original, row.resolved_name, row.score
            );
            for c in candidates {
                println!("      {:5.1}  {}", c.score, c.name);
            }
            row.row_id
        })
        .collect();
    println!();

    println!("--- Applying decisions ---");
    for row_id in queue {
        // The reviewer knows these rows are the Murmansk oblast town.
        let row = batch.apply_override(
            &gazetteer,
            row_id,
            OverrideChoice::Pick("Кировск (Мурманская область)".into()),
        )?;
        println!("  #{} -> {:?} [{}]", row.row_id, row.resolved_name, row.status);
    }

    match batch.apply_override(&gazetteer, 0, OverrideChoice::Pick("Атлантида".into())) {
        Ok(_) => println!("  unexpected: unknown area accepted"),
        Err(e) => println!("  rejected: {e}"),
    }
    println!();

    println!("--- Exportable rows ---");
    for row in batch.exportable() {
        println!(
            "  #{} {} -> {} (id {})",
            row.row_id,
            row.original,
            row.resolved_name.as_deref().unwrap_or("-"),
            row.resolved_id.as_deref().unwrap_or("-")
        );
    }
    println!("Overrides recorded: {}", batch.overrides().count());

    Ok(())
}
