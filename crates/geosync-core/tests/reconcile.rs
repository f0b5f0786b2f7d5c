//! Batch reconciliation: worked examples, duplicate handling and row
//! invariants.

mod common;

use common::{example_gazetteer, fixture_gazetteer};
use geosync_core::prelude::*;
use std::sync::Mutex;

fn run(gz: &Gazetteer, inputs: &[Option<&str>]) -> Reconciliation {
    Reconciler::new(gz, MatchConfig::default())
        .unwrap()
        .reconcile(inputs.iter().copied())
}

// -------------------------------------------------------------------------
// Worked examples
// -------------------------------------------------------------------------

#[test]
fn region_qualified_input_picks_matching_kirovsk() {
    let gz = example_gazetteer();
    let batch = run(&gz, &[Some("Кировск Ленинградская область")]);
    let row = &batch.rows()[0];

    assert_eq!(row.resolved_name.as_deref(), Some("Кировск (Ленинградская область)"));
    assert_eq!(row.resolved_id.as_deref(), Some("1020"));
    assert!(row.changed);
    assert!(matches!(row.status, StatusTag::Exact | StatusTag::Approximate));
}

#[test]
fn exact_name_is_exact_and_unchanged() {
    let gz = example_gazetteer();
    let batch = run(&gz, &[Some("Москва")]);
    let row = &batch.rows()[0];

    assert_eq!(row.resolved_name.as_deref(), Some("Москва"));
    assert!(row.score >= 95.0, "score {}", row.score);
    assert_eq!(row.status, StatusTag::Exact);
    assert!(!row.changed);
    assert_eq!(row.region, None);
}

#[test]
fn repeated_input_copies_first_resolution() {
    let gz = example_gazetteer();
    let batch = run(&gz, &[Some("Москва"), Some("москва ")]);
    let (first, second) = (&batch.rows()[0], &batch.rows()[1]);

    assert_eq!(first.status, StatusTag::Exact);
    assert!(!first.changed);

    assert_eq!(second.status, StatusTag::DuplicateOfInput);
    assert_eq!(second.resolved_name, first.resolved_name);
    assert_eq!(second.resolved_id, first.resolved_id);
    assert_eq!(second.region, first.region);
    assert_eq!(second.score, first.score);
    assert_eq!(second.original, "москва");
}

#[test]
fn nonsense_input_is_not_found() {
    let gz = example_gazetteer();
    let batch = run(&gz, &[Some("Zzzxyz")]);
    let row = &batch.rows()[0];

    assert_eq!(row.status, StatusTag::NotFound);
    assert_eq!(row.resolved_name, None);
    assert_eq!(row.resolved_id, None);
    assert_eq!(row.score, 0.0);
    assert!(!row.changed);
}

// -------------------------------------------------------------------------
// Duplicates
// -------------------------------------------------------------------------

#[test]
fn second_input_resolving_to_same_target_is_flagged() {
    let gz = fixture_gazetteer();
    let batch = run(
        &gz,
        &[
            Some("Нижний Новгород"),
            Some("Нижний Новгород Нижегородская область"),
        ],
    );

    assert_eq!(batch.rows()[0].status, StatusTag::Exact);
    assert_eq!(batch.rows()[1].status, StatusTag::DuplicateOfTarget);
    assert_eq!(batch.rows()[1].resolved_name.as_deref(), Some("Нижний Новгород"));
    assert_eq!(batch.rows()[1].resolved_id.as_deref(), Some("66"));
}

#[test]
fn duplicate_of_a_target_duplicate_copies_its_fields() {
    let gz = fixture_gazetteer();
    let batch = run(
        &gz,
        &[
            Some("Нижний Новгород"),
            Some("Нижний Новгород Нижегородская область"),
            Some("нижний новгород нижегородская область"),
        ],
    );
    let rows = batch.rows();

    assert_eq!(rows[2].status, StatusTag::DuplicateOfInput);
    assert_eq!(rows[2].resolved_name, rows[1].resolved_name);
    assert_eq!(rows[2].score, rows[1].score);
    assert_eq!(batch.candidates(2), batch.candidates(1));
}

#[test]
fn repeated_unresolvable_input_stays_not_found() {
    let gz = fixture_gazetteer();
    let batch = run(&gz, &[Some("Zzzxyz"), Some("zzzxyz")]);

    assert_eq!(batch.rows()[0].status, StatusTag::NotFound);
    assert_eq!(batch.rows()[1].status, StatusTag::NotFound);
}

// -------------------------------------------------------------------------
// Rows and invariants
// -------------------------------------------------------------------------

#[test]
fn blank_entries_become_empty_rows() {
    let gz = fixture_gazetteer();
    let batch = run(&gz, &[Some(""), None, Some("   "), Some("Москва")]);

    for row in &batch.rows()[..3] {
        assert_eq!(row.status, StatusTag::Empty);
        assert_eq!(row.score, 0.0);
        assert!(batch.candidates(row.row_id).is_empty());
    }
    assert_eq!(batch.rows()[1].original, "");
    assert_eq!(batch.rows()[3].status, StatusTag::Exact);
    assert_eq!(batch.rows()[3].region.as_deref(), Some("Россия"));
}

#[test]
fn rows_keep_input_order_and_ids() {
    let gz = fixture_gazetteer();
    let inputs = [Some("Алматы"), None, Some("Мурманск"), Some("Екатеринбург")];
    let batch = run(&gz, &inputs);

    assert_eq!(batch.len(), inputs.len());
    for (i, row) in batch.rows().iter().enumerate() {
        assert_eq!(row.row_id, i);
    }
    assert_eq!(batch.rows()[0].region.as_deref(), Some("Казахстан"));
    assert_eq!(batch.rows()[2].resolved_id.as_deref(), Some("64"));
}

#[test]
fn row_invariants_hold_for_mixed_batch() {
    let gz = fixture_gazetteer();
    let batch = run(
        &gz,
        &[
            Some("Москва"),
            Some(""),
            Some("Zzzxyz"),
            Some("Кировск"),
            Some("Екатеринбур"),
            Some("москва"),
            None,
            Some("Нижний Новгород Нижегородская обл"),
            Some("Алматы"),
        ],
    );

    for row in batch.rows() {
        let resolved = row.resolved_name.is_some();
        assert_eq!(resolved, row.resolved_id.is_some(), "row {}", row.row_id);
        assert_eq!(
            resolved,
            !matches!(row.status, StatusTag::Empty | StatusTag::NotFound),
            "row {}",
            row.row_id
        );
        let expected_changed = row
            .resolved_name
            .as_deref()
            .is_some_and(|name| row.original.trim() != name.trim());
        assert_eq!(row.changed, expected_changed, "row {}", row.row_id);
    }

    let kirovsk = &batch.rows()[3];
    assert_eq!(kirovsk.status, StatusTag::Approximate);
    assert_eq!(batch.candidates(3).len(), 2);

    let typo = &batch.rows()[4];
    assert_eq!(typo.resolved_name.as_deref(), Some("Екатеринбург"));
    assert_eq!(typo.status, StatusTag::Approximate);
    assert!(typo.changed);
}

#[test]
fn scores_are_rounded_to_one_decimal() {
    let gz = fixture_gazetteer();
    let batch = run(&gz, &[Some("Екатеринбур")]);
    let score = batch.rows()[0].score;
    assert_eq!(score, (score * 10.0).round() / 10.0);
}

#[test]
fn progress_counts_distinct_inputs() {
    let gz = fixture_gazetteer();
    let reconciler = Reconciler::new(&gz, MatchConfig::default()).unwrap();
    let seen = Mutex::new(Vec::new());

    reconciler.reconcile_with_progress(
        [Some("Москва"), Some("москва"), Some("Алматы"), None],
        &|p| seen.lock().unwrap().push(p),
    );

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|p| p.total == 2));
    assert_eq!(seen.iter().map(|p| p.done).max(), Some(2));
}

#[test]
fn empty_gazetteer_is_rejected() {
    let gz = Gazetteer::from_tree(&[]);
    assert!(matches!(
        Reconciler::new(&gz, MatchConfig::default()),
        Err(GeoSyncError::EmptyGazetteer)
    ));
}

#[test]
fn lower_threshold_admits_fuzzier_matches() {
    let gz = fixture_gazetteer();
    let strict = run(&gz, &[Some("Масква")]);
    assert_eq!(strict.rows()[0].status, StatusTag::NotFound);

    let loose = Reconciler::new(&gz, MatchConfig::with_threshold(80).unwrap())
        .unwrap()
        .reconcile([Some("Масква")]);
    assert_eq!(loose.rows()[0].resolved_name.as_deref(), Some("Москва"));
    assert_eq!(loose.rows()[0].status, StatusTag::Approximate);
}
