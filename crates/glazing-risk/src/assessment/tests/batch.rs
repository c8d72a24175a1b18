use std::io::Cursor;

use crate::assessment::batch::{assess_path, assess_reader, BatchError, BatchOutcome};
use crate::assessment::domain::{RiskCategory, RiskLevel};
use crate::assessment::evaluation::RiskEvaluator;

const BATCH: &str = "\
id,outer_glass,outer_treatment,outer_laminated,outer_heat_soaked,inner_glass,location,height_m,framing,pedestrian_access,thermal_exposure,critical_use
roof-1,Annealed (monolithic),,,,,Overhead,6,fully framed,yes,even exposure,yes
canopy-2,,tempered,false,false,,roof,4,point supported,true,none,no
shopfront-3,tempered-heat-soaked,,,,annealed,low level,0.5,fully framed,no,coated,no
broken-4,,tempered,true,,,facade,3,fully framed,no,none,no
,laminated-tempered,,,true,,facade,20,partial,yes,both,no
";

fn entries() -> Vec<crate::assessment::batch::BatchEntry> {
    assess_reader(Cursor::new(BATCH), &RiskEvaluator::default()).expect("batch parses")
}

fn report_level(entry: &crate::assessment::batch::BatchEntry, category: RiskCategory) -> RiskLevel {
    entry
        .outcome
        .report()
        .and_then(|report| report.level_of(category))
        .expect("row was assessed")
}

#[test]
fn batch_preserves_row_order_and_ids() {
    let entries = entries();

    let ids: Vec<&str> = entries.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, ["roof-1", "canopy-2", "shopfront-3", "broken-4", "row-5"]);
    assert_eq!(
        entries.iter().map(|entry| entry.row).collect::<Vec<_>>(),
        [1, 2, 3, 4, 5]
    );
}

#[test]
fn batch_rows_are_scored_with_the_shared_rules() {
    let entries = entries();

    assert_eq!(
        report_level(&entries[0], RiskCategory::StructuralImpact),
        RiskLevel::VeryHigh
    );
    assert_eq!(
        report_level(&entries[1], RiskCategory::StructuralImpact),
        RiskLevel::Low
    );
    assert_eq!(
        report_level(&entries[1], RiskCategory::SpontaneousBreakage),
        RiskLevel::High
    );
    assert_eq!(
        report_level(&entries[2], RiskCategory::StructuralImpact),
        RiskLevel::High
    );
    assert_eq!(
        report_level(&entries[4], RiskCategory::FragmentationHazard),
        RiskLevel::Low
    );
}

#[test]
fn invalid_rows_are_rejected_without_aborting_the_batch() {
    let entries = entries();

    match &entries[3].outcome {
        BatchOutcome::Rejected { field, message } => {
            assert_eq!(field, "plies[0].heat_soaked");
            assert!(message.contains("heat-soak"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(entries[4].outcome.report().is_some());
}

#[test]
fn unrecognised_cells_name_their_column() {
    let csv = "outer_treatment,location,height_m,framing,pedestrian_access,thermal_exposure,critical_use\n\
               annealed,facade,tall,fully framed,no,none,no\n\
               annealed,facade,2,fully framed,maybe,none,no\n";

    let entries = assess_reader(Cursor::new(csv), &RiskEvaluator::default()).expect("batch parses");

    let fields: Vec<String> = entries
        .iter()
        .map(|entry| match &entry.outcome {
            BatchOutcome::Rejected { field, .. } => field.clone(),
            BatchOutcome::Assessed { .. } => "assessed".to_string(),
        })
        .collect();
    assert_eq!(fields, ["height_m", "pedestrian_access"]);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = assess_path(
        "/nonexistent/glazing-batch.csv",
        &RiskEvaluator::default(),
    )
    .expect_err("missing file");
    assert!(matches!(err, BatchError::Io(_)));
}

#[test]
fn undecodable_row_is_rejected_in_place() {
    let mut csv = Vec::new();
    csv.extend_from_slice(
        b"id,outer_treatment,location,height_m,framing,pedestrian_access,thermal_exposure,critical_use\n",
    );
    csv.extend_from_slice(b"ok-1,annealed,facade,3,fully framed,no,none,no\n");
    csv.extend_from_slice(b"bad-2,annealed,fa\xffcade,3,fully framed,no,none,no\n");
    csv.extend_from_slice(b"ok-3,annealed,facade,3,fully framed,no,none,no\n");

    let entries =
        assess_reader(Cursor::new(csv), &RiskEvaluator::default()).expect("batch still parses");

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].id, "ok-1");
    assert!(entries[0].outcome.report().is_some());
    assert_eq!(entries[2].id, "ok-3");
    assert_eq!(entries[2].row, 3);
    assert!(entries[2].outcome.report().is_some());

    assert_eq!(entries[1].row, 2);
    assert_eq!(entries[1].id, "row-2");
    match &entries[1].outcome {
        BatchOutcome::Rejected { field, message } => {
            assert_eq!(field, "location");
            assert!(message.contains("utf-8"), "unexpected message: {message}");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn preset_columns_must_agree_with_ply_columns() {
    let csv = "id,outer_glass,outer_treatment,outer_laminated,outer_heat_soaked,location,height_m,framing,pedestrian_access,thermal_exposure,critical_use\n\
               soak,tempered-unsoaked,,,yes,facade,3,fully framed,no,none,no\n\
               laminate,tempered-heat-soaked,,true,,facade,3,fully framed,no,none,no\n\
               treatment,laminated-annealed,tempered,,,facade,3,fully framed,no,none,no\n\
               restated,laminated-annealed,annealed,yes,,facade,3,fully framed,no,none,no\n";

    let entries = assess_reader(Cursor::new(csv), &RiskEvaluator::default()).expect("batch parses");

    let fields: Vec<String> = entries
        .iter()
        .map(|entry| match &entry.outcome {
            BatchOutcome::Rejected { field, .. } => field.clone(),
            BatchOutcome::Assessed { .. } => "assessed".to_string(),
        })
        .collect();
    assert_eq!(
        fields,
        [
            "outer_heat_soaked",
            "outer_laminated",
            "outer_treatment",
            "assessed"
        ]
    );
}
