//! Integration tests for the ingest -> aggregate -> label -> report pipeline.

use engagement_prep::core::ClassTable;
use engagement_prep::ingest::METADATA_ROWS;
use engagement_prep::pipeline::{
    aggregate_directory, build_report, label_directory, AggregateOutcome, LabelOutcome,
};
use std::fs;
use std::path::PathBuf;

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("engagement-prep-it-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn write_annotation(path: &PathBuf, ratings: &[&str]) {
    let mut content = String::new();
    for i in 0..METADATA_ROWS {
        content.push_str(&format!("Session metadata,{i}\n"));
    }
    for (i, rating) in ratings.iter().enumerate() {
        content.push_str(&format!("00:00:{i:02},{rating}\n"));
    }
    fs::write(path, content).expect("write annotation");
}

#[test]
fn test_full_pipeline_over_two_sessions() {
    let root = scratch_dir();
    let annotations = root.join("annotations");
    let nested = annotations.join("group_a");
    let aggregated = root.join("aggregated");
    fs::create_dir_all(&nested).expect("create dirs");

    // One flat session, one nested, with invalid rows mixed in.
    write_annotation(
        &annotations.join("session_01.csv"),
        &["1.0", "1.0", "2.0", "2.0", "3.0"],
    );
    write_annotation(&nested.join("session_02.csv"), &["0.5", "", "bad", "-1.5"]);

    // Aggregate
    let outcomes = aggregate_directory(&annotations, &aggregated, 2);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, AggregateOutcome::Written { .. })));

    let flat = fs::read_to_string(aggregated.join("session_01_means.csv")).expect("read");
    assert_eq!(flat, "interval,Rating\n0,1\n1,2\n2,3\n");

    let nested_out =
        fs::read_to_string(aggregated.join("group_a_session_02_means.csv")).expect("read");
    // Invalid rows dropped before windowing: [0.5, -1.5] is a single window.
    assert_eq!(nested_out, "interval,Rating\n0,-0.5\n");

    // Re-running skips everything already produced.
    let rerun = aggregate_directory(&annotations, &aggregated, 2);
    assert!(rerun
        .iter()
        .all(|o| matches!(o, AggregateOutcome::SkippedExisting { .. })));

    // Label
    let labeled = label_directory(&aggregated, &ClassTable::default());
    assert_eq!(labeled.len(), 2);
    for outcome in &labeled {
        assert!(matches!(outcome, LabelOutcome::Labeled { .. }));
    }

    let flat = fs::read_to_string(aggregated.join("session_01_means.csv")).expect("read");
    // Means 1 and 2 are classes 0 and 1; mean 3 is out of range, unlabeled.
    assert_eq!(flat, "interval,Rating,class\n0,1,0\n1,2,1\n2,3,\n");

    // Report
    let report = build_report(&aggregated).expect("report");
    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.labeled_rows, 3);
    assert_eq!(report.unlabeled_rows, 1);
    assert_eq!(report.classes.len(), 2);
    assert_eq!(report.classes[0].class, 0);
    assert_eq!(report.classes[0].count, 2);
    assert_eq!(report.classes[1].class, 1);
    assert_eq!(report.classes[1].count, 1);

    let json_path = root.join("report.json");
    report.save_json(&json_path).expect("save json");
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("read json")).expect("parse");
    assert_eq!(value["labeled_rows"], 3);
    assert_eq!(value["classes"][0]["count"], 2);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_sessions_with_no_valid_ratings_are_no_ops() {
    let root = scratch_dir();
    let annotations = root.join("annotations");
    let aggregated = root.join("aggregated");
    fs::create_dir_all(&annotations).expect("create dirs");

    write_annotation(&annotations.join("empty.csv"), &["a", "", "NaN"]);

    let outcomes = aggregate_directory(&annotations, &aggregated, 2);
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], AggregateOutcome::Empty { .. }));
    assert!(!aggregated.join("empty_means.csv").exists());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_labeling_is_idempotent() {
    let root = scratch_dir();
    fs::write(
        root.join("session_means.csv"),
        "interval,Rating\n0,0.25\n1,1.75\n",
    )
    .expect("write");

    let table = ClassTable::default();
    label_directory(&root, &table);
    let first = fs::read_to_string(root.join("session_means.csv")).expect("read");

    label_directory(&root, &table);
    let second = fs::read_to_string(root.join("session_means.csv")).expect("read");

    assert_eq!(first, second);
    assert_eq!(first, "interval,Rating,class\n0,0.25,0\n1,1.75,1\n");

    let _ = fs::remove_dir_all(&root);
}
