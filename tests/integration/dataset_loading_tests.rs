//! Dataset loading integration tests
//!
//! Tests for loading the bundled sample file and for malformed inputs.

use std::io::Cursor;
use std::path::Path;

use crate::common::assertions::{assert_sorted_buckets, assert_unique_keys};
use crate::common::example_files::SAMPLE_VITALS;
use crate::common::read_example_file;
use crate::common::synthetic::csv_header;
use vitalview::controller::{ControlEvent, Controller};
use vitalview::controls::GroupField;
use vitalview::dataset::{Dataset, LoadError};

// ============================================
// Sample File Tests
// ============================================

#[test]
fn test_load_sample_complete_cycle() {
    let dataset = Dataset::load(Path::new(SAMPLE_VITALS)).expect("Should load sample");
    assert_eq!(dataset.len(), 315);

    for row in &dataset.rows {
        assert_eq!(row.signal, row.signal.to_lowercase());
        assert!(row.emop == "0" || row.emop == "1", "emop was {}", row.emop);
        let t = row.norm_time.expect("sample has no blank times");
        assert!((0.0..=1.0).contains(&t));
    }

    let controller = Controller::new(dataset);
    assert_eq!(controller.options().signals, vec!["map", "hr", "spo2"]);
    assert_eq!(controller.selection().signal, "map");

    let keys: Vec<&str> = controller.series().iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["0", "1"]);
    assert_sorted_buckets(controller.series());
}

#[test]
fn test_sample_by_surgery_type() {
    let content = read_example_file(SAMPLE_VITALS);
    let dataset = Dataset::from_reader(Cursor::new(content)).expect("Should parse");
    let mut controller = Controller::new(dataset);

    controller.dispatch(ControlEvent::GroupChanged(GroupField::OpType));
    let series = controller.series();
    assert_unique_keys(series);

    let keys: Vec<&str> = series.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "Colorectal",
            "Vascular",
            "Hepatobiliary and pancreatic surgery",
            "Thoracic"
        ]
    );

    let long = &controller.model().legend[2];
    assert_eq!(long.key, "Hepatobiliary and pancreatic surgery");
    assert_eq!(long.label.chars().count(), 19);

    // Colorectal appears in two cases, so shared buckets average two samples
    assert!(series[0].values.iter().any(|b| b.count == 2 && b.sd.is_some()));
}

// ============================================
// Malformed Input Tests
// ============================================

#[test]
fn test_missing_file_reports_path() {
    let err = Dataset::load(Path::new("data/does_not_exist.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("does_not_exist.csv"));
}

#[test]
fn test_missing_column_is_rejected() {
    let csv = "signal,norm_time,value,optype\nmap,0.1,80,Colorectal\n";
    let err = Dataset::from_reader(Cursor::new(csv)).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn("emop")));
}

#[test]
fn test_non_numeric_value_reports_line() {
    let csv = format!(
        "{}map,0.1,80,Colorectal,0\nmap,0.2,high,Colorectal,0\n",
        csv_header()
    );
    let err = Dataset::from_reader(Cursor::new(csv)).unwrap_err();
    match err {
        LoadError::Csv { line, .. } => assert_eq!(line, Some(3)),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_header_only_is_empty() {
    let err = Dataset::from_reader(Cursor::new(csv_header())).unwrap_err();
    assert!(matches!(err, LoadError::Empty));
}

#[test]
fn test_blank_cells_survive_loading() {
    let csv = format!(
        "{}map,,80,Colorectal,0\nmap,0.2,,Colorectal,\nmap,0.2,75,Colorectal,0.0\n",
        csv_header()
    );
    let dataset = Dataset::from_reader(Cursor::new(csv)).expect("Should parse");
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.rows[0].norm_time, None);
    assert_eq!(dataset.rows[1].value, None);
    assert_eq!(dataset.rows[1].emop, "null");
    assert_eq!(dataset.rows[2].emop, "0");

    // The "null" group only holds a row without a value, so it has no buckets
    let controller = Controller::new(dataset);
    let series = controller.series();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].key, "0");
    assert_eq!(series[0].values.len(), 1);
    assert_eq!(series[0].values[0].mean, 75.0);
    assert_eq!(series[1].key, "null");
    assert!(series[1].values.is_empty());
}

#[test]
fn test_non_finite_values_are_skipped() {
    let csv = format!(
        "{}map,0.1,NaN,Colorectal,0\nmap,0.1,80,Colorectal,0\nmap,0.2,inf,Colorectal,0\n",
        csv_header()
    );
    let dataset = Dataset::from_reader(Cursor::new(csv)).expect("Should parse");
    assert!(dataset.rows[0].value.is_some_and(f64::is_nan));
    assert_eq!(dataset.rows[2].value, Some(f64::INFINITY));

    let controller = Controller::new(dataset);
    let buckets = &controller.series()[0].values;
    assert_eq!(buckets.len(), 1, "the 0.2 bucket only holds inf");
    assert_eq!(buckets[0].count, 1);
    assert_eq!(buckets[0].mean, 80.0);
    assert_eq!(buckets[0].sd, None);
}
