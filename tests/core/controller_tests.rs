//! Tests for the interaction controller
//!
//! Tests cover:
//! - Initial selection and fallbacks
//! - Event dispatch and recomputation
//! - Empty selections

use crate::common::synthetic::{ramp, row};
use vitalview::controller::{ControlEvent, Controller};
use vitalview::controls::{ControlOptions, GroupField, Selection};
use vitalview::dataset::Dataset;

fn dataset() -> Dataset {
    let mut rows = Vec::new();
    rows.extend(ramp("hr", "Colorectal", "0", 30, 10.0));
    rows.extend(ramp("map", "Colorectal", "0", 30, 10.0));
    rows.extend(ramp("map", "Vascular", "1", 30, -5.0));
    rows.extend(ramp("spo2", "Thoracic", "0", 30, 1.0));
    Dataset::from_rows(rows)
}

#[test]
fn test_options_list_each_signal_once() {
    let options = ControlOptions::from_dataset(&dataset());
    assert_eq!(options.signals, vec!["hr", "map", "spo2"]);
    assert_eq!(options.groups, [GroupField::OpType, GroupField::Emop]);

    let labels: Vec<String> = options.group_options().into_iter().map(|o| o.label).collect();
    assert_eq!(labels, vec!["Surgery Type", "Emergency Status"]);

    for option in options.signal_options() {
        assert_eq!(option.value, option.label);
    }
}

#[test]
fn test_starts_on_default_selection() {
    let controller = Controller::new(dataset());
    assert_eq!(controller.selection(), &Selection::default());
    assert_eq!(controller.series().len(), 2);
    assert_eq!(controller.model().legend.len(), 2);
}

#[test]
fn test_signal_change_recomputes() {
    let mut controller = Controller::new(dataset());
    assert!(controller.dispatch(ControlEvent::SignalChanged("spo2".into())));
    assert_eq!(controller.selection().signal, "spo2");
    assert_eq!(controller.series().len(), 1);
    assert_eq!(controller.series()[0].key, "0");
}

#[test]
fn test_group_change_recomputes() {
    let mut controller = Controller::new(dataset());
    assert!(controller.dispatch(ControlEvent::GroupChanged(GroupField::OpType)));
    let keys: Vec<&str> = controller.series().iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["Colorectal", "Vascular"]);
}

#[test]
fn test_repeated_event_is_a_no_op() {
    let mut controller = Controller::new(dataset());
    let before = controller.model().clone();
    assert!(!controller.dispatch(ControlEvent::SignalChanged("map".into())));
    assert_eq!(controller.model(), &before);
}

#[test]
fn test_unknown_signal_draws_empty_chart() {
    let mut controller = Controller::new(dataset());
    controller.dispatch(ControlEvent::SignalChanged("etco2".into()));
    assert!(controller.series().is_empty());
    assert!(controller.model().is_empty());
    assert!(controller.model().legend.is_empty());
}

#[test]
fn test_colors_survive_round_trip_between_selections() {
    let mut controller = Controller::new(dataset());
    let first: Vec<usize> = controller.model().legend.iter().map(|e| e.color_slot).collect();

    controller.dispatch(ControlEvent::GroupChanged(GroupField::OpType));
    controller.dispatch(ControlEvent::SignalChanged("spo2".into()));
    controller.dispatch(ControlEvent::GroupChanged(GroupField::Emop));
    controller.dispatch(ControlEvent::SignalChanged("map".into()));

    let again: Vec<usize> = controller.model().legend.iter().map(|e| e.color_slot).collect();
    assert_eq!(first, again);
    assert_eq!(controller.renderer().colors().len(), 5);
}

#[test]
fn test_restored_selection_is_used_when_valid() {
    let preferred = Selection {
        signal: "hr".into(),
        group: GroupField::OpType,
    };
    let controller = Controller::with_selection(dataset(), Some(preferred.clone()));
    assert_eq!(controller.selection(), &preferred);
}

#[test]
fn test_falls_back_when_default_signal_missing() {
    let dataset = Dataset::from_rows(vec![
        row("rr", 0.5, 14.0, "Colorectal", "0"),
        row("hr", 0.5, 80.0, "Colorectal", "0"),
    ]);
    let controller = Controller::new(dataset);
    assert_eq!(controller.selection().signal, "rr");
    assert_eq!(controller.selection().group, GroupField::Emop);
}
