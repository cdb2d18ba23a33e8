//! Tests for the chart model
//!
//! Tests cover:
//! - Y domain monotonicity and fallbacks
//! - Legend size and label truncation
//! - Color stability across renders

use crate::common::synthetic::{ramp, row};
use vitalview::aggregate::{aggregate, Bucket, Series};
use vitalview::chart::{
    truncate_label, y_domain, ChartModel, Renderer, EMPTY_Y_DOMAIN, X_DOMAIN,
};
use vitalview::controls::GroupField;

fn series_with(key: &str, buckets: &[(f64, f64, Option<f64>)]) -> Series {
    Series {
        key: key.to_string(),
        values: buckets
            .iter()
            .map(|&(t, mean, sd)| Bucket {
                norm_time: t,
                mean,
                sd,
                count: if sd.is_some() { 3 } else { 1 },
            })
            .collect(),
    }
}

// ============================================
// Domain Tests
// ============================================

#[test]
fn test_domain_grows_monotonically() {
    let mut series = vec![series_with("a", &[(0.1, 80.0, Some(5.0))])];
    let (mut lo, mut hi) = y_domain(&series).unwrap();

    let additions = [
        (0.2, 90.0, None),
        (0.3, 70.0, Some(1.0)),
        (0.4, 85.0, Some(0.5)),
        (0.5, 100.0, Some(20.0)),
    ];
    for (i, bucket) in additions.iter().enumerate() {
        series.push(series_with(&format!("g{}", i), &[*bucket]));
        let (next_lo, next_hi) = y_domain(&series).unwrap();
        assert!(next_lo <= lo, "lower bound should never rise");
        assert!(next_hi >= hi, "upper bound should never fall");
        lo = next_lo;
        hi = next_hi;
    }

    assert_eq!((lo, hi), (69.0, 120.0));
}

#[test]
fn test_empty_input_draws_default_axes() {
    let model = Renderer::new().render(&[]);
    assert!(model.is_empty());
    assert!(model.legend.is_empty());
    assert_eq!(model.x_domain, X_DOMAIN);
    assert_eq!(model.y_domain, EMPTY_Y_DOMAIN);
    assert_eq!(model, ChartModel::default());
}

#[test]
fn test_series_without_buckets_keeps_legend_entry() {
    let model = Renderer::new().render(&[series_with("1", &[])]);
    assert_eq!(model.legend.len(), 1);
    assert_eq!(model.y_domain, EMPTY_Y_DOMAIN);
    assert!(model.curves[0].line.is_empty());
}

// ============================================
// Legend Tests
// ============================================

#[test]
fn test_legend_matches_series() {
    let mut rows = ramp("map", "Colorectal", "0", 20, 5.0);
    rows.extend(ramp("map", "Hepatobiliary and pancreatic surgery", "0", 20, 5.0));
    rows.extend(ramp("map", "Vascular", "1", 20, 5.0));
    let series = aggregate(&rows, "map", GroupField::OpType);

    let model = Renderer::new().render(&series);
    assert_eq!(model.legend.len(), series.len());
    for (entry, s) in model.legend.iter().zip(series.iter()) {
        assert_eq!(entry.key, s.key);
        if s.key.chars().count() > 20 {
            let expected: String = s.key.chars().take(18).chain(['…']).collect();
            assert_eq!(entry.label, expected);
        } else {
            assert_eq!(entry.label, s.key);
        }
    }
    assert_eq!(model.legend[1].label, "Hepatobiliary and …");
}

#[test]
fn test_truncation_counts_characters() {
    let label = "Ünïcödé-lâbél-with-äccents";
    let truncated = truncate_label(label);
    assert_eq!(truncated.chars().count(), 19);
    assert!(truncated.ends_with('…'));
}

// ============================================
// Color Tests
// ============================================

#[test]
fn test_colors_stable_across_render_order() {
    let rows = vec![
        row("map", 0.1, 80.0, "Colorectal", "0"),
        row("map", 0.1, 85.0, "Vascular", "1"),
        row("hr", 0.1, 70.0, "Thoracic", "1"),
        row("hr", 0.1, 75.0, "Colorectal", "0"),
    ];
    let mut renderer = Renderer::new();

    let first = renderer.render(&aggregate(&rows, "map", GroupField::OpType));
    let colorectal = first.legend[0].color_slot;
    let vascular = first.legend[1].color_slot;
    assert_ne!(colorectal, vascular);

    // hr lists Thoracic before Colorectal; Colorectal keeps its slot
    let second = renderer.render(&aggregate(&rows, "hr", GroupField::OpType));
    assert_eq!(second.legend[0].key, "Thoracic");
    assert_eq!(second.legend[1].color_slot, colorectal);

    let mut reversed = aggregate(&rows, "map", GroupField::OpType);
    reversed.reverse();
    let third = renderer.render(&reversed);
    assert_eq!(third.legend[0].color_slot, vascular);
    assert_eq!(third.legend[1].color_slot, colorectal);

    assert_eq!(renderer.colors().len(), 3);
}

#[test]
fn test_curve_colors_match_legend() {
    let rows = ramp("map", "Colorectal", "0", 10, 1.0);
    let model = Renderer::new().render(&aggregate(&rows, "map", GroupField::Emop));
    for (curve, entry) in model.curves.iter().zip(model.legend.iter()) {
        assert_eq!(curve.key, entry.key);
        assert_eq!(curve.color_slot, entry.color_slot);
    }
}
