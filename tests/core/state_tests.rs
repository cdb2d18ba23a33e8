//! Tests for shared state constants and types
//!
//! Tests cover:
//! - Chart geometry
//! - Color palettes
//! - ToastType colors
//! - LoadedDataset naming

use std::path::PathBuf;
use vitalview::dataset::Dataset;
use vitalview::state::{
    LoadedDataset, ToastType, CHART_COLORS, CHART_HEIGHT, CHART_MARGIN, CHART_WIDTH,
    COLORBLIND_COLORS, LEGEND_LABEL_KEEP, LEGEND_LABEL_MAX, SUPPORTED_EXTENSIONS,
};

// ============================================
// Geometry Tests
// ============================================

#[test]
fn test_chart_surface_size() {
    assert_eq!(CHART_WIDTH, 1100.0);
    assert_eq!(CHART_HEIGHT, 400.0);
    assert_eq!(CHART_MARGIN.inner_width(CHART_WIDTH), 1000.0);
    assert_eq!(CHART_MARGIN.inner_height(CHART_HEIGHT), 300.0);
}

#[test]
fn test_legend_limits() {
    assert_eq!(LEGEND_LABEL_MAX, 20);
    assert_eq!(LEGEND_LABEL_KEEP, 18);
}

#[test]
fn test_supported_extensions_contains_csv() {
    assert!(SUPPORTED_EXTENSIONS.contains(&"csv"), "Should support CSV");
}

// ============================================
// Color Palette Tests
// ============================================

#[test]
fn test_palettes_have_ten_colors() {
    assert_eq!(CHART_COLORS.len(), 10);
    assert_eq!(COLORBLIND_COLORS.len(), 10);
}

#[test]
fn test_palette_colors_unique() {
    for palette in [CHART_COLORS, COLORBLIND_COLORS] {
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b, "Palette colors should be unique");
            }
        }
    }
}

#[test]
fn test_chart_palette_starts_with_category10_blue() {
    assert_eq!(CHART_COLORS[0], [31, 119, 180]);
}

// ============================================
// ToastType Tests
// ============================================

#[test]
fn test_toast_default_is_info() {
    let toast = ToastType::default();
    assert_eq!(toast.color(), ToastType::Info.color());
}

#[test]
fn test_toast_colors_distinct() {
    let info = ToastType::Info.color();
    let success = ToastType::Success.color();
    let error = ToastType::Error.color();
    assert_ne!(info, success);
    assert_ne!(info, error);
    assert_ne!(success, error);
}

// ============================================
// LoadedDataset Tests
// ============================================

#[test]
fn test_loaded_dataset_name_from_path() {
    let loaded = LoadedDataset::new(
        PathBuf::from("/data/long_surgery_vitals.csv"),
        Dataset::default(),
    );
    assert_eq!(loaded.name, "long_surgery_vitals.csv");
}

#[test]
fn test_loaded_dataset_name_fallback() {
    let loaded = LoadedDataset::new(PathBuf::from("/"), Dataset::default());
    assert_eq!(loaded.name, "Unknown");
}
