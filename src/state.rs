//! Core application state types and constants.
//!
//! This module contains the fundamental data structures shared by the
//! application shell: chart geometry, color palettes, loading state and
//! toast notifications.

use std::path::PathBuf;

use crate::dataset::Dataset;

// ============================================================================
// Constants
// ============================================================================

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "data/long_surgery_vitals.csv";

/// Supported dataset extensions (used in file dialogs)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv"];

/// Total chart surface width in logical units
pub const CHART_WIDTH: f32 = 1100.0;

/// Total chart surface height in logical units
pub const CHART_HEIGHT: f32 = 400.0;

/// Space reserved around the plotting area for axes and titles
pub const CHART_MARGIN: Margin = Margin {
    top: 50.0,
    right: 40.0,
    bottom: 50.0,
    left: 60.0,
};

/// X axis title
pub const X_AXIS_TITLE: &str = "Progress Through Surgery";

/// Y axis title
pub const Y_AXIS_TITLE: &str = "Average Vital Value";

/// Legend labels longer than this are truncated
pub const LEGEND_LABEL_MAX: usize = 20;

/// Characters kept from a truncated legend label
pub const LEGEND_LABEL_KEEP: usize = 18;

/// Interpolated points drawn between two adjacent buckets
pub const CURVE_SAMPLES_PER_SEGMENT: usize = 8;

/// Categorical palette for series lines (Category10)
pub const CHART_COLORS: &[[u8; 3]] = &[
    [31, 119, 180],  // Blue
    [255, 127, 14],  // Orange
    [44, 160, 44],   // Green
    [214, 39, 40],   // Red
    [148, 103, 189], // Purple
    [140, 86, 75],   // Brown
    [227, 119, 194], // Pink
    [127, 127, 127], // Gray
    [188, 189, 34],  // Olive
    [23, 190, 207],  // Cyan
];

/// Colorblind-friendly palette (based on Wong's optimized palette)
/// Designed to be distinguishable for deuteranopia, protanopia, and tritanopia
pub const COLORBLIND_COLORS: &[[u8; 3]] = &[
    [0, 114, 178],   // Blue
    [230, 159, 0],   // Orange
    [0, 158, 115],   // Bluish green
    [204, 121, 167], // Reddish purple
    [86, 180, 233],  // Sky blue
    [213, 94, 0],    // Vermillion
    [240, 228, 66],  // Yellow
    [255, 255, 255], // White (visible on the dark theme)
    [136, 204, 238], // Light blue
    [153, 153, 153], // Gray
];

// ============================================================================
// Core Types
// ============================================================================

/// Margins around the plotting area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    /// Width of the plotting area inside a surface of `total` width
    pub fn inner_width(&self, total: f32) -> f32 {
        total - self.left - self.right
    }

    /// Height of the plotting area inside a surface of `total` height
    pub fn inner_height(&self, total: f32) -> f32 {
        total - self.top - self.bottom
    }
}

/// A dataset that finished loading, with where it came from
#[derive(Clone)]
pub struct LoadedDataset {
    /// Path to the original file
    pub path: PathBuf,
    /// Display name for the file
    pub name: String,
    /// Parsed observations
    pub dataset: Dataset,
}

impl LoadedDataset {
    pub fn new(path: PathBuf, dataset: Dataset) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Self {
            path,
            name,
            dataset,
        }
    }
}

/// Result from background loading operation
pub enum LoadResult {
    Success(Box<LoadedDataset>),
    Error(String),
}

/// Current state of dataset loading
pub enum LoadingState {
    /// No loading in progress
    Idle,
    /// Loading a file (contains filename being loaded)
    Loading(String),
    /// The last load failed; nothing is shown until another file loads
    Failed(String),
}

/// Type of toast notification (determines color)
#[derive(Clone, Copy, Default)]
pub enum ToastType {
    /// Informational message (blue)
    #[default]
    Info,
    /// Success message (green)
    Success,
    /// Error message (red)
    Error,
}

impl ToastType {
    /// Get the accent color for this toast type
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],    // Blue
            ToastType::Success => [113, 120, 78], // Olive green
            ToastType::Error => [135, 30, 28],    // Dark red
        }
    }

    /// Get the text color for this toast type
    pub fn text_color(&self) -> [u8; 3] {
        [255, 255, 255]
    }
}
