//! UI rendering modules for the VitalView application.
//!
//! - `controls` - Vital sign and grouping selectors
//! - `chart` - Main chart rendering
//! - `legend` - Color-coded legend beside the chart
//! - `menu` - Menu bar (File, View)
//! - `toast` - Toast notification system
//! - `export` - Save dialogs for PNG and CSV export

pub mod chart;
pub mod controls;
pub mod export;
pub mod legend;
pub mod menu;
pub mod toast;
