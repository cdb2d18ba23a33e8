//! VitalView - grouped surgical vital-sign curves
//!
//! This library loads a long-format vitals dataset, aggregates one signal
//! into per-group mean/sd curves over normalized surgery progress, and
//! draws them with a legend.
//!
//! ## Module Structure
//!
//! - [`dataset`] - CSV loading with an explicit column schema
//! - [`controls`] - Option lists for the signal and grouping selectors
//! - [`aggregate`] - Binning and mean/sd per progress bucket
//! - [`chart`] - Scales, smoothed curves, colors and legend model
//! - [`controller`] - Selection state and recompute-on-change
//! - [`export`] - PNG and CSV export
//! - [`settings`] - User settings persistence
//! - [`state`] - Shared constants and application state types
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components

pub mod aggregate;
pub mod app;
pub mod chart;
pub mod controller;
pub mod controls;
pub mod dataset;
pub mod export;
pub mod settings;
pub mod state;
pub mod ui;
