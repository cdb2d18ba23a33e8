//! Export actions behind native save dialogs.

use crate::app::VitalViewApp;
use crate::export::{export_png, write_summary_file, ImageOptions};

impl VitalViewApp {
    /// File name stem for exports, from the current selection
    fn export_stem(&self) -> String {
        self.controller
            .as_ref()
            .map(|c| format!("{}_by_{}", c.selection().signal, c.selection().group.id()))
            .unwrap_or_else(|| "vitals".to_string())
    }

    /// Export the current chart as PNG
    pub fn export_chart_png(&mut self) {
        let Some(controller) = &self.controller else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}.png", self.export_stem()))
            .save_file()
        else {
            return;
        };

        let options = ImageOptions {
            color_blind_mode: self.color_blind_mode,
            show_spread: self.show_spread,
        };
        match export_png(controller.model(), options, &path) {
            Ok(()) => self.show_toast_success("Chart exported as PNG"),
            Err(e) => {
                tracing::error!("PNG export failed: {:#}", e);
                self.show_toast_error(&format!("Export failed: {}", e));
            }
        }
    }

    /// Export the aggregated curves as CSV
    pub fn export_summary_csv(&mut self) {
        let Some(controller) = &self.controller else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(format!("{}.csv", self.export_stem()))
            .save_file()
        else {
            return;
        };

        match write_summary_file(controller.series(), &path) {
            Ok(()) => self.show_toast_success("Summary exported as CSV"),
            Err(e) => {
                tracing::error!("CSV export failed: {:#}", e);
                self.show_toast_error(&format!("Export failed: {}", e));
            }
        }
    }
}
