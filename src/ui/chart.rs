//! Chart rendering with egui_plot.

use eframe::egui;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints, Polygon};

use crate::app::VitalViewApp;
use crate::chart::{display_y_bounds, format_percent, palette_color, ChartModel};
use crate::state::{CHART_HEIGHT, CHART_WIDTH, X_AXIS_TITLE, Y_AXIS_TITLE};

impl VitalViewApp {
    /// Render the vitals chart for the current selection
    pub fn render_chart(&mut self, ui: &mut egui::Ui) {
        let Some(controller) = &self.controller else {
            return;
        };
        let model: &ChartModel = controller.model();
        let color_blind_mode = self.color_blind_mode;
        let show_spread = self.show_spread;

        let (x_min, x_max) = model.x_domain;
        let (y_min, y_max) = display_y_bounds(model.y_domain);

        let plot = Plot::new("vitals_chart")
            .width(CHART_WIDTH)
            .height(CHART_HEIGHT)
            .x_axis_label(X_AXIS_TITLE)
            .y_axis_label(Y_AXIS_TITLE)
            .x_axis_formatter(|mark, _range| format_percent(mark.value))
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false);

        plot.show(ui, |plot_ui| {
            // Domains are recomputed every frame; nothing is carried over
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));

            if show_spread {
                for curve in &model.curves {
                    let [r, g, b] = palette_color(curve.color_slot, color_blind_mode);
                    let fill = egui::Color32::from_rgba_unmultiplied(r, g, b, 50);
                    // One trapezoid per sample step keeps every polygon convex
                    for (lo, hi) in curve
                        .band_lower
                        .windows(2)
                        .zip(curve.band_upper.windows(2))
                    {
                        let quad = vec![lo[0], lo[1], hi[1], hi[0]];
                        plot_ui.polygon(
                            Polygon::new(format!("{} band", curve.key), PlotPoints::new(quad))
                                .fill_color(fill)
                                .stroke(egui::Stroke::NONE),
                        );
                    }
                }
            }

            for curve in &model.curves {
                let [r, g, b] = palette_color(curve.color_slot, color_blind_mode);
                let points: PlotPoints = curve.line.iter().copied().collect();
                plot_ui.line(
                    Line::new(curve.key.clone(), points)
                        .color(egui::Color32::from_rgb(r, g, b))
                        .width(2.0),
                );
            }
        });
    }
}

