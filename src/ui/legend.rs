//! Color-coded legend beside the chart.

use eframe::egui;

use crate::app::VitalViewApp;
use crate::chart::palette_color;

impl VitalViewApp {
    /// Render one swatch + label row per series, rebuilt every frame
    pub fn render_legend(&mut self, ui: &mut egui::Ui) {
        let Some(controller) = &self.controller else {
            return;
        };
        let legend = &controller.model().legend;
        let group_label = controller.selection().group.label();

        ui.vertical(|ui| {
            ui.add_space(10.0);
            ui.label(egui::RichText::new(group_label).size(14.0).strong());
            ui.add_space(6.0);

            if legend.is_empty() {
                ui.label(
                    egui::RichText::new("No data for this signal")
                        .size(12.0)
                        .color(egui::Color32::GRAY),
                );
                return;
            }

            for entry in legend {
                let [r, g, b] = palette_color(entry.color_slot, self.color_blind_mode);
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 2.0, egui::Color32::from_rgb(r, g, b));

                    let response = ui.label(egui::RichText::new(&entry.label).size(13.0));
                    if entry.label != entry.key {
                        response.on_hover_text(&entry.key);
                    }
                });
            }
        });
    }
}
