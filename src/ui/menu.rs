//! Menu bar UI components (File, View menus).

use eframe::egui;

use crate::app::VitalViewApp;
use crate::state::LoadingState;

impl VitalViewApp {
    /// Render the application menu bar
    pub fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            // Increase font size for menu items
            ui.style_mut()
                .text_styles
                .insert(egui::TextStyle::Button, egui::FontId::proportional(15.0));

            // File menu
            ui.menu_button("File", |ui| {
                ui.set_min_width(200.0);

                let is_loading = matches!(self.loading_state, LoadingState::Loading(_));

                if ui
                    .add_enabled(!is_loading, egui::Button::new("Open dataset…"))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Vitals CSV", crate::state::SUPPORTED_EXTENSIONS)
                        .pick_file()
                    {
                        self.start_loading_file(path);
                    }
                    ui.close();
                }

                ui.separator();

                let has_chart = self.controller.is_some();
                if ui
                    .add_enabled(has_chart, egui::Button::new("Export chart as PNG…"))
                    .clicked()
                {
                    self.export_chart_png();
                    ui.close();
                }
                if ui
                    .add_enabled(has_chart, egui::Button::new("Export summary as CSV…"))
                    .clicked()
                {
                    self.export_summary_csv();
                    ui.close();
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                ui.set_min_width(200.0);

                let mut changed = false;
                changed |= ui
                    .checkbox(&mut self.show_spread, "Show ±SD band")
                    .changed();
                changed |= ui
                    .checkbox(&mut self.color_blind_mode, "Colorblind palette")
                    .changed();

                if changed {
                    self.update_view_settings();
                }
            });
        });
    }
}
