//! Signal and grouping selectors above the chart.

use eframe::egui;

use crate::app::VitalViewApp;
use crate::controller::ControlEvent;

impl VitalViewApp {
    /// Render the two selection controls
    pub fn render_controls(&mut self, ui: &mut egui::Ui) {
        let Some(controller) = &self.controller else {
            return;
        };

        let selection = controller.selection().clone();
        let signal_options = controller.options().signal_options();
        let groups = controller.options().groups;

        let mut event: Option<ControlEvent> = None;

        ui.horizontal(|ui| {
            ui.add_space(10.0);
            ui.label(egui::RichText::new("Vital sign").size(14.0));
            egui::ComboBox::from_id_salt("signal_select")
                .selected_text(&selection.signal)
                .width(160.0)
                .show_ui(ui, |ui| {
                    for option in &signal_options {
                        let selected = option.value == selection.signal;
                        if ui.selectable_label(selected, &option.label).clicked() {
                            event = Some(ControlEvent::SignalChanged(option.value.clone()));
                        }
                    }
                });

            ui.add_space(20.0);
            ui.label(egui::RichText::new("Group by").size(14.0));
            egui::ComboBox::from_id_salt("group_select")
                .selected_text(selection.group.label())
                .width(160.0)
                .show_ui(ui, |ui| {
                    for group in groups {
                        let selected = group == selection.group;
                        if ui.selectable_label(selected, group.label()).clicked() {
                            event = Some(ControlEvent::GroupChanged(group));
                        }
                    }
                });

            if let Some(name) = &self.dataset_name {
                ui.add_space(20.0);
                let response =
                    ui.label(egui::RichText::new(name).size(12.0).color(egui::Color32::GRAY));
                if let Some(path) = &self.dataset_path {
                    response.on_hover_text(path.display().to_string());
                }
            }
        });

        if let Some(event) = event {
            tracing::debug!("Control changed: {:?}", event);
            self.apply_control_event(event);
        }
    }
}
