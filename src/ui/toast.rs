//! Transient status messages under the chart.

use eframe::egui;
use std::time::Duration;

use crate::app::VitalViewApp;
use crate::state::ToastType;

/// How long a message stays on screen
const TOAST_LIFETIME: Duration = Duration::from_secs(3);

/// Final stretch of the lifetime during which the message fades out
const TOAST_FADE: Duration = Duration::from_millis(600);

/// Opacity of a message that has been visible for `elapsed`; `None` once expired
pub fn toast_opacity(elapsed: Duration) -> Option<f32> {
    if elapsed >= TOAST_LIFETIME {
        return None;
    }
    let remaining = TOAST_LIFETIME - elapsed;
    if remaining >= TOAST_FADE {
        Some(1.0)
    } else {
        Some(remaining.as_secs_f32() / TOAST_FADE.as_secs_f32())
    }
}

fn rgb([r, g, b]: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}

impl VitalViewApp {
    /// Draw the current message centered along the bottom edge
    pub fn render_toast(&mut self, ctx: &egui::Context) {
        let Some((message, shown_at, toast_type)) = &self.toast_message else {
            return;
        };
        let Some(opacity) = toast_opacity(shown_at.elapsed()) else {
            self.toast_message = None;
            return;
        };

        let accent = rgb(toast_type.color());
        let text_color = rgb(toast_type.text_color());
        let marker = match toast_type {
            ToastType::Info => "ℹ",
            ToastType::Success => "✔",
            ToastType::Error => "⚠",
        };

        egui::Area::new(egui::Id::new("status_toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.multiply_opacity(opacity);
                egui::Frame::NONE
                    .fill(egui::Color32::from_gray(36))
                    .stroke(egui::Stroke::new(1.5, accent))
                    .corner_radius(6)
                    .inner_margin(egui::Margin::symmetric(14, 8))
                    .show(ui, |ui| {
                        ui.set_max_width(520.0);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(marker).color(accent).size(14.0));
                            ui.label(egui::RichText::new(message).color(text_color).size(13.0));
                        });
                    });
            });

        ctx.request_repaint_after(Duration::from_millis(50));
    }
}
