use eframe::egui;

use crate::notice::{NoticeLevel, Notices};

/// Stacks the live notices in the bottom right corner
pub fn toasts(notices: &Notices, ctx: &egui::Context) {
    if notices.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            for notice in notices.iter() {
                let color = match notice.level {
                    NoticeLevel::Error => egui::Color32::from_rgb(239, 68, 68),
                    NoticeLevel::Success => egui::Color32::from_rgb(34, 197, 94),
                    NoticeLevel::Info => ui.visuals().text_color(),
                };
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.colored_label(color, &notice.message);
                });
                ui.add_space(6.0);
            }
        });
}
