use eframe::egui;

use crate::animation::ModuleDescriptor;

/// A catalog entry: name over its tags, highlighted when active
pub struct CatalogCard {
    pub descriptor: &'static ModuleDescriptor,
    pub selected: bool,
}

impl CatalogCard {
    pub fn new(descriptor: &'static ModuleDescriptor, selected: bool) -> Self {
        Self {
            descriptor,
            selected,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let size = egui::vec2(ui.available_width(), 48.0);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let visuals = ui.visuals();
            let accent = egui::Color32::from_rgb(99, 102, 241);
            let bg_color = if self.selected {
                accent.gamma_multiply(0.25)
            } else if response.hovered() {
                visuals.widgets.hovered.weak_bg_fill
            } else {
                visuals.faint_bg_color
            };
            ui.painter().rect_filled(rect, 6.0, bg_color);

            let text_color = visuals.strong_text_color();
            ui.painter().text(
                rect.left_top() + egui::vec2(10.0, 8.0),
                egui::Align2::LEFT_TOP,
                self.descriptor.name,
                egui::FontId::proportional(15.0),
                text_color,
            );
            ui.painter().text(
                rect.left_bottom() + egui::vec2(10.0, -8.0),
                egui::Align2::LEFT_BOTTOM,
                self.descriptor.tags.join(" · "),
                egui::FontId::proportional(11.0),
                visuals.weak_text_color(),
            );

            if self.selected {
                ui.painter()
                    .rect_stroke(rect, 6.0, egui::Stroke::new(1.5, accent));
            }
        }

        response.on_hover_text(self.descriptor.description)
    }
}
