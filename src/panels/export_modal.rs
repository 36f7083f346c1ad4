use eframe::egui;

use crate::command::HostCommand;
use crate::host::AnimationHost;
use crate::util::time::current_time_secs;

/// Which view of the export the modal shows
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExportTab {
    #[default]
    Html,
    Schema,
}

pub fn export_modal(host: &mut AnimationHost, tab: &mut ExportTab, ctx: &egui::Context) {
    let Some(document) = host.export() else {
        return;
    };

    let mut commands = Vec::new();
    let mut open = true;
    let copy_label = host.copy_label(current_time_secs());

    egui::Window::new(format!("Export: {}", document.title))
        .collapsible(false)
        .resizable(true)
        .default_size([640.0, 480.0])
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut *tab, ExportTab::Html, "HTML");
                ui.selectable_value(&mut *tab, ExportTab::Schema, "Schema JSON");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(copy_label).on_hover_text("Ctrl+C").clicked() {
                        commands.push(HostCommand::CopyExport);
                    }
                });
            });
            ui.separator();

            let mut text = match tab {
                ExportTab::Html => document.html.as_str(),
                ExportTab::Schema => document.schema_json.as_str(),
            };
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
        });

    if !open {
        commands.push(HostCommand::CloseExport);
    }
    for command in commands {
        host.enqueue(command);
    }
}
