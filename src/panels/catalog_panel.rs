use eframe::egui;

use crate::command::HostCommand;
use crate::components::CatalogCard;
use crate::host::AnimationHost;

pub fn catalog_panel(host: &mut AnimationHost, ctx: &egui::Context) {
    egui::SidePanel::left("catalog_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Hero Gallery");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme = host.theme();
                    if ui
                        .button(theme.icon())
                        .on_hover_text("Toggle light/dark theme")
                        .clicked()
                    {
                        host.enqueue(HostCommand::ToggleTheme);
                    }
                });
            });
            ui.separator();

            let active = host.active_id();
            let catalog = host.catalog();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for descriptor in catalog {
                    let selected = active == Some(descriptor.id);
                    if CatalogCard::new(descriptor, selected).show(ui).clicked() {
                        log::info!("Animation selected from catalog: {}", descriptor.id);
                        host.enqueue(HostCommand::Select(descriptor.id.to_owned()));
                    }
                    ui.add_space(4.0);
                }
            });
        });
}
