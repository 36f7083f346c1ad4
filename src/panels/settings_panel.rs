use eframe::egui;

use crate::command::HostCommand;
use crate::host::AnimationHost;
use crate::schema::{ParamKind, color_to_hex, parse_hex_color};

/// Controls generated from the live schema, in declaration order
pub fn settings_panel(host: &mut AnimationHost, ctx: &egui::Context) {
    egui::SidePanel::right("settings_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Settings");
            ui.separator();

            let mut commands = Vec::new();
            if let Some(schema) = host.schema() {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        for (key, param) in schema.iter() {
                            ui.label(&param.label);
                            match &param.kind {
                                ParamKind::Range { min, max, step } => {
                                    let mut value = param.value.as_number().unwrap_or(*min);
                                    ui.horizontal(|ui| {
                                        let slider = egui::Slider::new(&mut value, *min..=*max)
                                            .step_by(*step)
                                            .show_value(false);
                                        if ui.add(slider).changed() {
                                            commands.push(HostCommand::input(key, value));
                                        }
                                        ui.monospace(param.value.to_string());
                                    });
                                }
                                ParamKind::Color => {
                                    let color = param
                                        .value
                                        .as_text()
                                        .and_then(parse_hex_color)
                                        .unwrap_or(egui::Color32::WHITE);
                                    let mut rgb = [color.r(), color.g(), color.b()];
                                    ui.horizontal(|ui| {
                                        if ui.color_edit_button_srgb(&mut rgb).changed() {
                                            let picked =
                                                egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
                                            commands
                                                .push(HostCommand::input(key, color_to_hex(picked)));
                                        }
                                        ui.monospace(param.value.to_string());
                                    });
                                }
                                ParamKind::Select { options } => {
                                    let current = param.value.as_text().unwrap_or_default();
                                    egui::ComboBox::from_id_salt(key)
                                        .selected_text(current)
                                        .show_ui(ui, |ui| {
                                            for option in options {
                                                if ui
                                                    .selectable_label(option == current, option)
                                                    .clicked()
                                                {
                                                    commands.push(HostCommand::input(
                                                        key,
                                                        option.as_str(),
                                                    ));
                                                }
                                            }
                                        });
                                }
                                ParamKind::Button => {
                                    if ui.button(&param.label).clicked() {
                                        commands.push(HostCommand::Trigger(key.to_owned()));
                                    }
                                }
                            }
                            ui.end_row();
                        }
                    });
            } else {
                ui.label("No animation loaded");
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("</> Export Code").clicked() {
                    commands.push(HostCommand::OpenExport);
                }
                if ui.button("⛶ Fullscreen").on_hover_text("Ctrl+F").clicked() {
                    commands.push(HostCommand::ToggleFullscreen);
                }
            });

            for command in commands {
                host.enqueue(command);
            }
        });
}
