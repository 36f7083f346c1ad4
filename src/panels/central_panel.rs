use eframe::egui;

use crate::host::AnimationHost;
use crate::renderer::Renderer;

/// The preview canvas. Feeds size and pointer to the host, then draws its frame.
pub fn central_panel(host: &mut AnimationHost, renderer: &mut Renderer, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::hover());

            if let Err(err) = host.handle_resize(response.rect) {
                log::error!("Resize failed: {err}");
            }
            if let Some(pos) = response.hover_pos() {
                if let Err(err) = host.handle_pointer_move(pos) {
                    log::error!("Pointer forwarding failed: {err}");
                }
            }

            let visible = !ctx.input(|i| i.viewport().minimized.unwrap_or(false));
            if let Err(err) = host.frame(visible) {
                log::error!("Frame failed: {err}");
            }
            renderer.render(&painter, host.surface());
        });
}
