use std::sync::Arc;

use eframe::egui;

use crate::command::HostCommand;
use crate::host::AnimationHost;
use crate::notice::NoticeLevel;
use crate::panels::{self, ExportTab};
use crate::renderer::Renderer;
use crate::theme::Theme;
use crate::util::time::current_time_secs;

/// The gallery shell: catalog on the left, settings on the right, preview in the middle.
///
/// Only the theme survives a restart; everything else is rebuilt on launch.
pub struct GalleryApp {
    host: AnimationHost,
    renderer: Renderer,
    export_tab: ExportTab,
}

impl GalleryApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, initial: Option<String>) -> Self {
        let theme = Theme::load(cc.storage);
        cc.egui_ctx.set_visuals(theme.visuals());

        let mut host = AnimationHost::new(Arc::new(cc.egui_ctx.clone()), theme);
        if let Err(err) = host.start(initial.as_deref()) {
            log::error!("Could not start the gallery: {err}");
            host.notices_mut().push(NoticeLevel::Error, err.to_string());
        }

        Self {
            host,
            renderer: Renderer::new(),
            export_tab: ExportTab::default(),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let export_open = self.host.export().is_some();
        let (fullscreen, close, copy) = ctx.input_mut(|i| {
            let fullscreen = i.consume_key(egui::Modifiers::COMMAND, egui::Key::F);
            let close = export_open && i.consume_key(egui::Modifiers::NONE, egui::Key::Escape);
            // Platforms turn Cmd/Ctrl+C into a copy event rather than a key press
            let copy = export_open
                && (i.consume_key(egui::Modifiers::COMMAND, egui::Key::C)
                    || i.events.iter().any(|event| matches!(event, egui::Event::Copy)));
            (fullscreen, close, copy)
        });

        if fullscreen {
            self.host.enqueue(HostCommand::ToggleFullscreen);
        }
        if copy {
            self.host.enqueue(HostCommand::CopyExport);
        }
        if close {
            self.host.enqueue(HostCommand::CloseExport);
        }
    }
}

impl eframe::App for GalleryApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.host.theme().store(storage);
    }

    /// Called each time the UI needs repainting; the active animation asks for
    /// a repaint after every frame it draws.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.host.notices_mut().prune(current_time_secs());

        if !self.host.is_fullscreen() {
            panels::catalog_panel(&mut self.host, ctx);
            panels::settings_panel(&mut self.host, ctx);
        }
        panels::central_panel(&mut self.host, &mut self.renderer, ctx);
        panels::export_modal(&mut self.host, &mut self.export_tab, ctx);
        panels::toasts(self.host.notices(), ctx);

        let mut clipboard = ctx.clone();
        self.host.process_commands(&mut clipboard);

        if self.host.take_theme_dirty() {
            let theme = self.host.theme();
            ctx.set_visuals(theme.visuals());
            if let Some(storage) = frame.storage_mut() {
                theme.store(storage);
            }
        }
        if !self.host.notices().is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
