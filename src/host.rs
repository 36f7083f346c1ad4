//! The host controller: owns the surface and the single active animation.
//!
//! All mutation goes through `&mut AnimationHost`, and UI actions are queued as
//! [`HostCommand`]s drained in submission order, so two selections can never
//! interleave and an older one can never install itself after a newer one.
use std::collections::VecDeque;
use std::sync::Arc;

use eframe::egui::{Pos2, Rect, Vec2};

use crate::animation::{self, AnimationInstance, CreateContext, FrameRequester, ModuleDescriptor};
use crate::clipboard::ClipboardSink;
use crate::command::HostCommand;
use crate::error::{GalleryError, GalleryResult};
use crate::export::{ExportDocument, export_document};
use crate::notice::{NoticeLevel, Notices};
use crate::schema::{ParamValue, RawValue, Schema};
use crate::surface::Surface;
use crate::theme::Theme;
use crate::util::time::{current_time_secs, elapsed};

/// Seconds the copy button reads "Copied!"
pub const COPIED_SECS: f64 = 2.0;

#[derive(Debug)]
struct ActiveAnimation {
    descriptor: &'static ModuleDescriptor,
    instance: AnimationInstance,
}

pub struct AnimationHost {
    catalog: &'static [ModuleDescriptor],
    surface: Surface,
    active: Option<ActiveAnimation>,
    theme: Theme,
    /// Set by `toggle_theme` until the app has persisted the preference
    theme_dirty: bool,
    notices: Notices,
    requester: Arc<dyn FrameRequester>,
    queue: VecDeque<HostCommand>,
    export: Option<ExportDocument>,
    copied_at: Option<f64>,
    fullscreen: bool,
    /// Instances cleaned up by this host so far
    retired: u64,
}

impl std::fmt::Debug for AnimationHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationHost")
            .field("active", &self.active_id())
            .field("theme", &self.theme)
            .field("size", &self.surface.size())
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl AnimationHost {
    pub fn new(requester: Arc<dyn FrameRequester>, theme: Theme) -> Self {
        Self::with_catalog(animation::CATALOG, requester, theme)
    }

    /// A host that picks modules from `catalog` instead of the built-in one
    pub fn with_catalog(
        catalog: &'static [ModuleDescriptor],
        requester: Arc<dyn FrameRequester>,
        theme: Theme,
    ) -> Self {
        Self {
            catalog,
            surface: Surface::new(Vec2::ZERO),
            active: None,
            theme,
            theme_dirty: false,
            notices: Notices::new(),
            requester,
            queue: VecDeque::new(),
            export: None,
            copied_at: None,
            fullscreen: false,
            retired: 0,
        }
    }

    /// Loads the requested animation, or the first catalog entry when the
    /// request is missing or unknown
    pub fn start(&mut self, initial: Option<&str>) -> GalleryResult<()> {
        if let Some(id) = initial {
            if self.find(id).is_some() {
                return self.select_animation(id);
            }
            self.notices.push(
                NoticeLevel::Error,
                GalleryError::NotFound(id.to_owned()).to_string(),
            );
        }
        let first = self
            .catalog
            .first()
            .ok_or_else(|| GalleryError::NotFound(initial.unwrap_or_default().to_owned()))?;
        self.select_animation(first.id)
    }

    fn find(&self, id: &str) -> Option<&'static ModuleDescriptor> {
        self.catalog.iter().find(|descriptor| descriptor.id == id)
    }

    // --- Accessors ---

    pub fn catalog(&self) -> &'static [ModuleDescriptor] {
        self.catalog
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn active_id(&self) -> Option<&'static str> {
        self.active.as_ref().map(|active| active.descriptor.id)
    }

    pub fn active_descriptor(&self) -> Option<&'static ModuleDescriptor> {
        self.active.as_ref().map(|active| active.descriptor)
    }

    pub fn instance(&self) -> Option<&AnimationInstance> {
        self.active.as_ref().map(|active| &active.instance)
    }

    /// The live schema the settings panel is built from
    pub fn schema(&self) -> Option<&Schema> {
        self.instance().map(AnimationInstance::schema)
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn export(&self) -> Option<&ExportDocument> {
        self.export.as_ref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn retired(&self) -> u64 {
        self.retired
    }

    /// Returns whether the theme changed since the last call
    pub fn take_theme_dirty(&mut self) -> bool {
        std::mem::take(&mut self.theme_dirty)
    }

    // --- Lifecycle ---

    /// Tears down the active animation and installs `id` in its place.
    ///
    /// An unknown id or a module that fails to load leaves the active
    /// animation untouched and running.
    pub fn select_animation(&mut self, id: &str) -> GalleryResult<()> {
        let descriptor = self
            .find(id)
            .ok_or_else(|| GalleryError::NotFound(id.to_owned()))?;
        let schema = descriptor
            .load_schema()
            .map_err(|err| GalleryError::LoadFailure {
                id: id.to_owned(),
                reason: err.to_string(),
            })?;

        if let Some(mut previous) = self.active.take() {
            previous.instance.cleanup();
            self.retired += 1;
        }
        self.export = None;

        log::info!(
            "Loading '{}' with {} parameters",
            descriptor.id,
            schema.len()
        );
        let ctx = CreateContext {
            size: self.surface.size(),
            theme: self.theme,
            seed: rand::random(),
        };
        let instance = descriptor.create(schema, &ctx, self.requester.clone());
        self.active = Some(ActiveAnimation {
            descriptor,
            instance,
        });
        Ok(())
    }

    /// Adopts the container rect and forwards a changed size
    pub fn handle_resize(&mut self, rect: Rect) -> GalleryResult<()> {
        if self.surface.set_rect(rect) {
            log::debug!("Surface is now {}x{}", rect.width(), rect.height());
        }
        if let Some(active) = &mut self.active {
            active.instance.resize(rect.size())?;
        }
        Ok(())
    }

    /// Forwards a pointer position given in screen coordinates
    pub fn handle_pointer_move(&mut self, screen: Pos2) -> GalleryResult<()> {
        let local = self.surface.to_local(screen);
        if let Some(active) = &mut self.active {
            active.instance.pointer_move(local)?;
        }
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> GalleryResult<Theme> {
        self.theme = self.theme.toggled();
        self.theme_dirty = true;
        log::info!("Theme switched to {}", self.theme.as_str());
        if let Some(active) = &mut self.active {
            active.instance.set_theme(self.theme)?;
        }
        Ok(self.theme)
    }

    /// Parses and stores one parameter value, returning it as stored
    pub fn on_parameter_input(&mut self, key: &str, raw: RawValue) -> GalleryResult<ParamValue> {
        let active = self
            .active
            .as_mut()
            .ok_or(GalleryError::NoActiveAnimation)?;
        let value = active.instance.update_config(key, raw)?;
        log::debug!("{}.{} = {}", active.descriptor.id, key, value);
        Ok(value)
    }

    pub fn trigger(&mut self, key: &str) -> GalleryResult<()> {
        self.on_parameter_input(key, RawValue::Trigger).map(|_| ())
    }

    /// Runs one display frame. Hidden viewports skip drawing but keep the
    /// loop alive.
    ///
    /// Returns whether the surface holds a fresh frame.
    pub fn frame(&mut self, visible: bool) -> GalleryResult<bool> {
        if !visible {
            return Ok(false);
        }
        let background = self.theme.background();
        match &mut self.active {
            Some(active) => Ok(active.instance.tick(&mut self.surface, background)?),
            None => Ok(false),
        }
    }

    // --- Export ---

    /// Serializes the active animation with its current values
    pub fn export_document(&self) -> GalleryResult<ExportDocument> {
        let active = self.active.as_ref().ok_or(GalleryError::NoActiveAnimation)?;
        export_document(active.descriptor, active.instance.schema(), self.theme)
    }

    pub fn open_export(&mut self) -> GalleryResult<()> {
        self.export = Some(self.export_document()?);
        self.copied_at = None;
        Ok(())
    }

    pub fn close_export(&mut self) {
        self.export = None;
        self.copied_at = None;
    }

    /// Copies the open export. On failure the modal stays open for manual copy.
    pub fn copy_export(&mut self, clipboard: &mut dyn ClipboardSink, now: f64) -> GalleryResult<()> {
        let Some(document) = &self.export else {
            return Ok(());
        };
        clipboard
            .copy_text(&document.html)
            .map_err(|err| GalleryError::ClipboardFailure(err.to_string()))?;
        self.copied_at = Some(now);
        self.notices
            .push_at(NoticeLevel::Success, "Code copied to clipboard", now);
        Ok(())
    }

    /// Label of the modal's copy button at time `now`
    pub fn copy_label(&self, now: f64) -> &'static str {
        match self.copied_at {
            Some(at) if !elapsed(at, now, COPIED_SECS) => "Copied!",
            _ => "Copy Code",
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    // --- Command queue ---

    pub fn enqueue(&mut self, command: HostCommand) {
        self.queue.push_back(command);
    }

    /// Applies every queued command in order. Failures become notices.
    pub fn process_commands(&mut self, clipboard: &mut dyn ClipboardSink) {
        while let Some(command) = self.queue.pop_front() {
            let name = command.name();
            if let Err(err) = self.apply(command, clipboard) {
                log::error!("Failed to {name}: {err}");
                self.notices.push(NoticeLevel::Error, err.to_string());
            }
        }
    }

    fn apply(&mut self, command: HostCommand, clipboard: &mut dyn ClipboardSink) -> GalleryResult<()> {
        match command {
            HostCommand::Select(id) => self.select_animation(&id),
            HostCommand::ParameterInput { key, value } => {
                self.on_parameter_input(&key, value).map(|_| ())
            }
            HostCommand::Trigger(key) => self.trigger(&key),
            HostCommand::ToggleTheme => self.toggle_theme().map(|_| ()),
            HostCommand::OpenExport => self.open_export(),
            HostCommand::CopyExport => self.copy_export(clipboard, current_time_secs()),
            HostCommand::CloseExport => {
                self.close_export();
                Ok(())
            }
            HostCommand::ToggleFullscreen => {
                self.toggle_fullscreen();
                Ok(())
            }
        }
    }
}

impl Drop for AnimationHost {
    fn drop(&mut self) {
        if let Some(active) = &mut self.active {
            active.instance.cleanup();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::effects::Particles;
    use crate::animation::{AnimationKind, NoFrames};
    use crate::clipboard::MemoryClipboard;
    use eframe::egui::{pos2, vec2};

    fn particles(ctx: &CreateContext, config: &mut Schema) -> AnimationKind {
        AnimationKind::Particles(Particles::new(ctx, config))
    }

    // Second entry ships a default outside its own range
    static BROKEN_CATALOG: &[ModuleDescriptor] = &[
        ModuleDescriptor::new("dots", "Dots", "", &[], "", Particles::schema, particles),
        ModuleDescriptor::new(
            "broken",
            "Broken",
            "",
            &[],
            "",
            || Schema::new().range("count", "Count", 1.0, 20.0, 1.0, 50.0),
            particles,
        ),
    ];

    fn host() -> AnimationHost {
        let mut host = AnimationHost::new(Arc::new(NoFrames), Theme::Dark);
        host.handle_resize(Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 300.0)))
            .unwrap();
        host
    }

    #[test]
    fn test_unknown_start_falls_back_to_first_entry() {
        let mut host = host();
        host.start(Some("nonexistent")).unwrap();
        assert_eq!(host.active_id(), Some(animation::first().id));
        assert_eq!(host.notices().len(), 1);
    }

    #[test]
    fn test_commands_apply_in_order() {
        let mut host = host();
        host.enqueue(HostCommand::Select("tunnel".into()));
        host.enqueue(HostCommand::Select("warp".into()));
        host.process_commands(&mut MemoryClipboard::default());
        assert_eq!(host.active_id(), Some("warp"));
        assert_eq!(host.retired(), 1);
    }

    #[test]
    fn test_failed_command_becomes_notice() {
        let mut host = host();
        host.enqueue(HostCommand::input("speed", 1.0));
        host.process_commands(&mut MemoryClipboard::default());
        assert_eq!(
            host.notices().latest().map(|n| n.message.as_str()),
            Some("No animation is active")
        );
    }

    #[test]
    fn test_copy_label_resets_after_two_seconds() {
        let mut host = host();
        host.select_animation("sphere").unwrap();
        host.open_export().unwrap();
        let mut clipboard = MemoryClipboard::default();
        host.copy_export(&mut clipboard, 100.0).unwrap();

        assert_eq!(clipboard.contents.len(), 1);
        assert_eq!(host.copy_label(101.5), "Copied!");
        assert_eq!(host.copy_label(102.0), "Copy Code");
    }

    #[test]
    fn test_clipboard_failure_keeps_modal_open() {
        let mut host = host();
        host.select_animation("sphere").unwrap();
        host.open_export().unwrap();
        let mut clipboard = MemoryClipboard {
            failure: Some("denied".into()),
            ..Default::default()
        };
        let err = host.copy_export(&mut clipboard, 0.0).unwrap_err();
        assert!(matches!(err, GalleryError::ClipboardFailure(_)));
        assert!(host.export().is_some());
        assert_eq!(host.copy_label(0.5), "Copy Code");
    }

    #[test]
    fn test_load_failure_keeps_previous_animation_running() {
        let mut host = AnimationHost::with_catalog(BROKEN_CATALOG, Arc::new(NoFrames), Theme::Dark);
        host.handle_resize(Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 300.0)))
            .unwrap();
        host.start(None).unwrap();
        assert_eq!(host.active_id(), Some("dots"));
        let instance_id = host.instance().unwrap().id();

        let err = host.select_animation("broken").unwrap_err();
        assert!(matches!(err, GalleryError::LoadFailure { ref id, .. } if id == "broken"));
        assert_eq!(host.active_id(), Some("dots"));
        assert_eq!(host.instance().unwrap().id(), instance_id);
        assert_eq!(host.retired(), 0);
        assert!(host.frame(true).unwrap());
        assert_eq!(host.instance().unwrap().frames(), 1);

        host.enqueue(HostCommand::Select("broken".into()));
        host.process_commands(&mut MemoryClipboard::default());
        assert_eq!(host.notices().len(), 1);
        assert!(host.notices().latest().unwrap().message.contains("broken"));
        assert_eq!(host.active_id(), Some("dots"));
        assert_eq!(host.retired(), 0);
    }

    #[test]
    fn test_empty_catalog_cannot_start() {
        let mut host = AnimationHost::with_catalog(&[], Arc::new(NoFrames), Theme::Dark);
        assert!(matches!(host.start(None), Err(GalleryError::NotFound(_))));
        assert!(host.active_id().is_none());
    }

    #[test]
    fn test_hidden_frames_are_skipped() {
        let mut host = host();
        host.select_animation("particles").unwrap();
        assert!(!host.frame(false).unwrap());
        assert_eq!(host.instance().unwrap().frames(), 0);
        assert!(host.frame(true).unwrap());
        assert_eq!(host.instance().unwrap().frames(), 1);
    }
}
