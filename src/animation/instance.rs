use std::fmt;
use std::sync::Arc;

use eframe::egui::{Color32, Pos2, Vec2};
use uuid::Uuid;

use super::render_loop::{CancellationToken, FrameRequester, RenderLoop};
use super::{Animation, AnimationKind, CreateContext};
use crate::error::{GalleryError, GalleryResult, LifecycleError};
use crate::schema::{ParamValue, RawValue, Schema};
use crate::surface::Surface;
use crate::theme::Theme;

/// Identifies one loaded instance in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Running,
    Cleaned,
}

/// The live realization of one module.
///
/// ```text
/// created ─► running ─┬─ resize / pointer_move / set_theme / update_config ─┐
///                     │◄───────────────────────────────────────────────────┘
///                     └─ cleanup ─► cleaned
/// ```
///
/// Every call after `cleanup` is rejected with [`LifecycleError::Cleaned`],
/// except `cleanup` itself, which is a no-op the second time.
#[derive(Debug)]
pub struct AnimationInstance {
    id: InstanceId,
    module_id: &'static str,
    animation: AnimationKind,
    schema: Schema,
    size: Vec2,
    theme: Theme,
    render_loop: RenderLoop,
    state: InstanceState,
}

impl AnimationInstance {
    /// Wraps a freshly built animation and starts its render loop
    pub fn new(
        module_id: &'static str,
        animation: AnimationKind,
        schema: Schema,
        ctx: &CreateContext,
        requester: Arc<dyn FrameRequester>,
    ) -> Self {
        let id = InstanceId::new();
        log::info!(
            "Created animation '{}' ({}) at {}x{}",
            module_id,
            id,
            ctx.size.x,
            ctx.size.y
        );
        Self {
            id,
            module_id,
            animation,
            schema,
            size: ctx.size,
            theme: ctx.theme,
            render_loop: RenderLoop::start(requester),
            state: InstanceState::Running,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn module_id(&self) -> &'static str {
        self.module_id
    }

    /// The live parameter values
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == InstanceState::Running && self.render_loop.is_running()
    }

    /// Frames drawn since creation
    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    /// A handle observing this instance's render loop cancellation
    pub fn loop_token(&self) -> CancellationToken {
        self.render_loop.token()
    }

    fn ensure_running(&self) -> Result<(), LifecycleError> {
        match self.state {
            InstanceState::Running => Ok(()),
            InstanceState::Cleaned => Err(LifecycleError::Cleaned(self.id)),
        }
    }

    /// Forwards a new surface size. Equal sizes are ignored.
    pub fn resize(&mut self, size: Vec2) -> Result<(), LifecycleError> {
        self.ensure_running()?;
        if size == self.size {
            return Ok(());
        }
        log::debug!("Resizing '{}' to {}x{}", self.module_id, size.x, size.y);
        self.size = size;
        self.animation.resize(size, &self.schema);
        Ok(())
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> Result<(), LifecycleError> {
        self.ensure_running()?;
        self.animation.pointer_move(pos);
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), LifecycleError> {
        self.ensure_running()?;
        if theme == self.theme {
            return Ok(());
        }
        self.theme = theme;
        self.animation.set_theme(theme, &mut self.schema);
        Ok(())
    }

    /// Parses `raw`, stores it in the live schema and lets the animation react.
    ///
    /// Returns the value as stored (clamped/normalized). Triggers return
    /// `Flag(true)` and are not stored.
    pub fn update_config(&mut self, key: &str, raw: RawValue) -> GalleryResult<ParamValue> {
        self.ensure_running()?;
        let value = self
            .schema
            .apply(key, raw)
            .map_err(|source| GalleryError::InvalidInput {
                key: key.to_owned(),
                source,
            })?;
        self.animation.update_config(key, &self.schema);
        Ok(value)
    }

    /// Runs one frame of the render loop onto `surface`.
    ///
    /// Returns whether anything was drawn.
    pub fn tick(&mut self, surface: &mut Surface, background: Color32) -> Result<bool, LifecycleError> {
        self.ensure_running()?;
        let animation = &mut self.animation;
        let schema = &self.schema;
        Ok(self.render_loop.run_frame(|| {
            surface.begin_frame(background);
            animation.draw(surface, schema);
        }))
    }

    /// Stops the render loop. Calling it again does nothing.
    pub fn cleanup(&mut self) {
        if self.state == InstanceState::Cleaned {
            log::debug!("Animation '{}' ({}) already cleaned up", self.module_id, self.id);
            return;
        }
        self.render_loop.cancel();
        self.state = InstanceState::Cleaned;
        log::info!(
            "Cleaned up animation '{}' ({}) after {} frames",
            self.module_id,
            self.id,
            self.render_loop.frames()
        );
    }
}

impl Drop for AnimationInstance {
    fn drop(&mut self) {
        if self.state == InstanceState::Running {
            log::warn!(
                "Animation '{}' ({}) dropped without cleanup; cancelling its loop",
                self.module_id,
                self.id
            );
            self.render_loop.cancel();
        }
    }
}
