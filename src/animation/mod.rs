//! The animation module contract.
//!
//! Every effect implements [`Animation`] over a [`Surface`]. All mutable state of
//! an effect lives in its own struct, owned by the [`AnimationInstance`] that the
//! host holds; the live [`Schema`] is handed to every call instead of being
//! captured.
use eframe::egui::{Pos2, Vec2};

use crate::schema::Schema;
use crate::surface::Surface;
use crate::theme::Theme;

pub mod effects;
mod instance;
mod registry;
mod render_loop;

pub use instance::{AnimationInstance, InstanceId, InstanceState};
pub use registry::{CATALOG, ModuleDescriptor, find, first};
pub use render_loop::{CancellationToken, FrameCounter, FrameRequester, NoFrames, RenderLoop};

use effects::{Aurora, MatrixRain, Particles, Sphere, Tunnel, Warp};

/// What a module gets to know when it is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreateContext {
    /// Current surface size
    pub size: Vec2,
    pub theme: Theme,
    /// Seed of the instance's random population
    pub seed: u64,
}

/// Lifecycle of one visual effect.
///
/// `resize`, `update_config` and `draw` are required. `pointer_move` and
/// `set_theme` are optional capabilities and default to no-ops.
pub trait Animation {
    /// Rebuilds state whose validity depends on the surface size.
    ///
    /// Must tolerate a zero-sized surface.
    fn resize(&mut self, size: Vec2, config: &Schema);

    /// Caches the pointer for the next frame. Never draws.
    fn pointer_move(&mut self, _pos: Pos2) {}

    /// Swaps palette constants. May rewrite theme-coupled values in `config`.
    fn set_theme(&mut self, _theme: Theme, _config: &mut Schema) {}

    /// Reacts to a new value of `key`, already stored in `config`.
    ///
    /// Structural keys rebuild their collections here; visual keys are simply
    /// read on the next frame. Trigger keys fire once.
    fn update_config(&mut self, key: &str, config: &Schema);

    /// Advances one frame and records it on `surface`
    fn draw(&mut self, surface: &mut Surface, config: &Schema);
}

/// Closed set of effects the gallery ships with
#[derive(Debug)]
pub enum AnimationKind {
    Particles(Particles),
    MatrixRain(MatrixRain),
    Tunnel(Tunnel),
    Aurora(Aurora),
    Warp(Warp),
    Sphere(Sphere),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $call:expr) => {
        match $self {
            AnimationKind::Particles($inner) => $call,
            AnimationKind::MatrixRain($inner) => $call,
            AnimationKind::Tunnel($inner) => $call,
            AnimationKind::Aurora($inner) => $call,
            AnimationKind::Warp($inner) => $call,
            AnimationKind::Sphere($inner) => $call,
        }
    };
}

impl Animation for AnimationKind {
    fn resize(&mut self, size: Vec2, config: &Schema) {
        dispatch!(self, animation => animation.resize(size, config))
    }

    fn pointer_move(&mut self, pos: Pos2) {
        dispatch!(self, animation => animation.pointer_move(pos))
    }

    fn set_theme(&mut self, theme: Theme, config: &mut Schema) {
        dispatch!(self, animation => animation.set_theme(theme, config))
    }

    fn update_config(&mut self, key: &str, config: &Schema) {
        dispatch!(self, animation => animation.update_config(key, config))
    }

    fn draw(&mut self, surface: &mut Surface, config: &Schema) {
        dispatch!(self, animation => animation.draw(surface, config))
    }
}
