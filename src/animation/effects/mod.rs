//! The effects shipped in the catalog.
//!
//! Each effect declares its default [`Schema`](crate::schema::Schema) and is
//! built from a [`CreateContext`](super::CreateContext). Populations are drawn
//! from a per-instance seeded RNG.
mod aurora;
mod matrix_rain;
mod particles;
mod sphere;
mod tunnel;
mod warp;

pub use aurora::Aurora;
pub use matrix_rain::MatrixRain;
pub use particles::Particles;
pub use sphere::Sphere;
pub use tunnel::Tunnel;
pub use warp::Warp;

use eframe::egui::{Color32, Pos2, Vec2, pos2};
use rand::Rng;

/// Where a pointer that has not moved yet is assumed to be
pub(crate) const POINTER_AWAY: Pos2 = pos2(-1000.0, -1000.0);

/// A uniformly random point on a surface of `size`. Zero sizes yield the origin.
pub(crate) fn random_point(rng: &mut impl Rng, size: Vec2) -> Pos2 {
    pos2(rng.r#gen::<f32>() * size.x, rng.r#gen::<f32>() * size.y)
}

/// `color` with its opacity scaled by `alpha` (0..=1)
pub(crate) fn faded(color: Color32, alpha: f32) -> Color32 {
    color.gamma_multiply(alpha.clamp(0.0, 1.0))
}

/// Population size read from a range parameter
pub(crate) fn count(value: f64) -> usize {
    value.max(0.0).round() as usize
}
