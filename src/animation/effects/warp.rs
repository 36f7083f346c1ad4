use eframe::egui::{Color32, Pos2, Stroke, Vec2, pos2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{count, faded};
use crate::animation::{Animation, CreateContext};
use crate::schema::{ParamValue, Schema};
use crate::surface::Surface;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy)]
struct Star {
    /// Position in the plane orthogonal to the view axis
    x: f32,
    y: f32,
    /// Distance from the viewer, `0..=depth`
    z: f32,
    /// Depth on the previous frame, for the streak
    previous_z: f32,
}

/// Stars streaking past the viewer; the pointer steers the vanishing point
#[derive(Debug)]
pub struct Warp {
    rng: StdRng,
    size: Vec2,
    pointer: Pos2,
    stars: Vec<Star>,
}

impl Warp {
    pub fn schema() -> Schema {
        Schema::new()
            .range("count", "Star Count", 100.0, 1000.0, 1.0, 400.0)
            .range("speed", "Warp Speed", 0.1, 20.0, 0.1, 0.5)
            .color("color", "Star Color", "#ffffff")
    }

    pub fn new(ctx: &CreateContext, config: &mut Schema) -> Self {
        let mut warp = Self {
            rng: StdRng::seed_from_u64(ctx.seed),
            size: ctx.size,
            pointer: (ctx.size / 2.0).to_pos2(),
            stars: Vec::new(),
        };
        warp.set_theme(ctx.theme, config);
        warp.spawn_stars(config);
        warp
    }

    fn depth(&self) -> f32 {
        self.size.x.max(1.0)
    }

    fn spawn_star(rng: &mut StdRng, size: Vec2, depth: f32) -> Star {
        let z = rng.r#gen::<f32>() * depth;
        Star {
            x: (rng.r#gen::<f32>() - 0.5) * size.x * 2.0,
            y: (rng.r#gen::<f32>() - 0.5) * size.y * 2.0,
            z,
            previous_z: z,
        }
    }

    fn spawn_stars(&mut self, config: &Schema) {
        let wanted = count(config.number_or("count", 400.0));
        let (size, depth) = (self.size, self.depth());
        let rng = &mut self.rng;
        self.stars = (0..wanted)
            .map(|_| Self::spawn_star(rng, size, depth))
            .collect();
    }

    fn project(&self, center: Pos2, star: &Star, z: f32) -> Pos2 {
        let scale = self.depth() / z.max(1.0) * 0.5;
        pos2(center.x + star.x * scale, center.y + star.y * scale)
    }
}

impl Animation for Warp {
    fn resize(&mut self, size: Vec2, config: &Schema) {
        self.size = size;
        self.pointer = (size / 2.0).to_pos2();
        self.spawn_stars(config);
    }

    fn pointer_move(&mut self, pos: Pos2) {
        self.pointer = pos;
    }

    fn set_theme(&mut self, theme: Theme, config: &mut Schema) {
        let swapped = match (theme, config.text("color")) {
            (Theme::Light, Some("#ffffff")) => "#0f172a",
            (Theme::Dark, Some("#0f172a")) => "#ffffff",
            _ => return,
        };
        if let Err(err) = config.set("color", ParamValue::Text(swapped.to_owned())) {
            log::warn!("Could not adapt star color to theme: {err}");
        }
    }

    fn update_config(&mut self, key: &str, config: &Schema) {
        if key == "count" {
            self.spawn_stars(config);
        }
    }

    fn draw(&mut self, surface: &mut Surface, config: &Schema) {
        let speed = config.number_or("speed", 0.5) as f32 * 10.0;
        let color = config.color_or("color", Color32::WHITE);
        let middle = (self.size / 2.0).to_pos2();
        let center = middle + (middle - self.pointer) * 0.3;
        let (size, depth) = (self.size, self.depth());

        for index in 0..self.stars.len() {
            let mut star = self.stars[index];
            star.previous_z = star.z;
            star.z -= speed;
            if star.z < 1.0 {
                star = Self::spawn_star(&mut self.rng, size, depth);
                star.z = depth;
                star.previous_z = depth;
            }
            self.stars[index] = star;

            let head = self.project(center, &star, star.z);
            let tail = self.project(center, &star, star.previous_z);
            let brightness = 1.0 - star.z / depth;
            let width = (brightness * 3.0).max(0.5);
            if head == tail {
                surface.circle(head, width * 0.5, faded(color, brightness));
            } else {
                surface.line(tail, head, Stroke::new(width, faded(color, brightness)));
            }
        }
    }
}
